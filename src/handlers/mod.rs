pub mod apartments;
pub mod common;
pub mod market;
pub mod nearby;

use crate::db::DbPool;
use crate::services::{
    apartments::ApartmentService, area_types::AreaTypeService, compare::CompareService,
    schools::SchoolService, transactions::TransactionService, trends::TrendService,
    QuerySettings,
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer used by HTTP handlers and the CLI
#[derive(Clone)]
pub struct AppServices {
    pub apartments: Arc<ApartmentService>,
    pub area_types: Arc<AreaTypeService>,
    pub trends: Arc<TrendService>,
    pub transactions: Arc<TransactionService>,
    pub schools: Arc<SchoolService>,
    pub compare: Arc<CompareService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, settings: QuerySettings) -> Self {
        let apartments = ApartmentService::new(db_pool.clone(), settings);
        let trends = TrendService::new(db_pool.clone(), settings);
        let compare = CompareService::new(apartments.clone(), trends.clone());

        Self {
            apartments: Arc::new(apartments),
            area_types: Arc::new(AreaTypeService::new(db_pool.clone(), settings)),
            trends: Arc::new(trends),
            transactions: Arc::new(TransactionService::new(db_pool.clone(), settings)),
            schools: Arc::new(SchoolService::new(db_pool)),
            compare: Arc::new(compare),
        }
    }
}
