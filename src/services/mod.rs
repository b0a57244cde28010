// Pure domain logic
pub mod area_grouping;
pub mod deal_filters;
pub mod transformers;

// Store-backed read services
pub mod apartments;
pub mod area_types;
pub mod compare;
pub mod schools;
pub mod transactions;
pub mod trends;

use crate::config::AppConfig;
use crate::db::DatabaseAccess;
use crate::entities::apartment;
use crate::errors::ServiceError;
use crate::models::ApartmentKeys;
use sea_orm::EntityTrait;

/// Tuning shared by the read services, taken from [`AppConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuerySettings {
    /// ± m² around an exclusive area when matching transactions
    pub area_tolerance: f64,
    pub price_candidate_limit: u64,
    pub map_result_limit: u64,
    pub autocomplete_limit: u64,
    pub dataset_start_year: i32,
    pub default_list_start_year: i32,
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            area_tolerance: 1.0,
            price_candidate_limit: 2000,
            map_result_limit: 1000,
            autocomplete_limit: 15,
            dataset_start_year: 2006,
            default_list_start_year: 2020,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl From<&AppConfig> for QuerySettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            area_tolerance: cfg.area_tolerance(),
            price_candidate_limit: cfg.price_candidate_limit,
            map_result_limit: cfg.map_result_limit,
            autocomplete_limit: cfg.autocomplete_limit,
            dataset_start_year: cfg.dataset_start_year,
            default_list_start_year: cfg.default_list_start_year,
            default_page_size: cfg.api_default_page_size,
            max_page_size: cfg.api_max_page_size,
        }
    }
}

/// Master row of a complex or `NotFound`
pub(crate) async fn find_apartment(
    db: &DatabaseAccess,
    apt_id: i32,
) -> Result<apartment::Model, ServiceError> {
    db.execute("find_apartment", |pool| {
        apartment::Entity::find_by_id(apt_id).one(pool)
    })
    .await?
    .ok_or_else(|| ServiceError::apartment_not_found(apt_id))
}

/// Transaction join keys of a complex or `NotFound`
pub(crate) async fn find_keys(
    db: &DatabaseAccess,
    apt_id: i32,
) -> Result<ApartmentKeys, ServiceError> {
    let apt = find_apartment(db, apt_id).await?;
    Ok(ApartmentKeys {
        sigungu_code: apt.sigungu_cd,
        name: apt.apt_nm,
    })
}

/// Calendar year used for period and listing defaults
pub(crate) fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}
