use std::sync::Arc;

use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::instrument;

use super::area_grouping::AreaWindow;
use super::deal_filters::{
    rent_area_within, rent_kind, rents_newest_first, rents_of, sale_area_within,
    sales_newest_first, sales_of,
};
use super::transformers::{to_rent, to_trade};
use super::{current_year, find_keys, QuerySettings};
use crate::db::{DatabaseAccess, DbPool, PageRequest};
use crate::entities::{rent, trade};
use crate::errors::ServiceError;
use crate::models::{Rent, RentType, Trade};

/// Filters for a deal listing. Missing years fall back to the configured
/// start year and the current year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DealListQuery {
    pub page: PageRequest,
    pub area: Option<f64>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

/// Paged sale and rent history of one complex, newest first
#[derive(Clone)]
pub struct TransactionService {
    db: DatabaseAccess,
    settings: QuerySettings,
}

impl TransactionService {
    pub fn new(db_pool: Arc<DbPool>, settings: QuerySettings) -> Self {
        Self {
            db: DatabaseAccess::new(db_pool),
            settings,
        }
    }

    fn year_range(&self, query: &DealListQuery) -> (i32, i32) {
        (
            query.start_year.unwrap_or(self.settings.default_list_start_year),
            query.end_year.unwrap_or_else(current_year),
        )
    }

    fn area_window(&self, query: &DealListQuery) -> Option<AreaWindow> {
        query
            .area
            .map(|a| AreaWindow::around(a, self.settings.area_tolerance))
    }

    #[instrument(skip(self))]
    pub async fn list_trades(
        &self,
        apt_id: i32,
        query: DealListQuery,
    ) -> Result<(Vec<Trade>, u64), ServiceError> {
        let keys = find_keys(&self.db, apt_id).await?;
        let (from, to) = self.year_range(&query);

        let mut select = trade::Entity::find()
            .filter(sales_of(&keys))
            .filter(trade::Column::DealYear.between(from, to));
        if let Some(window) = self.area_window(&query) {
            select = select.filter(sale_area_within(window));
        }
        let select = sales_newest_first(select);
        let page = query.page;

        let (rows, total) = self
            .db
            .execute("list_trades", move |pool| async move {
                let paginator = select.paginate(pool, page.limit);
                let total = paginator.num_items().await?;
                let rows = paginator.fetch_page(page.page - 1).await?;
                Ok::<_, DbErr>((rows, total))
            })
            .await?;

        Ok((rows.iter().map(|row| to_trade(row, apt_id)).collect(), total))
    }

    #[instrument(skip(self))]
    pub async fn list_rents(
        &self,
        apt_id: i32,
        query: DealListQuery,
        rent_type: Option<RentType>,
    ) -> Result<(Vec<Rent>, u64), ServiceError> {
        let keys = find_keys(&self.db, apt_id).await?;
        let (from, to) = self.year_range(&query);

        let mut select = rent::Entity::find()
            .filter(rents_of(&keys))
            .filter(rent::Column::DealYear.between(from, to));
        if let Some(window) = self.area_window(&query) {
            select = select.filter(rent_area_within(window));
        }
        if let Some(rent_type) = rent_type {
            select = select.filter(rent_kind(rent_type));
        }
        let select = rents_newest_first(select);
        let page = query.page;

        let (rows, total) = self
            .db
            .execute("list_rents", move |pool| async move {
                let paginator = select.paginate(pool, page.limit);
                let total = paginator.num_items().await?;
                let rows = paginator.fetch_page(page.page - 1).await?;
                Ok::<_, DbErr>((rows, total))
            })
            .await?;

        Ok((rows.iter().map(|row| to_rent(row, apt_id)).collect(), total))
    }
}
