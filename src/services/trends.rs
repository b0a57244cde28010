use std::sync::Arc;

use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect};
use tracing::instrument;

use super::area_grouping::AreaWindow;
use super::deal_filters::{rent_area_within, rent_kind, rents_of, sale_area_within, sales_of};
use super::{current_year, find_keys, QuerySettings};
use crate::db::{DatabaseAccess, DbPool};
use crate::entities::{rent, trade};
use crate::errors::ServiceError;
use crate::models::trend::month_label;
use crate::models::{ApartmentKeys, Period, RentTrendPoint, RentType, SaleTrendPoint};

#[derive(Debug, FromQueryResult)]
struct SaleMonthRow {
    deal_year: i32,
    deal_month: i32,
    avg_price: Option<f64>,
    transaction_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct RentMonthRow {
    deal_year: i32,
    deal_month: i32,
    avg_deposit: Option<f64>,
    avg_monthly_rent: Option<f64>,
    transaction_count: i64,
}

/// `AVG(col)` as double precision on every backend
fn avg_of<C: ColumnTrait>(col: C) -> SimpleExpr {
    SimpleExpr::from(Func::avg(Expr::col(col).cast_as(Alias::new("float8"))))
}

fn round_avg(value: Option<f64>) -> i64 {
    value.map(|v| v.round() as i64).unwrap_or(0)
}

/// Monthly price series for one complex
#[derive(Clone)]
pub struct TrendService {
    db: DatabaseAccess,
    settings: QuerySettings,
}

impl TrendService {
    pub fn new(db_pool: Arc<DbPool>, settings: QuerySettings) -> Self {
        Self {
            db: DatabaseAccess::new(db_pool),
            settings,
        }
    }

    fn start_year(&self, period: Period) -> i32 {
        period.start_year(current_year(), self.settings.dataset_start_year)
    }

    fn area_window(&self, area: Option<f64>) -> Option<AreaWindow> {
        area.map(|a| AreaWindow::around(a, self.settings.area_tolerance))
    }

    #[instrument(skip(self))]
    pub async fn sale_trend(
        &self,
        apt_id: i32,
        period: Period,
        area: Option<f64>,
    ) -> Result<Vec<SaleTrendPoint>, ServiceError> {
        let keys = find_keys(&self.db, apt_id).await?;
        self.sale_trend_for(&keys, period, area).await
    }

    /// Sale series for already resolved join keys
    #[instrument(skip(self))]
    pub async fn sale_trend_for(
        &self,
        keys: &ApartmentKeys,
        period: Period,
        area: Option<f64>,
    ) -> Result<Vec<SaleTrendPoint>, ServiceError> {
        let mut query = trade::Entity::find()
            .select_only()
            .column(trade::Column::DealYear)
            .column(trade::Column::DealMonth)
            .column_as(avg_of(trade::Column::DealAmount), "avg_price")
            .column_as(Expr::col(trade::Column::Id).count(), "transaction_count")
            .filter(sales_of(keys))
            .filter(trade::Column::DealYear.gte(self.start_year(period)))
            .filter(trade::Column::DealAmount.gt(0));
        if let Some(window) = self.area_window(area) {
            query = query.filter(sale_area_within(window));
        }
        let query = query
            .group_by(trade::Column::DealYear)
            .group_by(trade::Column::DealMonth)
            .order_by_asc(trade::Column::DealYear)
            .order_by_asc(trade::Column::DealMonth)
            .into_model::<SaleMonthRow>();

        let rows = self
            .db
            .execute("sale_trend", move |pool| query.all(pool))
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| SaleTrendPoint {
                date: month_label(row.deal_year, row.deal_month),
                avg_price: round_avg(row.avg_price),
                transaction_count: row.transaction_count,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn rent_trend(
        &self,
        apt_id: i32,
        period: Period,
        rent_type: RentType,
        area: Option<f64>,
    ) -> Result<Vec<RentTrendPoint>, ServiceError> {
        let keys = find_keys(&self.db, apt_id).await?;

        let mut query = rent::Entity::find()
            .select_only()
            .column(rent::Column::DealYear)
            .column(rent::Column::DealMonth)
            .column_as(avg_of(rent::Column::Deposit), "avg_deposit")
            .column_as(avg_of(rent::Column::MonthlyRent), "avg_monthly_rent")
            .column_as(Expr::col(rent::Column::Id).count(), "transaction_count")
            .filter(rents_of(&keys))
            .filter(rent::Column::DealYear.gte(self.start_year(period)))
            .filter(rent::Column::Deposit.gt(0))
            .filter(rent_kind(rent_type));
        if let Some(window) = self.area_window(area) {
            query = query.filter(rent_area_within(window));
        }
        let query = query
            .group_by(rent::Column::DealYear)
            .group_by(rent::Column::DealMonth)
            .order_by_asc(rent::Column::DealYear)
            .order_by_asc(rent::Column::DealMonth)
            .into_model::<RentMonthRow>();

        let rows = self
            .db
            .execute("rent_trend", move |pool| query.all(pool))
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| RentTrendPoint {
                date: month_label(row.deal_year, row.deal_month),
                avg_deposit: round_avg(row.avg_deposit),
                avg_monthly_rent: round_avg(row.avg_monthly_rent),
                transaction_count: row.transaction_count,
            })
            .collect())
    }
}
