use std::sync::Arc;

use sea_orm::{ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect};
use tracing::{debug, instrument};

use super::area_grouping::{group_area_bands, latest_in_window, AreaWindow};
use super::deal_filters::{
    rent_area_within, rent_kind, rents_newest_first, rents_of, sale_area_within,
    sale_not_cancelled, sales_newest_first, sales_of,
};
use super::{find_keys, QuerySettings};
use crate::db::{DatabaseAccess, DbPool};
use crate::entities::{area_type, rent, trade};
use crate::errors::ServiceError;
use crate::models::{ApartmentKeys, AreaBand, AreaTypeView, RentType, UnitAreaRecord};

/// Area and price of one candidate deal
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct PriceCandidate {
    pub exclu_use_ar: f64,
    pub price: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Market {
    Sale,
    Jeonse,
}

impl Market {
    fn label(self) -> &'static str {
        match self {
            Market::Sale => "sale",
            Market::Jeonse => "jeonse",
        }
    }
}

/// Pyeong bands of a complex with their latest sale and jeonse prices
#[derive(Clone)]
pub struct AreaTypeService {
    db: DatabaseAccess,
    settings: QuerySettings,
}

impl AreaTypeService {
    pub fn new(db_pool: Arc<DbPool>, settings: QuerySettings) -> Self {
        Self {
            db: DatabaseAccess::new(db_pool),
            settings,
        }
    }

    /// Bands in client shape, `id` numbered from 1 in pyeong order
    #[instrument(skip(self))]
    pub async fn list_area_types(&self, apt_id: i32) -> Result<Vec<AreaTypeView>, ServiceError> {
        let bands = self.area_bands(apt_id).await?;
        Ok(bands
            .iter()
            .enumerate()
            .map(|(index, band)| AreaTypeView::from_band(apt_id, index, band))
            .collect())
    }

    /// Groups the complex's unit-area records and attaches prices.
    /// Unknown complex → `NotFound`; no records → empty list.
    #[instrument(skip(self))]
    pub async fn area_bands(&self, apt_id: i32) -> Result<Vec<AreaBand>, ServiceError> {
        let keys = find_keys(&self.db, apt_id).await?;
        let records = self.unit_area_records(apt_id).await?;
        let bands = group_area_bands(&records);
        debug!(apt_id, records = records.len(), bands = bands.len(), "Grouped unit areas");

        self.attach_prices(&keys, bands).await
    }

    async fn unit_area_records(&self, apt_id: i32) -> Result<Vec<UnitAreaRecord>, ServiceError> {
        let rows = self
            .db
            .execute("unit_area_records", |pool| {
                area_type::Entity::find()
                    .filter(area_type::Column::AptId.eq(apt_id))
                    .order_by_asc(area_type::Column::SupplyArea)
                    .all(pool)
            })
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| UnitAreaRecord {
                exclusive_area: row.exclu_area,
                supply_area: row.supply_area,
                exclusive_ratio: row.exclu_ratio,
                unit_count: row.unit_count,
            })
            .collect())
    }

    /// Sets `latest_sale_price` and `latest_jeonse_price` on each band.
    ///
    /// Candidates for all bands are fetched once over the union of the band
    /// windows. When that batch hits `price_candidate_limit` a band without a
    /// hit may still have older matches, so it gets its own single-row query.
    #[instrument(skip(self, bands), fields(bands = bands.len()))]
    pub async fn attach_prices(
        &self,
        keys: &ApartmentKeys,
        mut bands: Vec<AreaBand>,
    ) -> Result<Vec<AreaBand>, ServiceError> {
        let tolerance = self.settings.area_tolerance;
        let windows: Vec<AreaWindow> = bands
            .iter()
            .map(|band| AreaWindow::for_band(band, tolerance))
            .collect();
        let Some(span) = AreaWindow::union(windows.iter().copied()) else {
            return Ok(bands);
        };

        let limit = self.settings.price_candidate_limit;
        let (sales, jeonse) = futures::try_join!(
            self.candidates(Market::Sale, keys, span, limit),
            self.candidates(Market::Jeonse, keys, span, limit),
        )?;

        for (band, window) in bands.iter_mut().zip(windows) {
            band.latest_sale_price = self
                .pick_latest(Market::Sale, keys, &sales, window, limit)
                .await?;
            band.latest_jeonse_price = self
                .pick_latest(Market::Jeonse, keys, &jeonse, window, limit)
                .await?;
        }

        Ok(bands)
    }

    async fn pick_latest(
        &self,
        market: Market,
        keys: &ApartmentKeys,
        batch: &[PriceCandidate],
        window: AreaWindow,
        limit: u64,
    ) -> Result<Option<i64>, ServiceError> {
        if let Some(hit) = latest_in_window(batch, window, |c| c.exclu_use_ar) {
            return Ok(Some(hit.price));
        }
        if (batch.len() as u64) < limit {
            return Ok(None);
        }

        debug!(market = market.label(), ?window, "Candidate batch truncated, querying band directly");
        let single = self.candidates(market, keys, window, 1).await?;
        Ok(single.first().map(|c| c.price))
    }

    /// Newest valid deals of one market inside `window`, at most `limit`
    async fn candidates(
        &self,
        market: Market,
        keys: &ApartmentKeys,
        window: AreaWindow,
        limit: u64,
    ) -> Result<Vec<PriceCandidate>, ServiceError> {
        match market {
            Market::Sale => {
                let query = sales_newest_first(
                    trade::Entity::find()
                        .select_only()
                        .column(trade::Column::ExcluUseAr)
                        .column_as(trade::Column::DealAmount, "price")
                        .filter(sales_of(keys))
                        .filter(sale_area_within(window))
                        .filter(trade::Column::DealAmount.gt(0))
                        .filter(sale_not_cancelled()),
                )
                .limit(limit)
                .into_model::<PriceCandidate>();

                self.db
                    .execute("sale_price_candidates", move |pool| query.all(pool))
                    .await
            }
            Market::Jeonse => {
                let query = rents_newest_first(
                    rent::Entity::find()
                        .select_only()
                        .column(rent::Column::ExcluUseAr)
                        .column_as(rent::Column::Deposit, "price")
                        .filter(rents_of(keys))
                        .filter(rent_area_within(window))
                        .filter(rent_kind(RentType::Jeonse))
                        .filter(rent::Column::Deposit.gt(0)),
                )
                .limit(limit)
                .into_model::<PriceCandidate>();

                self.db
                    .execute("jeonse_price_candidates", move |pool| query.all(pool))
                    .await
            }
        }
    }
}
