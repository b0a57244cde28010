use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use super::apartments::ApartmentService;
use super::trends::TrendService;
use crate::errors::ServiceError;
use crate::models::{ApartmentDetail, ApartmentKeys, Period, SaleTrendPoint, Station};

/// Most complexes that can be compared at once
pub const MAX_COMPARE: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompareEntry {
    pub apartment: ApartmentDetail,
    pub station: Option<Station>,
    pub price_trend: Vec<SaleTrendPoint>,
}

/// Parses `1,2,3` into distinct positive ids, keeping their order
pub fn parse_compare_ids(raw: &str) -> Result<Vec<i32>, ServiceError> {
    let mut ids: Vec<i32> = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = part
            .parse::<i32>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| ServiceError::InvalidInput(format!("invalid apartment id: {}", part)))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if ids.is_empty() || ids.len() > MAX_COMPARE {
        return Err(ServiceError::InvalidInput(format!(
            "between 1 and {} apartment ids are required",
            MAX_COMPARE
        )));
    }
    Ok(ids)
}

/// Side-by-side view of up to four complexes
#[derive(Clone)]
pub struct CompareService {
    apartments: ApartmentService,
    trends: TrendService,
}

impl CompareService {
    pub fn new(apartments: ApartmentService, trends: TrendService) -> Self {
        Self { apartments, trends }
    }

    /// One entry per id in request order; any unknown id fails the whole call
    #[instrument(skip(self))]
    pub async fn compare(
        &self,
        ids: &[i32],
        period: Period,
    ) -> Result<Vec<CompareEntry>, ServiceError> {
        try_join_all(ids.iter().map(|&id| self.entry(id, period))).await
    }

    async fn entry(&self, apt_id: i32, period: Period) -> Result<CompareEntry, ServiceError> {
        let apartment = self.apartments.get_detail(apt_id).await?;
        let keys = ApartmentKeys {
            sigungu_code: apartment.apartment.sigungu_code.clone(),
            name: apartment.apartment.apt_name.clone(),
        };

        let (station, price_trend) = futures::try_join!(
            self.apartments.nearest_station(apt_id),
            self.trends.sale_trend_for(&keys, period, None),
        )?;

        Ok(CompareEntry {
            apartment,
            station,
            price_trend,
        })
    }
}
