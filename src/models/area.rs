use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One unit-area record as read from the store, before grouping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitAreaRecord {
    pub exclusive_area: f64,
    pub supply_area: f64,
    /// Percent; `None` or ≤ 0 means unknown
    pub exclusive_ratio: Option<f64>,
    pub unit_count: Option<i32>,
}

/// Unit-area records of a complex grouped by pyeong.
///
/// Areas are kept exact; display rounding happens in [`AreaTypeView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBand {
    pub pyeong: i32,
    pub exclusive_area_min: f64,
    pub exclusive_area_max: f64,
    pub supply_area_min: f64,
    pub supply_area_max: f64,
    pub total_units: i64,
    /// Mean of the known ratios rounded to one decimal
    pub avg_exclusive_ratio: Option<f64>,
    pub latest_sale_price: Option<i64>,
    pub latest_jeonse_price: Option<i64>,
}

/// Client shape of an [`AreaBand`].
///
/// The representative area is the floored minimum. The exact min/max are
/// only present when flooring would hide a spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AreaTypeView {
    /// 1-based position in ascending pyeong order
    pub id: i32,
    pub apt_id: i32,
    pub pyeong: i32,
    pub exclusive_area: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_area_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_area_max: Option<f64>,
    pub supply_area: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply_area_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supply_area_max: Option<f64>,
    pub units: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jeonse_price: Option<i64>,
}

fn spread(min: f64, max: f64) -> (i64, Option<f64>, Option<f64>) {
    let min_floor = min.floor() as i64;
    if min_floor != max.floor() as i64 {
        (min_floor, Some(min), Some(max))
    } else {
        (min_floor, None, None)
    }
}

impl AreaTypeView {
    pub fn from_band(apt_id: i32, index: usize, band: &AreaBand) -> Self {
        let (exclusive_area, exclusive_area_min, exclusive_area_max) =
            spread(band.exclusive_area_min, band.exclusive_area_max);
        let (supply_area, supply_area_min, supply_area_max) =
            spread(band.supply_area_min, band.supply_area_max);

        Self {
            id: index as i32 + 1,
            apt_id,
            pyeong: band.pyeong,
            exclusive_area,
            exclusive_area_min,
            exclusive_area_max,
            supply_area,
            supply_area_min,
            supply_area_max,
            units: band.total_units,
            exclusive_ratio: band.avg_exclusive_ratio,
            trade_price: band.latest_sale_price,
            jeonse_price: band.latest_jeonse_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(exclusive: (f64, f64), supply: (f64, f64)) -> AreaBand {
        AreaBand {
            pyeong: 25,
            exclusive_area_min: exclusive.0,
            exclusive_area_max: exclusive.1,
            supply_area_min: supply.0,
            supply_area_max: supply.1,
            total_units: 120,
            avg_exclusive_ratio: Some(76.4),
            latest_sale_price: Some(120_000),
            latest_jeonse_price: None,
        }
    }

    #[test]
    fn same_floor_hides_range() {
        let view = AreaTypeView::from_band(9, 0, &band((84.1, 84.9), (110.2, 110.7)));
        assert_eq!(view.id, 1);
        assert_eq!(view.exclusive_area, 84);
        assert_eq!(view.exclusive_area_min, None);
        assert_eq!(view.supply_area, 110);
        assert_eq!(view.supply_area_max, None);
    }

    #[test]
    fn different_floor_exposes_exact_range() {
        let view = AreaTypeView::from_band(9, 2, &band((59.5, 62.3), (82.0, 82.5)));
        assert_eq!(view.id, 3);
        assert_eq!(view.exclusive_area, 59);
        assert_eq!(view.exclusive_area_min, Some(59.5));
        assert_eq!(view.exclusive_area_max, Some(62.3));
        assert_eq!(view.supply_area_min, None);
    }

    #[test]
    fn absent_prices_are_omitted_from_json() {
        let view = AreaTypeView::from_band(9, 0, &band((84.1, 84.9), (110.2, 110.7)));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["tradePrice"], 120_000);
        assert!(json.get("jeonsePrice").is_none());
    }
}
