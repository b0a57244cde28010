//! Groups a complex's unit-area records into pyeong bands and matches
//! transaction areas against those bands.

use crate::models::{AreaBand, UnitAreaRecord};
use std::collections::BTreeMap;

/// Square meters per pyeong
pub const SQM_PER_PYEONG: f64 = 3.3;

/// Records at or above this exclusive ratio (%) are treated as
/// non-residential and left out of every band.
pub const NON_RESIDENTIAL_RATIO: f64 = 95.0;

/// Pyeong size of a supply area, truncated
pub fn pyeong_of(supply_area: f64) -> i32 {
    (supply_area / SQM_PER_PYEONG).floor() as i32
}

#[derive(Debug)]
struct BandAccumulator {
    exclusive_min: f64,
    exclusive_max: f64,
    supply_min: f64,
    supply_max: f64,
    units: i64,
    ratio_sum: f64,
    ratio_count: u32,
}

impl BandAccumulator {
    fn new(record: &UnitAreaRecord) -> Self {
        Self {
            exclusive_min: record.exclusive_area,
            exclusive_max: record.exclusive_area,
            supply_min: record.supply_area,
            supply_max: record.supply_area,
            units: 0,
            ratio_sum: 0.0,
            ratio_count: 0,
        }
    }

    fn add(&mut self, record: &UnitAreaRecord, ratio: f64) {
        self.exclusive_min = self.exclusive_min.min(record.exclusive_area);
        self.exclusive_max = self.exclusive_max.max(record.exclusive_area);
        self.supply_min = self.supply_min.min(record.supply_area);
        self.supply_max = self.supply_max.max(record.supply_area);
        self.units += i64::from(record.unit_count.unwrap_or(0).max(0));
        if ratio > 0.0 {
            self.ratio_sum += ratio;
            self.ratio_count += 1;
        }
    }

    fn into_band(self, pyeong: i32) -> AreaBand {
        let avg_exclusive_ratio = (self.ratio_count > 0)
            .then(|| (self.ratio_sum / f64::from(self.ratio_count) * 10.0).round() / 10.0);

        AreaBand {
            pyeong,
            exclusive_area_min: self.exclusive_min,
            exclusive_area_max: self.exclusive_max,
            supply_area_min: self.supply_min,
            supply_area_max: self.supply_max,
            total_units: self.units,
            avg_exclusive_ratio,
            latest_sale_price: None,
            latest_jeonse_price: None,
        }
    }
}

/// Groups records by pyeong, returning bands in ascending pyeong order.
///
/// Non-residential records and records with non-finite areas are skipped.
/// Prices are left unset.
pub fn group_area_bands(records: &[UnitAreaRecord]) -> Vec<AreaBand> {
    let mut groups: BTreeMap<i32, BandAccumulator> = BTreeMap::new();

    for record in records {
        if !record.exclusive_area.is_finite() || !record.supply_area.is_finite() {
            continue;
        }
        let ratio = record.exclusive_ratio.filter(|r| r.is_finite()).unwrap_or(0.0);
        if ratio >= NON_RESIDENTIAL_RATIO {
            continue;
        }

        groups
            .entry(pyeong_of(record.supply_area))
            .or_insert_with(|| BandAccumulator::new(record))
            .add(record, ratio);
    }

    groups
        .into_iter()
        .map(|(pyeong, acc)| acc.into_band(pyeong))
        .collect()
}

/// Closed interval of exclusive areas, in m²
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaWindow {
    pub min: f64,
    pub max: f64,
}

impl AreaWindow {
    /// `[area - tolerance, area + tolerance]`
    pub fn around(area: f64, tolerance: f64) -> Self {
        Self {
            min: area - tolerance,
            max: area + tolerance,
        }
    }

    /// `[band min - tolerance, band max + tolerance]`
    pub fn for_band(band: &AreaBand, tolerance: f64) -> Self {
        Self {
            min: band.exclusive_area_min - tolerance,
            max: band.exclusive_area_max + tolerance,
        }
    }

    pub fn contains(&self, area: f64) -> bool {
        area >= self.min && area <= self.max
    }

    /// Smallest window covering all of `windows`
    pub fn union<I: IntoIterator<Item = AreaWindow>>(windows: I) -> Option<Self> {
        windows.into_iter().reduce(|acc, w| Self {
            min: acc.min.min(w.min),
            max: acc.max.max(w.max),
        })
    }
}

/// First row whose area falls inside `window`. `rows` must already be
/// ordered newest first.
pub fn latest_in_window<T>(
    rows: &[T],
    window: AreaWindow,
    area_of: impl Fn(&T) -> f64,
) -> Option<&T> {
    rows.iter().find(|row| window.contains(area_of(row)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(exclusive: f64, supply: f64, ratio: Option<f64>, units: Option<i32>) -> UnitAreaRecord {
        UnitAreaRecord {
            exclusive_area: exclusive,
            supply_area: supply,
            exclusive_ratio: ratio,
            unit_count: units,
        }
    }

    #[test]
    fn pyeong_is_truncated() {
        assert_eq!(pyeong_of(84.9), 25);
        assert_eq!(pyeong_of(59.9), 18);
        assert_eq!(pyeong_of(112.4), 34);
        assert_eq!(pyeong_of(3.29), 0);
    }

    #[test]
    fn records_in_same_pyeong_merge_into_one_band() {
        let records = [
            record(59.97, 84.1, Some(71.3), Some(100)),
            record(59.8, 84.6, Some(70.7), Some(50)),
            record(60.1, 84.9, None, None),
        ];
        let bands = group_area_bands(&records);
        assert_eq!(bands.len(), 1);

        let band = &bands[0];
        assert_eq!(band.pyeong, 25);
        assert_eq!(band.exclusive_area_min, 59.8);
        assert_eq!(band.exclusive_area_max, 60.1);
        assert_eq!(band.supply_area_min, 84.1);
        assert_eq!(band.supply_area_max, 84.9);
        assert_eq!(band.total_units, 150);
        assert_eq!(band.avg_exclusive_ratio, Some(71.0));
        assert_eq!(band.latest_sale_price, None);
    }

    #[test]
    fn non_residential_records_are_excluded() {
        let records = [
            record(30.0, 31.0, Some(96.8), Some(20)),
            record(30.0, 31.0, Some(95.0), Some(5)),
            record(84.9, 112.4, Some(75.5), Some(300)),
        ];
        let bands = group_area_bands(&records);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].pyeong, 34);
        assert_eq!(bands[0].total_units, 300);
    }

    #[test]
    fn zero_or_missing_ratio_is_kept_but_not_averaged() {
        let records = [
            record(84.0, 110.0, Some(0.0), Some(10)),
            record(84.0, 110.5, None, Some(10)),
        ];
        let bands = group_area_bands(&records);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].total_units, 20);
        assert_eq!(bands[0].avg_exclusive_ratio, None);
    }

    #[test]
    fn bands_come_out_in_ascending_pyeong() {
        let records = [
            record(114.0, 145.0, None, Some(1)),
            record(59.0, 80.0, None, Some(1)),
            record(84.0, 110.0, None, Some(1)),
        ];
        let pyeongs: Vec<i32> = group_area_bands(&records).iter().map(|b| b.pyeong).collect();
        assert_eq!(pyeongs, vec![24, 33, 43]);
    }

    #[test]
    fn empty_input_yields_no_bands() {
        assert!(group_area_bands(&[]).is_empty());
    }

    #[test]
    fn ratio_average_rounds_to_one_decimal() {
        let records = [
            record(84.0, 110.0, Some(76.44), None),
            record(84.0, 110.0, Some(76.47), None),
        ];
        assert_eq!(group_area_bands(&records)[0].avg_exclusive_ratio, Some(76.5));
    }

    #[test]
    fn window_contains_edges() {
        let window = AreaWindow::around(84.0, 1.0);
        assert!(window.contains(83.0));
        assert!(window.contains(85.0));
        assert!(!window.contains(85.01));
    }

    #[test]
    fn union_spans_all_windows() {
        let union = AreaWindow::union([
            AreaWindow { min: 58.0, max: 61.0 },
            AreaWindow { min: 83.0, max: 86.0 },
        ])
        .unwrap();
        assert_eq!(union, AreaWindow { min: 58.0, max: 86.0 });
        assert!(AreaWindow::union(Vec::new()).is_none());
    }

    #[test]
    fn latest_in_window_takes_first_match() {
        let rows = [(85.5, 300), (84.9, 290), (84.7, 280)];
        let window = AreaWindow { min: 83.0, max: 85.0 };
        let hit = latest_in_window(&rows, window, |r| r.0).unwrap();
        assert_eq!(hit.1, 290);
        assert!(latest_in_window(&rows, AreaWindow { min: 10.0, max: 20.0 }, |r| r.0).is_none());
    }
}
