use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Look-back window for trend queries
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, Display, AsRefStr,
)]
pub enum Period {
    #[strum(serialize = "1y")]
    #[serde(rename = "1y")]
    OneYear,
    #[strum(serialize = "3y")]
    #[serde(rename = "3y")]
    #[default]
    ThreeYears,
    #[strum(serialize = "5y")]
    #[serde(rename = "5y")]
    FiveYears,
    #[strum(serialize = "all")]
    #[serde(rename = "all")]
    All,
}

impl Period {
    /// Missing → 3y, unrecognized → all
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Period::default(),
            Some(s) => s.parse().unwrap_or(Period::All),
        }
    }

    /// Earliest deal year included for a query made in `current_year`
    pub fn start_year(self, current_year: i32, dataset_start_year: i32) -> i32 {
        match self {
            Period::OneYear => current_year - 1,
            Period::ThreeYears => current_year - 3,
            Period::FiveYears => current_year - 5,
            Period::All => dataset_start_year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleTrendPoint {
    /// YYYY-MM
    pub date: String,
    pub avg_price: i64,
    pub transaction_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentTrendPoint {
    pub date: String,
    pub avg_deposit: i64,
    pub avg_monthly_rent: i64,
    pub transaction_count: i64,
}

pub fn month_label(year: i32, month: i32) -> String {
    format!("{}-{:02}", year, month)
}
