//! Optional search filters parsed once from query parameters.

use crate::errors::ServiceError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Completion-year bucket. Bounds are `[lower, upper)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, EnumIter, Display, AsRefStr,
)]
pub enum YearBuiltRange {
    #[strum(serialize = "~1990")]
    #[serde(rename = "~1990")]
    Before1990,
    #[strum(serialize = "1990s")]
    #[serde(rename = "1990s")]
    Nineties,
    #[strum(serialize = "2000s")]
    #[serde(rename = "2000s")]
    TwoThousands,
    #[strum(serialize = "2010s")]
    #[serde(rename = "2010s")]
    TwentyTens,
    #[strum(serialize = "2020~")]
    #[serde(rename = "2020~")]
    Since2020,
}

impl YearBuiltRange {
    pub fn bounds(self) -> (Option<i32>, Option<i32>) {
        match self {
            YearBuiltRange::Before1990 => (None, Some(1990)),
            YearBuiltRange::Nineties => (Some(1990), Some(2000)),
            YearBuiltRange::TwoThousands => (Some(2000), Some(2010)),
            YearBuiltRange::TwentyTens => (Some(2010), Some(2020)),
            YearBuiltRange::Since2020 => (Some(2020), None),
        }
    }
}

/// Household-count bucket. Bounds are `[lower, upper)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, EnumIter, Display, AsRefStr,
)]
pub enum UnitsRange {
    #[strum(serialize = "~100")]
    #[serde(rename = "~100")]
    Under100,
    #[strum(serialize = "100~300")]
    #[serde(rename = "100~300")]
    From100To300,
    #[strum(serialize = "300~500")]
    #[serde(rename = "300~500")]
    From300To500,
    #[strum(serialize = "500~1000")]
    #[serde(rename = "500~1000")]
    From500To1000,
    #[strum(serialize = "1000~2000")]
    #[serde(rename = "1000~2000")]
    From1000To2000,
    #[strum(serialize = "2000~")]
    #[serde(rename = "2000~")]
    Over2000,
}

impl UnitsRange {
    pub fn bounds(self) -> (Option<i32>, Option<i32>) {
        match self {
            UnitsRange::Under100 => (None, Some(100)),
            UnitsRange::From100To300 => (Some(100), Some(300)),
            UnitsRange::From300To500 => (Some(300), Some(500)),
            UnitsRange::From500To1000 => (Some(500), Some(1000)),
            UnitsRange::From1000To2000 => (Some(1000), Some(2000)),
            UnitsRange::Over2000 => (Some(2000), None),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, EnumIter, Display, AsRefStr,
)]
pub enum HallwayType {
    #[strum(serialize = "계단식")]
    #[serde(rename = "계단식")]
    Staircase,
    #[strum(serialize = "복도식")]
    #[serde(rename = "복도식")]
    Corridor,
    #[strum(serialize = "혼합식")]
    #[serde(rename = "혼합식")]
    Mixed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub year_built: Option<YearBuiltRange>,
    pub units: Option<UnitsRange>,
    pub hallway_type: Option<HallwayType>,
}

fn parse_option<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>, ServiceError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ServiceError::InvalidInput(format!("unknown {} option: {}", name, value))),
    }
}

impl SearchFilters {
    /// Empty values are treated as absent; unknown values are rejected.
    pub fn parse(
        year_built: Option<&str>,
        units: Option<&str>,
        hallway_type: Option<&str>,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            year_built: parse_option("yearBuilt", year_built)?,
            units: parse_option("units", units)?,
            hallway_type: parse_option("hallwayType", hallway_type)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.year_built.is_none() && self.units.is_none() && self.hallway_type.is_none()
    }
}
