use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Assumed walking speed in meters per minute
pub const WALKING_METERS_PER_MINUTE: f64 = 80.0;

/// Whole minutes needed to walk `distance_m`, 0 for unknown or zero distance
pub fn walking_minutes(distance_m: f64) -> i64 {
    if distance_m > 0.0 {
        (distance_m / WALKING_METERS_PER_MINUTE).ceil() as i64
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub apt_id: i32,
    pub station_name: String,
    pub line_name: String,
    /// Meters
    pub distance: f64,
    pub walking_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SchoolLevel {
    Elementary,
    Middle,
    High,
}

impl SchoolLevel {
    /// School type label used in the school registry
    pub fn registry_label(self) -> &'static str {
        match self {
            SchoolLevel::Elementary => "초등학교",
            SchoolLevel::Middle => "중학교",
            SchoolLevel::High => "고등학교",
        }
    }

    pub fn from_registry_label(label: &str) -> Option<Self> {
        match label.trim() {
            "초등학교" => Some(SchoolLevel::Elementary),
            "중학교" => Some(SchoolLevel::Middle),
            "고등학교" => Some(SchoolLevel::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolItem {
    pub school_name: String,
    pub school_type: SchoolLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_kind: Option<String>,
    /// Whole meters
    pub distance: i64,
    pub walking_minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_count: Option<i32>,
    pub is_assigned: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_elementary: Option<SchoolItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_zone_name: Option<String>,
    pub nearby_middle: Vec<SchoolItem>,
    pub nearby_high: Vec<SchoolItem>,
}
