use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// District code and complex name that tie a complex to its raw
/// transaction rows. Raw tables carry no apartment id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApartmentKeys {
    pub sigungu_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    pub id: i32,
    pub apt_name: String,
    /// K-apt complex code, empty when the complex is not registered there
    pub apt_code: String,
    pub address: String,
    pub sigungu_code: String,
    pub sigungu_name: String,
    pub sido_name: String,
    pub dong_name: String,
    pub jibun: String,
    pub lat: f64,
    pub lng: f64,
    pub total_units: i32,
    pub total_buildings: i32,
    pub constructed_year: i32,
    pub constructed_month: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitsByArea {
    pub under60: i32,
    pub under85: i32,
    pub under135: i32,
    pub over135: i32,
}

/// K-apt basic information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuildingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hallway_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manage_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_by_area: Option<UnitsByArea>,
}

/// K-apt facility details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FacilityInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_total: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_ground: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_underground: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevator_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cctv_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ev_charger_ground: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ev_charger_underground: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaning_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subway_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subway_station: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subway_walk_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_walk_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welfare_facility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convenient_facility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_facility: Option<String>,
}

/// Apartment plus the optional K-apt sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentDetail {
    #[serde(flatten)]
    pub apartment: Apartment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_info: Option<BuildingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_info: Option<FacilityInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteItem {
    pub id: i32,
    pub apt_name: String,
    pub dong_name: String,
    /// "<dong> <complex name>"
    pub display_name: String,
    pub sido_name: String,
    pub sigungu_name: String,
}
