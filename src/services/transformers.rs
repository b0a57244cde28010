//! Pure conversions from stored rows to client shapes.
//!
//! Every function here is total: missing optional inputs map to neutral
//! defaults and nothing touches the store.

use crate::entities::{apartment, kapt_detail, kapt_info, nearest_station, rent, trade};
use crate::models::nearby::walking_minutes;
use crate::models::{
    Apartment, ApartmentDetail, AutocompleteItem, BuildingInfo, ContractType, DealingType,
    FacilityInfo, Rent, RentType, Station, Trade, UnitsByArea,
};

/// `cdeal_type` value of a cancelled sale
pub const CANCELLED_DEAL_MARKER: &str = "해제";

const DIRECT_DEAL: &str = "직거래";
const BROKERED_DEAL: &str = "중개거래";
const NEW_CONTRACT: &str = "신규";
const RENEWED_CONTRACT: &str = "갱신";
const RENEWAL_RIGHT_USED: &str = "사용";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn positive(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v > 0)
}

/// `YYYY-MM-DD` with the day defaulting to 1
pub fn deal_date(year: i32, month: i32, day: Option<i32>) -> (String, i32) {
    let day = positive(day).unwrap_or(1);
    (format!("{}-{:02}-{:02}", year, month, day), day)
}

pub fn is_cancelled(cdeal_type: Option<&str>, cdeal_day: Option<&str>) -> bool {
    non_empty(cdeal_type) == Some(CANCELLED_DEAL_MARKER) || non_empty(cdeal_day).is_some()
}

pub fn to_apartment(apt: &apartment::Model, info: Option<&kapt_info::Model>) -> Apartment {
    let address = [
        apt.sido.as_deref(),
        apt.sigungu.as_deref(),
        Some(apt.umd_nm.as_str()),
        apt.jibun.as_deref(),
    ]
    .into_iter()
    .filter_map(non_empty)
    .collect::<Vec<_>>()
    .join(" ");

    let total_units = info
        .and_then(|i| positive(i.total_unit_cnt).or(positive(i.total_ho_cnt)))
        .unwrap_or(0);
    let total_buildings = info.and_then(|i| positive(i.total_dong_cnt)).unwrap_or(0);

    Apartment {
        id: apt.apt_id,
        apt_name: apt.apt_nm.clone(),
        apt_code: apt.kapt_code.clone().unwrap_or_default(),
        address,
        sigungu_code: apt.sigungu_cd.clone(),
        sigungu_name: apt.sigungu.clone().unwrap_or_default(),
        sido_name: apt.sido.clone().unwrap_or_default(),
        dong_name: apt.umd_nm.clone(),
        jibun: apt.jibun.clone().unwrap_or_default(),
        lat: apt.lat.unwrap_or(0.0),
        lng: apt.lng.unwrap_or(0.0),
        total_units,
        total_buildings,
        constructed_year: positive(apt.build_year).unwrap_or(0),
        constructed_month: 0,
    }
}

pub fn to_building_info(info: &kapt_info::Model) -> BuildingInfo {
    let unit_counts = [
        info.units_under_60,
        info.units_under_85,
        info.units_under_135,
        info.units_over_135,
    ];
    let units_by_area = unit_counts.iter().any(Option::is_some).then(|| UnitsByArea {
        under60: info.units_under_60.unwrap_or(0),
        under85: info.units_under_85.unwrap_or(0),
        under135: info.units_under_135.unwrap_or(0),
        over135: info.units_over_135.unwrap_or(0),
    });

    BuildingInfo {
        hallway_type: non_empty(info.hallway_type.as_deref()).map(str::to_string),
        heat_type: non_empty(info.heat_type.as_deref()).map(str::to_string),
        manage_type: non_empty(info.manage_type.as_deref()).map(str::to_string),
        build_company: non_empty(info.build_company.as_deref()).map(str::to_string),
        top_floor: info.top_floor,
        base_floor: info.base_floor,
        total_area: info.total_area,
        building_area: info.building_area,
        use_date: non_empty(info.use_date.as_deref()).map(str::to_string),
        units_by_area,
    }
}

pub fn to_facility_info(detail: &kapt_detail::Model) -> FacilityInfo {
    let text = |v: &Option<String>| non_empty(v.as_deref()).map(str::to_string);
    FacilityInfo {
        parking_total: detail.parking_total,
        parking_ground: detail.parking_ground,
        parking_underground: detail.parking_underground,
        elevator_count: detail.elevator_count,
        cctv_count: detail.cctv_count,
        ev_charger_ground: detail.ev_charger_ground,
        ev_charger_underground: detail.ev_charger_underground,
        management_company: text(&detail.management_company),
        management_count: detail.management_count,
        security_count: detail.security_count,
        cleaning_count: detail.cleaning_count,
        subway_line: text(&detail.subway_line),
        subway_station: text(&detail.subway_station),
        subway_walk_time: text(&detail.subway_walk_time),
        bus_walk_time: text(&detail.bus_walk_time),
        welfare_facility: text(&detail.welfare_facility),
        convenient_facility: text(&detail.convenient_facility),
        education_facility: text(&detail.education_facility),
    }
}

pub fn to_apartment_detail(
    apt: &apartment::Model,
    info: Option<&kapt_info::Model>,
    detail: Option<&kapt_detail::Model>,
) -> ApartmentDetail {
    ApartmentDetail {
        apartment: to_apartment(apt, info),
        building_info: info.map(to_building_info),
        facility_info: detail.map(to_facility_info),
    }
}

pub fn to_autocomplete_item(apt: &apartment::Model) -> AutocompleteItem {
    AutocompleteItem {
        id: apt.apt_id,
        apt_name: apt.apt_nm.clone(),
        dong_name: apt.umd_nm.clone(),
        display_name: format!("{} {}", apt.umd_nm, apt.apt_nm),
        sido_name: apt.sido.clone().unwrap_or_default(),
        sigungu_name: apt.sigungu.clone().unwrap_or_default(),
    }
}

pub fn to_trade(row: &trade::Model, apt_id: i32) -> Trade {
    let (deal_date, deal_day) = deal_date(row.deal_year, row.deal_month, row.deal_day);
    let dealing_type = match non_empty(row.dealing_gbn.as_deref()) {
        Some(DIRECT_DEAL) => Some(DealingType::Direct),
        Some(BROKERED_DEAL) => Some(DealingType::Agent),
        _ => None,
    };

    Trade {
        id: row.id,
        apt_id,
        deal_date,
        deal_year: row.deal_year,
        deal_month: row.deal_month,
        deal_day,
        exclusive_area: row.exclu_use_ar,
        floor: row.floor.unwrap_or(0),
        deal_amount: row.deal_amount,
        is_canceled: is_cancelled(row.cdeal_type.as_deref(), row.cdeal_day.as_deref()),
        cancel_date: non_empty(row.cdeal_day.as_deref()).map(str::to_string),
        dealing_type,
    }
}

/// Percent change with one decimal, rounding halves upward
fn change_rate(change: i64, base: i64) -> f64 {
    ((change as f64 / base as f64) * 1000.0 + 0.5).floor() / 10.0
}

pub fn to_rent(row: &rent::Model, apt_id: i32) -> Rent {
    let (deal_date, deal_day) = deal_date(row.deal_year, row.deal_month, row.deal_day);
    let contract_type = match non_empty(row.contract_type.as_deref()) {
        Some(NEW_CONTRACT) => Some(ContractType::New),
        Some(RENEWED_CONTRACT) => Some(ContractType::Renewal),
        _ => None,
    };
    let use_renewal_right =
        non_empty(row.use_rr_right.as_deref()).map(|v| v == RENEWAL_RIGHT_USED);

    let (deposit_change, deposit_change_rate) = match (contract_type, row.pre_deposit) {
        (Some(ContractType::Renewal), Some(prev)) if prev > 0 => {
            let change = row.deposit - prev;
            (Some(change), Some(change_rate(change, prev)))
        }
        _ => (None, None),
    };

    Rent {
        id: row.id,
        apt_id,
        deal_date,
        deal_year: row.deal_year,
        deal_month: row.deal_month,
        deal_day,
        exclusive_area: row.exclu_use_ar,
        floor: row.floor.unwrap_or(0),
        rent_type: RentType::of(row.monthly_rent),
        deposit: row.deposit,
        monthly_rent: row.monthly_rent,
        contract_type,
        contract_period: non_empty(row.contract_term.as_deref()).map(str::to_string),
        use_renewal_right,
        prev_deposit: row.pre_deposit,
        prev_monthly_rent: row.pre_monthly_rent,
        deposit_change,
        deposit_change_rate,
    }
}

pub fn to_station(row: &nearest_station::Model) -> Station {
    let distance = row.distance_m.unwrap_or(0.0);
    Station {
        apt_id: row.apt_id,
        station_name: row.station_name.clone().unwrap_or_default(),
        line_name: row.line_name.clone().unwrap_or_default(),
        distance,
        walking_minutes: walking_minutes(distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apt() -> apartment::Model {
        apartment::Model {
            apt_id: 11,
            apt_nm: "래미안대치팰리스".into(),
            kapt_code: None,
            sigungu_cd: "11680".into(),
            sido: Some("서울특별시".into()),
            sigungu: Some("강남구".into()),
            umd_nm: "대치동".into(),
            jibun: Some("".into()),
            lat: None,
            lng: Some(127.06),
            build_year: Some(2015),
            trade_count: Some(120),
        }
    }

    fn info() -> kapt_info::Model {
        kapt_info::Model {
            apt_id: 11,
            total_unit_cnt: Some(0),
            total_ho_cnt: Some(1278),
            total_dong_cnt: Some(17),
            hallway_type: Some("계단식".into()),
            heat_type: None,
            manage_type: Some(" ".into()),
            build_company: None,
            top_floor: Some(35),
            base_floor: None,
            total_area: None,
            building_area: None,
            use_date: None,
            units_under_60: None,
            units_under_85: Some(600),
            units_under_135: None,
            units_over_135: None,
        }
    }

    fn trade_row() -> trade::Model {
        trade::Model {
            id: 1,
            sigungu_cd: "11680".into(),
            apt_nm: "래미안대치팰리스".into(),
            deal_year: 2024,
            deal_month: 3,
            deal_day: None,
            exclu_use_ar: 84.97,
            floor: None,
            deal_amount: 285_000,
            cdeal_type: None,
            cdeal_day: None,
            dealing_gbn: Some("중개거래".into()),
        }
    }

    fn rent_row() -> rent::Model {
        rent::Model {
            id: 5,
            sigungu_cd: "11680".into(),
            apt_nm: "래미안대치팰리스".into(),
            deal_year: 2024,
            deal_month: 11,
            deal_day: Some(7),
            exclu_use_ar: 84.97,
            floor: Some(12),
            deposit: 105_000,
            monthly_rent: 0,
            contract_type: Some("갱신".into()),
            contract_term: Some("24.12~26.12".into()),
            use_rr_right: Some("사용".into()),
            pre_deposit: Some(100_000),
            pre_monthly_rent: Some(0),
        }
    }

    #[test]
    fn apartment_address_skips_blank_parts() {
        let out = to_apartment(&apt(), None);
        assert_eq!(out.address, "서울특별시 강남구 대치동");
        assert_eq!(out.apt_code, "");
        assert_eq!(out.lat, 0.0);
        assert_eq!(out.lng, 127.06);
        assert_eq!(out.total_units, 0);
        assert_eq!(out.constructed_year, 2015);
    }

    #[test]
    fn apartment_units_fall_back_to_household_count() {
        let out = to_apartment(&apt(), Some(&info()));
        assert_eq!(out.total_units, 1278);
        assert_eq!(out.total_buildings, 17);
    }

    #[test]
    fn building_info_drops_blank_text_and_fills_unit_buckets() {
        let building = to_building_info(&info());
        assert_eq!(building.hallway_type.as_deref(), Some("계단식"));
        assert_eq!(building.manage_type, None);
        let units = building.units_by_area.unwrap();
        assert_eq!(units.under85, 600);
        assert_eq!(units.under60, 0);
    }

    #[test]
    fn autocomplete_display_name_is_dong_then_name() {
        let item = to_autocomplete_item(&apt());
        assert_eq!(item.display_name, "대치동 래미안대치팰리스");
        assert_eq!(item.sigungu_name, "강남구");
    }

    #[test]
    fn trade_defaults_day_and_floor() {
        let out = to_trade(&trade_row(), 11);
        assert_eq!(out.deal_date, "2024-03-01");
        assert_eq!(out.deal_day, 1);
        assert_eq!(out.floor, 0);
        assert!(!out.is_canceled);
        assert_eq!(out.dealing_type, Some(DealingType::Agent));
    }

    #[test]
    fn trade_cancellation_from_marker_or_date() {
        let mut row = trade_row();
        row.cdeal_type = Some("해제".into());
        assert!(to_trade(&row, 11).is_canceled);

        let mut row = trade_row();
        row.cdeal_day = Some("24.04.02".into());
        let out = to_trade(&row, 11);
        assert!(out.is_canceled);
        assert_eq!(out.cancel_date.as_deref(), Some("24.04.02"));

        let mut row = trade_row();
        row.cdeal_day = Some("   ".into());
        assert!(!to_trade(&row, 11).is_canceled);
    }

    #[test]
    fn direct_deal_maps_to_direct() {
        let mut row = trade_row();
        row.dealing_gbn = Some("직거래".into());
        assert_eq!(to_trade(&row, 11).dealing_type, Some(DealingType::Direct));
        row.dealing_gbn = Some("-".into());
        assert_eq!(to_trade(&row, 11).dealing_type, None);
    }

    #[test]
    fn renewal_rent_reports_deposit_change() {
        let out = to_rent(&rent_row(), 11);
        assert_eq!(out.rent_type, RentType::Jeonse);
        assert_eq!(out.contract_type, Some(ContractType::Renewal));
        assert_eq!(out.use_renewal_right, Some(true));
        assert_eq!(out.deposit_change, Some(5_000));
        assert_eq!(out.deposit_change_rate, Some(5.0));
        assert_eq!(out.deal_date, "2024-11-07");
    }

    #[test]
    fn deposit_change_rate_rounds_to_one_decimal() {
        let mut row = rent_row();
        row.pre_deposit = Some(30_000);
        row.deposit = 31_000;
        assert_eq!(to_rent(&row, 11).deposit_change_rate, Some(3.3));

        row.deposit = 29_000;
        assert_eq!(to_rent(&row, 11).deposit_change_rate, Some(-3.3));
    }

    #[test]
    fn new_contract_has_no_deposit_change() {
        let mut row = rent_row();
        row.contract_type = Some("신규".into());
        row.monthly_rent = 80;
        let out = to_rent(&row, 11);
        assert_eq!(out.rent_type, RentType::Monthly);
        assert_eq!(out.contract_type, Some(ContractType::New));
        assert_eq!(out.deposit_change, None);
        assert_eq!(out.deposit_change_rate, None);
    }

    #[test]
    fn renewal_without_previous_deposit_has_no_change() {
        let mut row = rent_row();
        row.pre_deposit = Some(0);
        assert_eq!(to_rent(&row, 11).deposit_change, None);
        row.pre_deposit = None;
        assert_eq!(to_rent(&row, 11).deposit_change, None);
    }

    #[test]
    fn station_walking_minutes() {
        let row = nearest_station::Model {
            apt_id: 11,
            station_name: Some("대치".into()),
            line_name: None,
            distance_m: Some(450.0),
        };
        let out = to_station(&row);
        assert_eq!(out.walking_minutes, 6);
        assert_eq!(out.line_name, "");

        let row = nearest_station::Model {
            distance_m: None,
            ..row
        };
        assert_eq!(to_station(&row).walking_minutes, 0);
    }
}
