#![allow(dead_code)]

use std::sync::Arc;

use apt_explorer_api::{
    app_router,
    config::AppConfig,
    db,
    entities::{
        apartment, area_type, assigned_school, kapt_detail, kapt_info, nearest_station, rent,
        school, trade,
    },
    AppState,
};
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use chrono::Datelike;
use sea_orm::{
    ConnectionTrait, DatabaseBackend as DbBackend, DatabaseConnection, EntityTrait,
    IntoActiveModel, Statement,
};
use serde_json::Value;
use tower::ServiceExt;

/// Sigungu code every fixture complex lives in
pub const GANGNAM: &str = "11680";

const SCHEMA: [&str; 9] = [
    r#"CREATE TABLE IF NOT EXISTS apt_master (
        apt_id INTEGER PRIMARY KEY NOT NULL,
        apt_nm TEXT NOT NULL,
        kapt_code TEXT,
        sigungu_cd TEXT NOT NULL,
        sido TEXT,
        sigungu TEXT,
        umd_nm TEXT NOT NULL,
        jibun TEXT,
        lat REAL,
        lng REAL,
        build_year INTEGER,
        trade_count INTEGER
    );"#,
    r#"CREATE TABLE IF NOT EXISTS raw_kapt_info (
        apt_id INTEGER PRIMARY KEY NOT NULL,
        total_unit_cnt INTEGER,
        total_ho_cnt INTEGER,
        total_dong_cnt INTEGER,
        hallway_type TEXT,
        heat_type TEXT,
        manage_type TEXT,
        build_company TEXT,
        top_floor INTEGER,
        base_floor INTEGER,
        total_area REAL,
        building_area REAL,
        use_date TEXT,
        units_under_60 INTEGER,
        units_under_85 INTEGER,
        units_under_135 INTEGER,
        units_over_135 INTEGER
    );"#,
    r#"CREATE TABLE IF NOT EXISTS raw_kapt_detail (
        apt_id INTEGER PRIMARY KEY NOT NULL,
        parking_total INTEGER,
        parking_ground INTEGER,
        parking_underground INTEGER,
        elevator_count INTEGER,
        cctv_count INTEGER,
        ev_charger_ground INTEGER,
        ev_charger_underground INTEGER,
        management_company TEXT,
        management_count INTEGER,
        security_count INTEGER,
        cleaning_count INTEGER,
        subway_line TEXT,
        subway_station TEXT,
        subway_walk_time TEXT,
        bus_walk_time TEXT,
        welfare_facility TEXT,
        convenient_facility TEXT,
        education_facility TEXT
    );"#,
    r#"CREATE TABLE IF NOT EXISTS apt_area_types (
        id INTEGER PRIMARY KEY NOT NULL,
        apt_id INTEGER NOT NULL,
        exclu_area REAL NOT NULL,
        supply_area REAL NOT NULL,
        exclu_ratio REAL,
        unit_count INTEGER
    );"#,
    r#"CREATE TABLE IF NOT EXISTS raw_trades (
        id INTEGER PRIMARY KEY NOT NULL,
        sigungu_cd TEXT NOT NULL,
        apt_nm TEXT NOT NULL,
        deal_year INTEGER NOT NULL,
        deal_month INTEGER NOT NULL,
        deal_day INTEGER,
        exclu_use_ar REAL NOT NULL,
        floor INTEGER,
        deal_amount INTEGER NOT NULL,
        cdeal_type TEXT,
        cdeal_day TEXT,
        dealing_gbn TEXT
    );"#,
    r#"CREATE TABLE IF NOT EXISTS raw_rents (
        id INTEGER PRIMARY KEY NOT NULL,
        sigungu_cd TEXT NOT NULL,
        apt_nm TEXT NOT NULL,
        deal_year INTEGER NOT NULL,
        deal_month INTEGER NOT NULL,
        deal_day INTEGER,
        exclu_use_ar REAL NOT NULL,
        floor INTEGER,
        deposit INTEGER NOT NULL,
        monthly_rent INTEGER NOT NULL,
        contract_type TEXT,
        contract_term TEXT,
        use_rr_right TEXT,
        pre_deposit INTEGER,
        pre_monthly_rent INTEGER
    );"#,
    r#"CREATE TABLE IF NOT EXISTS apt_nearest_station (
        apt_id INTEGER PRIMARY KEY NOT NULL,
        station_name TEXT,
        line_name TEXT,
        distance_m REAL
    );"#,
    r#"CREATE TABLE IF NOT EXISTS apt_assigned_school (
        apt_id INTEGER PRIMARY KEY NOT NULL,
        elementary_school_name TEXT,
        middle_zone_name TEXT
    );"#,
    r#"CREATE TABLE IF NOT EXISTS raw_schools (
        id INTEGER PRIMARY KEY NOT NULL,
        school_name TEXT NOT NULL,
        school_type TEXT NOT NULL,
        school_kind TEXT,
        lat REAL,
        lng REAL,
        student_count INTEGER
    );"#,
];

/// Helper harness for spinning up the application against an in-memory SQLite store.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Test application with configuration tweaks applied before services are built.
    pub async fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        // one connection keeps every query on the same in-memory database
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        tweak(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        for sql in SCHEMA {
            pool.execute(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
                .await
                .expect("create fixture table");
        }

        let state = AppState::new(Arc::new(pool), cfg);
        let router = app_router(state.clone());

        Self { router, state }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// GET returning status, headers and the parsed JSON body
    pub async fn get_json(&self, uri: &str) -> (StatusCode, HeaderMap, Value) {
        let response = self.get(uri).await;
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read response body");
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, headers, json)
    }

    pub async fn seed_apartments(&self, rows: Vec<apartment::Model>) {
        apartment::Entity::insert_many(rows.into_iter().map(IntoActiveModel::into_active_model))
            .exec(self.db())
            .await
            .expect("seed apartments");
    }

    pub async fn seed_kapt_info(&self, row: kapt_info::Model) {
        kapt_info::Entity::insert(row.into_active_model())
            .exec(self.db())
            .await
            .expect("seed kapt info");
    }

    pub async fn seed_kapt_detail(&self, row: kapt_detail::Model) {
        kapt_detail::Entity::insert(row.into_active_model())
            .exec(self.db())
            .await
            .expect("seed kapt detail");
    }

    pub async fn seed_area_types(&self, rows: Vec<area_type::Model>) {
        area_type::Entity::insert_many(rows.into_iter().map(IntoActiveModel::into_active_model))
            .exec(self.db())
            .await
            .expect("seed area types");
    }

    pub async fn seed_trades(&self, rows: Vec<trade::Model>) {
        trade::Entity::insert_many(rows.into_iter().map(IntoActiveModel::into_active_model))
            .exec(self.db())
            .await
            .expect("seed trades");
    }

    pub async fn seed_rents(&self, rows: Vec<rent::Model>) {
        rent::Entity::insert_many(rows.into_iter().map(IntoActiveModel::into_active_model))
            .exec(self.db())
            .await
            .expect("seed rents");
    }

    pub async fn seed_station(&self, row: nearest_station::Model) {
        nearest_station::Entity::insert(row.into_active_model())
            .exec(self.db())
            .await
            .expect("seed station");
    }

    pub async fn seed_assigned_school(&self, row: assigned_school::Model) {
        assigned_school::Entity::insert(row.into_active_model())
            .exec(self.db())
            .await
            .expect("seed assigned school");
    }

    pub async fn seed_schools(&self, rows: Vec<school::Model>) {
        school::Entity::insert_many(rows.into_iter().map(IntoActiveModel::into_active_model))
            .exec(self.db())
            .await
            .expect("seed schools");
    }
}

pub fn this_year() -> i32 {
    chrono::Local::now().year()
}

pub fn apartment(apt_id: i32, name: &str, dong: &str, trade_count: i32) -> apartment::Model {
    apartment::Model {
        apt_id,
        apt_nm: name.to_string(),
        kapt_code: Some(format!("A{}", apt_id)),
        sigungu_cd: GANGNAM.to_string(),
        sido: Some("서울특별시".to_string()),
        sigungu: Some("강남구".to_string()),
        umd_nm: dong.to_string(),
        jibun: Some(format!("{}-1", apt_id)),
        lat: Some(37.4946),
        lng: Some(127.0634),
        build_year: Some(2015),
        trade_count: Some(trade_count),
    }
}

pub fn kapt_info(apt_id: i32, units: i32, hallway: &str) -> kapt_info::Model {
    kapt_info::Model {
        apt_id,
        total_unit_cnt: Some(units),
        total_ho_cnt: None,
        total_dong_cnt: Some(9),
        hallway_type: Some(hallway.to_string()),
        heat_type: Some("지역난방".to_string()),
        manage_type: None,
        build_company: Some("삼성물산".to_string()),
        top_floor: Some(35),
        base_floor: Some(3),
        total_area: None,
        building_area: None,
        use_date: Some("20150901".to_string()),
        units_under_60: None,
        units_under_85: None,
        units_under_135: None,
        units_over_135: None,
    }
}

pub fn area_type(
    id: i32,
    apt_id: i32,
    exclusive: f64,
    supply: f64,
    ratio: Option<f64>,
    units: i32,
) -> area_type::Model {
    area_type::Model {
        id,
        apt_id,
        exclu_area: exclusive,
        supply_area: supply,
        exclu_ratio: ratio,
        unit_count: Some(units),
    }
}

/// Sale of the fixture complex named `name`
pub fn sale(
    id: i64,
    name: &str,
    (year, month, day): (i32, i32, i32),
    area: f64,
    amount: i64,
) -> trade::Model {
    trade::Model {
        id,
        sigungu_cd: GANGNAM.to_string(),
        apt_nm: name.to_string(),
        deal_year: year,
        deal_month: month,
        deal_day: Some(day),
        exclu_use_ar: area,
        floor: Some(10),
        deal_amount: amount,
        cdeal_type: None,
        cdeal_day: None,
        dealing_gbn: Some("중개거래".to_string()),
    }
}

pub fn cancelled(mut row: trade::Model) -> trade::Model {
    row.cdeal_type = Some("해제".to_string());
    row.cdeal_day = Some("24.05.02".to_string());
    row
}

pub fn lease(
    id: i64,
    name: &str,
    (year, month, day): (i32, i32, i32),
    area: f64,
    deposit: i64,
    monthly_rent: i64,
) -> rent::Model {
    rent::Model {
        id,
        sigungu_cd: GANGNAM.to_string(),
        apt_nm: name.to_string(),
        deal_year: year,
        deal_month: month,
        deal_day: Some(day),
        exclu_use_ar: area,
        floor: Some(7),
        deposit,
        monthly_rent,
        contract_type: Some("신규".to_string()),
        contract_term: None,
        use_rr_right: None,
        pre_deposit: None,
        pre_monthly_rent: None,
    }
}

pub fn school(id: i32, name: &str, school_type: &str, lat: f64, lng: f64) -> school::Model {
    school::Model {
        id,
        school_name: name.to_string(),
        school_type: school_type.to_string(),
        school_kind: Some("공립".to_string()),
        lat: Some(lat),
        lng: Some(lng),
        student_count: Some(800),
    }
}

pub fn kapt_detail(apt_id: i32, parking: i32) -> kapt_detail::Model {
    kapt_detail::Model {
        apt_id,
        parking_total: Some(parking),
        parking_ground: Some(0),
        parking_underground: Some(parking),
        elevator_count: Some(48),
        cctv_count: Some(320),
        ev_charger_ground: None,
        ev_charger_underground: Some(12),
        management_company: Some("우리관리".to_string()),
        management_count: None,
        security_count: Some(20),
        cleaning_count: Some(15),
        subway_line: Some("3호선".to_string()),
        subway_station: Some("대치".to_string()),
        subway_walk_time: Some("5~10분이내".to_string()),
        bus_walk_time: None,
        welfare_facility: None,
        convenient_facility: None,
        education_facility: None,
    }
}

/// Percent-encodes a query value so Korean terms survive URI parsing
pub fn encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            _ => format!("%{:02X}", b),
        })
        .collect()
}
