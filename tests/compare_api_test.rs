mod common;

use apt_explorer_api::entities::nearest_station;
use axum::http::StatusCode;
use serde_json::Value;

use common::{apartment, kapt_info, sale, this_year, TestApp};

async fn seeded_app() -> TestApp {
    let app = TestApp::new().await;
    let y = this_year();

    app.seed_apartments(vec![
        apartment(1, "래미안대치팰리스", "대치동", 120),
        apartment(2, "은마", "대치동", 300),
        apartment(3, "래미안블레스티지", "개포동", 50),
    ])
    .await;
    app.seed_kapt_info(kapt_info(1, 1608, "계단식")).await;
    app.seed_station(nearest_station::Model {
        apt_id: 2,
        station_name: Some("학여울".to_string()),
        line_name: Some("3호선".to_string()),
        distance_m: Some(650.0),
    })
    .await;
    app.seed_trades(vec![
        sale(1, "래미안대치팰리스", (y - 1, 4, 2), 84.9, 380_000),
        sale(2, "은마", (y - 1, 4, 9), 76.8, 260_000),
        sale(3, "은마", (y - 1, 4, 21), 76.8, 270_000),
        sale(4, "은마", (2010, 4, 21), 76.8, 90_000),
    ])
    .await;

    app
}

fn entry_ids(data: &Value) -> Vec<i64> {
    data.as_array()
        .expect("array of entries")
        .iter()
        .map(|entry| entry["apartment"]["id"].as_i64().expect("numeric id"))
        .collect()
}

#[tokio::test]
async fn compare_returns_entries_in_request_order() {
    let app = seeded_app().await;

    let (status, _, body) = app.get_json("/api/v1/apartments/compare?ids=2,1,3").await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(entry_ids(data), vec![2, 1, 3]);

    let eunma = &data[0];
    assert_eq!(eunma["station"]["stationName"], "학여울");
    assert_eq!(eunma["station"]["walkingMinutes"], 9);
    assert_eq!(eunma["priceTrend"].as_array().unwrap().len(), 1);
    assert_eq!(eunma["priceTrend"][0]["avgPrice"], 265_000);
    assert_eq!(eunma["priceTrend"][0]["transactionCount"], 2);

    let raemian = &data[1];
    assert_eq!(raemian["apartment"]["totalUnits"], 1608);
    assert_eq!(raemian["station"], Value::Null);

    assert_eq!(data[2]["priceTrend"], Value::Array(vec![]));
}

#[tokio::test]
async fn compare_drops_duplicate_ids_and_honours_period() {
    let app = seeded_app().await;

    let (status, _, body) = app
        .get_json("/api/v1/apartments/compare?ids=2,%202,2&period=all")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry_ids(&body["data"]), vec![2]);
    assert_eq!(body["data"][0]["priceTrend"][0]["date"], "2010-04");
}

#[tokio::test]
async fn compare_rejects_bad_id_lists() {
    let app = seeded_app().await;

    for uri in [
        "/api/v1/apartments/compare",
        "/api/v1/apartments/compare?ids=",
        "/api/v1/apartments/compare?ids=1,two",
        "/api/v1/apartments/compare?ids=1,2,3,4,5",
    ] {
        let (status, _, _) = app.get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn compare_fails_when_any_apartment_is_missing() {
    let app = seeded_app().await;

    let (status, _, body) = app.get_json("/api/v1/apartments/compare?ids=1,404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], Value::Null);
    assert!(body["message"].as_str().unwrap().contains("404"));
}
