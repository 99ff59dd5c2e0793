//! Tests for asset HTTP handlers.

use super::*;
use crate::domain::{AssetId, AssetStatus, HistoryFilter};
use crate::inbound::http::test_utils::{MockPorts, read_json, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

fn asset_id(raw: i64) -> AssetId {
    AssetId::new(raw).expect("valid asset id")
}

#[fixture]
fn available_view() -> AssetView {
    AssetView {
        id: asset_id(4),
        name: "Dell P2422H".to_owned(),
        serial_number: "SN987".to_owned(),
        asset_type_id: AssetTypeId::new(2).expect("id"),
        asset_type_name: "MONITOR".to_owned(),
        status: AssetStatus::Available,
        value: Decimal::new(120_000, 2),
        assigned_to_user_id: None,
        assigned_to_user_name: None,
        assigned_at: None,
    }
}

fn allocated(mut view: AssetView, user: i64) -> AssetView {
    view.status = AssetStatus::InUse;
    view.assigned_to_user_id = Some(UserId::new(user).expect("id"));
    view.assigned_to_user_name = Some("Ana".to_owned());
    view.assigned_at = Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).single();
    view
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_asset(available_view: AssetView) {
    let mut ports = MockPorts::default();
    ports
        .assets
        .expect_create()
        .withf(|asset| {
            asset.serial_number.as_ref() == "SN987"
                && asset.value.as_decimal() == Decimal::new(120_000, 2)
        })
        .times(1)
        .return_once(move |_| Ok(available_view));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/assets")
            .set_json(json!({
                "name": "Dell P2422H",
                "serialNumber": " SN987 ",
                "assetTypeId": 2,
                "value": "1200.00"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "available");
    assert_eq!(body["assetTypeName"], "MONITOR");
    assert!(body["assignedToUserId"].is_null());
}

#[rstest]
#[case::blank_name(json!({"name": " ", "serialNumber": "SN1", "assetTypeId": 1, "value": 10}), "name")]
#[case::serial_symbols(json!({"name": "Mouse", "serialNumber": "SN-1", "assetTypeId": 1, "value": 10}), "serialNumber")]
#[case::negative_value(json!({"name": "Mouse", "serialNumber": "SN1", "assetTypeId": 1, "value": "-1"}), "value")]
#[case::fractional_cents(json!({"name": "Mouse", "serialNumber": "SN1", "assetTypeId": 1, "value": "1.005"}), "value")]
#[case::zero_type(json!({"name": "Mouse", "serialNumber": "SN1", "assetTypeId": 0, "value": 10}), "assetTypeId")]
#[actix_web::test]
async fn create_rejects_invalid_fields(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/assets")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], field);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/assets")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"name\":")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[actix_web::test]
async fn allocate_returns_updated_asset(available_view: AssetView) {
    let mut ports = MockPorts::default();
    ports
        .assets
        .expect_allocate()
        .with(eq(asset_id(4)), eq(UserId::new(1).expect("id")))
        .times(1)
        .return_once(move |_, _| Ok(allocated(available_view, 1)));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/assets/4/allocate")
            .set_json(json!({"userId": 1}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "in_use");
    assert_eq!(body["assignedToUserId"], 1);
    assert_eq!(body["assignedAt"], "2026-03-02T08:30:00Z");
}

#[rstest]
#[actix_web::test]
async fn allocate_unavailable_asset_is_conflict() {
    let mut ports = MockPorts::default();
    ports
        .assets
        .expect_allocate()
        .times(1)
        .return_once(|_, _| Err(Error::conflict("asset 3 is not available")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/assets/3/allocate")
            .set_json(json!({"userId": 2}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = read_json(response).await;
    assert_eq!(body["code"], "conflict");
}

#[rstest]
#[actix_web::test]
async fn return_of_available_asset_is_invalid_state() {
    let mut ports = MockPorts::default();
    ports
        .assets
        .expect_return_asset()
        .with(eq(asset_id(4)))
        .times(1)
        .return_once(|_| Err(Error::invalid_state("asset 4 is not in use")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/assets/4/return")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = read_json(response).await;
    assert_eq!(body["code"], "invalid_state");
}

#[rstest]
#[actix_web::test]
async fn mark_maintenance_delegates(available_view: AssetView) {
    let mut ports = MockPorts::default();
    ports
        .assets
        .expect_mark_maintenance()
        .with(eq(asset_id(4)))
        .times(1)
        .return_once(move |_| {
            let mut view = available_view;
            view.status = AssetStatus::Maintenance;
            Ok(view)
        });
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/assets/4/maintenance")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["status"], "maintenance");
}

#[rstest]
#[case::no_body(None, true)]
#[case::empty_object(Some(json!({})), true)]
#[case::operational(Some(json!({"isOperational": true})), true)]
#[case::written_off(Some(json!({"isOperational": false})), false)]
#[actix_web::test]
async fn complete_maintenance_defaults_to_operational(
    available_view: AssetView,
    #[case] payload: Option<Value>,
    #[case] expected_flag: bool,
) {
    let mut ports = MockPorts::default();
    ports
        .assets
        .expect_complete_maintenance()
        .with(eq(asset_id(4)), eq(expected_flag))
        .times(1)
        .return_once(move |_, _| Ok(available_view));
    let app = actix_test::init_service(test_app(ports)).await;

    let request = actix_test::TestRequest::post().uri("/api/v1/assets/4/maintenance/complete");
    let request = match payload {
        Some(body) => request.set_json(body),
        None => request,
    };
    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[case::string_flag("application/json", r#"{"isOperational":"false"}"#)]
#[case::truncated("application/json", r#"{"isOperational":"#)]
#[case::not_an_object("application/json", "false")]
#[case::plain_text("text/plain", r#"{"isOperational":false}"#)]
#[actix_web::test]
async fn complete_maintenance_rejects_unreadable_bodies(
    #[case] content_type: &str,
    #[case] payload: &'static str,
) {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/assets/4/maintenance/complete")
        .insert_header(("content-type", content_type))
        .set_payload(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "isOperational");
}

#[rstest]
#[actix_web::test]
async fn list_with_user_filter_uses_list_by_user(available_view: AssetView) {
    let mut ports = MockPorts::default();
    ports
        .assets_query
        .expect_list_by_user()
        .with(eq(UserId::new(1).expect("id")))
        .times(1)
        .return_once(move |_| Ok(vec![allocated(available_view, 1)]));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/assets?userId=1")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Value> = read_json(response).await;
    assert_eq!(body.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn list_without_filter_lists_everything(available_view: AssetView) {
    let mut ports = MockPorts::default();
    ports
        .assets_query
        .expect_list()
        .times(1)
        .return_once(move || Ok(vec![available_view]));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/assets").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn list_rejects_malformed_user_filter() {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/assets?userId=abc")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body["details"]["field"], "userId");
}

#[rstest]
#[actix_web::test]
async fn lookup_by_serial_passes_trimmed_serial(available_view: AssetView) {
    let mut ports = MockPorts::default();
    ports
        .assets_query
        .expect_get_by_serial()
        .with(eq(SerialNumber::new("SN987").expect("serial")))
        .times(1)
        .return_once(move |_| Ok(available_view));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/assets/by-serial/SN987")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = read_json(response).await;
    assert_eq!(body["id"], 4);
}

#[rstest]
#[actix_web::test]
async fn history_filters_by_asset() {
    let mut ports = MockPorts::default();
    ports
        .assets_query
        .expect_history()
        .with(eq(HistoryFilter::for_asset(asset_id(5))))
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/assets/5/history")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Value> = read_json(response).await;
    assert!(body.is_empty());
}

#[rstest]
#[actix_web::test]
async fn update_missing_type_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .assets
        .expect_update()
        .withf(|id, details| *id == AssetId::new(2).expect("id") && details.name.as_ref() == "Mouse")
        .times(1)
        .return_once(|_, _| Err(Error::not_found("asset type 99 not found")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/assets/2")
            .set_json(json!({"name": "Mouse", "assetTypeId": 99, "value": "25.50"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
