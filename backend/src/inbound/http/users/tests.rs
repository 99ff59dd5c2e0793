//! Tests for the users handlers.

use super::*;
use crate::domain::{AllocationAction, AllocationLogId, AssetId, AssetStatus, AssetTypeId, UserId};
use crate::inbound::http::test_utils::{MockPorts, read_json, test_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}

fn user(id: i64, name: &str, email: &str) -> User {
    User::new(
        user_id(id),
        UserName::new(name).expect("valid name"),
        EmailAddress::new(email).expect("valid email"),
    )
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_user() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_create()
        .withf(|new_user| new_user.email.as_ref() == "ana@mail.com")
        .times(1)
        .return_once(|new_user| Ok(User::new(user_id(9), new_user.name, new_user.email)));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"name": " Ana ", "email": " Ana@Mail.com "}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = read_json(response).await;
    assert_eq!(body, json!({"id": 9, "name": "Ana", "email": "ana@mail.com"}));
}

#[rstest]
#[case::blank_name(json!({"name": "", "email": "ana@mail.com"}), "name")]
#[case::missing_at(json!({"name": "Ana", "email": "ana.mail.com"}), "email")]
#[case::blank_email(json!({"name": "Ana", "email": "  "}), "email")]
#[actix_web::test]
async fn create_reports_the_invalid_field(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
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
async fn update_duplicate_email_is_conflict() {
    let mut ports = MockPorts::default();
    ports
        .users
        .expect_update()
        .withf(|id, _| *id == UserId::new(2).expect("id"))
        .times(1)
        .return_once(|_, _| Err(Error::duplicate_key("email ana@mail.com is already registered")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/2")
            .set_json(json!({"name": "Luís", "email": "ana@mail.com"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = read_json(response).await;
    assert_eq!(body["code"], "duplicate_key");
}

#[rstest]
#[actix_web::test]
async fn get_missing_user_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .users_query
        .expect_get()
        .with(eq(user_id(42)))
        .times(1)
        .return_once(|_| Err(Error::not_found("user 42 not found")));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users/42").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn list_returns_users() {
    let mut ports = MockPorts::default();
    ports
        .users_query
        .expect_list()
        .times(1)
        .return_once(|| Ok(vec![user(1, "Ana", "ana@mail.com"), user(3, "José", "jose@mail.com")]));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/users").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Value> = read_json(response).await;
    assert_eq!(body.len(), 2);
    assert_eq!(body[1]["name"], "José");
}

#[rstest]
#[actix_web::test]
async fn user_assets_delegate_to_asset_query() {
    let assigned_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().expect("timestamp");
    let view = AssetView {
        id: AssetId::new(1).expect("id"),
        name: "Dell Latitude".to_owned(),
        serial_number: "SN123".to_owned(),
        asset_type_id: AssetTypeId::new(1).expect("id"),
        asset_type_name: "NOTEBOOK".to_owned(),
        status: AssetStatus::InUse,
        value: Decimal::new(450_000, 2),
        assigned_to_user_id: Some(user_id(1)),
        assigned_to_user_name: Some("Ana".to_owned()),
        assigned_at: Some(assigned_at),
    };
    let mut ports = MockPorts::default();
    ports
        .assets_query
        .expect_list_by_user()
        .with(eq(user_id(1)))
        .times(1)
        .return_once(move |_| Ok(vec![view]));
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/1/assets")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Value> = read_json(response).await;
    assert_eq!(body[0]["serialNumber"], "SN123");
    assert_eq!(body[0]["status"], "in_use");
    assert_eq!(body[0]["value"], "4500.00");
    assert_eq!(body[0]["assignedToUserName"], "Ana");
}

#[rstest]
#[actix_web::test]
async fn allocation_history_is_returned_newest_first() {
    let at = |hour| {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
            .single()
            .expect("timestamp")
    };
    let entry = move |id, action, hour| AllocationHistoryEntry {
        id: AllocationLogId::new(id).expect("id"),
        asset_id: AssetId::new(1).expect("id"),
        asset_name: "Dell Latitude".to_owned(),
        user_id: user_id(1),
        user_name: "Ana".to_owned(),
        action,
        at: at(hour),
    };
    let mut ports = MockPorts::default();
    ports
        .users_query
        .expect_allocation_history()
        .with(eq(user_id(1)))
        .times(1)
        .return_once(move |_| {
            Ok(vec![
                entry(2, AllocationAction::Returned, 12),
                entry(1, AllocationAction::Allocated, 9),
            ])
        });
    let app = actix_test::init_service(test_app(ports)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/users/1/allocation-history")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Value> = read_json(response).await;
    assert_eq!(body[0]["action"], "returned");
    assert_eq!(body[1]["action"], "allocated");
    assert_eq!(body[0]["assetName"], "Dell Latitude");
}

#[rstest]
#[case::zero("/api/v1/users/0")]
#[case::negative("/api/v1/users/-5")]
#[case::text("/api/v1/users/ana")]
#[actix_web::test]
async fn invalid_user_ids_are_rejected(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(MockPorts::default())).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_json(response).await;
    assert_eq!(body["details"]["field"], "id");
}
