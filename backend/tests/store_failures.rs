//! Storage faults surface as stable `500` responses that reveal nothing
//! about the store.

mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::rstest;
use serde_json::json;

use support::{FailingDocumentStore, app_with_store, send};

#[rstest]
#[case::list_users(TestRequest::get().uri("/users"), "storage_failure", "Error listing users")]
#[case::create_user(
    TestRequest::post().uri("/users").set_json(json!({ "email": "a@b.com" })),
    "create_failed",
    "User creation error"
)]
#[case::login(
    TestRequest::post().uri("/login").set_json(json!({ "email": "a@b.com", "password": "pw" })),
    "authentication_error",
    "Authentication error"
)]
#[case::get_user(TestRequest::get().uri("/users/ACME"), "storage_failure", "Error getting user profile")]
#[case::update_user(
    TestRequest::put().uri("/users/ACME").set_json(json!({ "name": "x" })),
    "storage_failure",
    "Error updating the user"
)]
#[case::delete_user(
    TestRequest::delete().uri("/users/ACME"),
    "storage_failure",
    "Error deleting the user"
)]
#[case::list_companies(
    TestRequest::get().uri("/companies"),
    "storage_failure",
    "Error listing companies"
)]
#[case::create_company(
    TestRequest::post().uri("/companies").set_json(json!({ "code": "ACME" })),
    "create_failed",
    "Company creation error"
)]
#[case::get_company(
    TestRequest::get().uri("/companies/ACME"),
    "storage_failure",
    "Error retrieving the company"
)]
#[case::update_company(
    TestRequest::put().uri("/companies/ACME").set_json(json!({ "name": "x" })),
    "storage_failure",
    "Error updating the company."
)]
#[case::delete_company(
    TestRequest::delete().uri("/companies/ACME"),
    "storage_failure",
    "Error deleting the company"
)]
#[actix_web::test]
async fn store_faults_are_opaque(
    #[case] req: TestRequest,
    #[case] code: &str,
    #[case] message: &str,
) {
    let app = app_with_store(Arc::new(FailingDocumentStore)).await;

    let (status, body) = send(&app, req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], code);
    assert_eq!(body["message"], message);
    assert!(body.get("details").is_none());
    assert!(!body.to_string().contains("10.0.0.7"));
}
