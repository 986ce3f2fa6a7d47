//! Tests for the company service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{DocumentStoreError, MockDocumentStore};
use crate::domain::{DeleteOutcome, DocumentId, ErrorCode, InsertOutcome, UpdateOutcome};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockall::Sequence;
use mockall::predicate::{always, eq};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct FixtureClock(DateTime<Utc>);

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 15, 0)
        .single()
        .expect("valid instant")
}

fn doc(value: Value) -> Document {
    value.as_object().cloned().expect("fixture is an object")
}

fn make_service(store: MockDocumentStore, now: DateTime<Utc>) -> CompanyService<MockDocumentStore> {
    CompanyService::new(Arc::new(store), Arc::new(FixtureClock(now)))
}

fn acme() -> RecordCode {
    RecordCode::new("ACME")
}

#[rstest]
#[tokio::test]
async fn create_stamps_creation_date_and_skips_duplicate_checks(now: DateTime<Utc>) {
    let mut store = MockDocumentStore::new();
    let mut seq = Sequence::new();
    store
        .expect_insert_one()
        .withf(|collection, document| {
            *collection == Collection::Companies
                && document.get("creationDate") == Some(&json!("2026-03-01T09:15:00.000Z"))
                && document.get("code") == Some(&json!("ACME"))
        })
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| {
            Ok(InsertOutcome {
                acknowledged: true,
                inserted_id: DocumentId::new("c-1"),
            })
        });
    store
        .expect_find_one()
        .with(eq(Collection::Companies), eq(Filter::by("_id", "c-1")), always())
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _, _| {
            Ok(Some(doc(json!({
                "_id": "c-1",
                "code": "ACME",
                "creationDate": "2026-03-01T09:15:00.000Z",
            }))))
        });
    let service = make_service(store, now);

    let view = service
        .create_company(NewCompany::from_document(doc(json!({ "code": "ACME" }))))
        .await
        .expect("company created");

    assert_eq!(view.id().map(DocumentId::as_str), Some("c-1"));
    assert_eq!(view.created_at(), Some(now));
}

#[rstest]
#[case::not_acknowledged(
    Ok(InsertOutcome { acknowledged: false, inserted_id: DocumentId::new("c-1") }),
    "Company creation failed"
)]
#[case::store_fault(Err(DocumentStoreError::query("disk full")), "Company creation error")]
#[tokio::test]
async fn create_failures(
    now: DateTime<Utc>,
    #[case] insert: Result<InsertOutcome, DocumentStoreError>,
    #[case] message: &str,
) {
    let mut store = MockDocumentStore::new();
    store
        .expect_insert_one()
        .times(1)
        .return_once(move |_, _| insert);
    store.expect_find_one().times(0);
    let service = make_service(store, now);

    let error = service
        .create_company(NewCompany::from_document(doc(json!({ "code": "ACME" }))))
        .await
        .expect_err("creation fails");

    assert_eq!(error.code(), ErrorCode::CreateFailed);
    assert_eq!(error.message(), message);
}

#[rstest]
#[tokio::test]
async fn get_excludes_identifier(now: DateTime<Utc>) {
    let mut store = MockDocumentStore::new();
    store
        .expect_find_one()
        .withf(|collection, filter, projection| {
            *collection == Collection::Companies
                && *filter == Filter::by("code", "ACME")
                && projection.excludes("_id")
                && projection.excludes("password")
        })
        .times(1)
        .return_once(|_, _, _| Ok(Some(doc(json!({ "code": "ACME", "name": "Acme" })))));
    let service = make_service(store, now);

    let view = service.get_company(&acme()).await.expect("company found");

    assert_eq!(
        serde_json::to_value(&view).expect("serialises"),
        json!({ "code": "ACME", "name": "Acme" })
    );
}

#[rstest]
#[case::missing(Ok(None), ErrorCode::NotFound, "Company not found")]
#[case::store_fault(
    Err(DocumentStoreError::connection("down")),
    ErrorCode::StorageFailure,
    "Error retrieving the company"
)]
#[tokio::test]
async fn get_failures(
    now: DateTime<Utc>,
    #[case] lookup: Result<Option<Document>, DocumentStoreError>,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let mut store = MockDocumentStore::new();
    store
        .expect_find_one()
        .times(1)
        .return_once(move |_, _, _| lookup);
    let service = make_service(store, now);

    let error = service.get_company(&acme()).await.expect_err("lookup fails");

    assert_eq!(error.code(), code);
    assert_eq!(error.message(), message);
}

#[rstest]
#[case::modified(Ok(UpdateOutcome { matched_count: 1, modified_count: 1 }), None)]
#[case::unchanged(
    Ok(UpdateOutcome { matched_count: 1, modified_count: 0 }),
    Some((ErrorCode::NotFound, "Company not found or no data was modified."))
)]
#[case::missing(
    Ok(UpdateOutcome { matched_count: 0, modified_count: 0 }),
    Some((ErrorCode::NotFound, "Company not found or no data was modified."))
)]
#[case::store_fault(
    Err(DocumentStoreError::query("boom")),
    Some((ErrorCode::StorageFailure, "Error updating the company."))
)]
#[tokio::test]
async fn update_outcomes(
    now: DateTime<Utc>,
    #[case] outcome: Result<UpdateOutcome, DocumentStoreError>,
    #[case] expected_error: Option<(ErrorCode, &str)>,
) {
    let mut store = MockDocumentStore::new();
    store
        .expect_update_one()
        .withf(|collection, filter, changes| {
            *collection == Collection::Companies
                && *filter == Filter::by("code", "ACME")
                && !changes.contains_key("_id")
                && changes.get("industry") == Some(&json!("energy"))
        })
        .times(1)
        .return_once(move |_, _, _| outcome);
    let service = make_service(store, now);
    let patch = CompanyPatch::from_document(doc(json!({ "_id": "x", "industry": "energy" })));

    let result = service.update_company(&acme(), patch).await;

    match expected_error {
        None => result.expect("update succeeds"),
        Some((code, message)) => {
            let error = result.expect_err("update fails");
            assert_eq!(error.code(), code);
            assert_eq!(error.message(), message);
        }
    }
}

#[rstest]
#[tokio::test]
async fn delete_is_blocked_by_associated_users(now: DateTime<Utc>) {
    let mut store = MockDocumentStore::new();
    store
        .expect_count_documents()
        .with(eq(Collection::Users), eq(Filter::by("code", "ACME")))
        .times(1)
        .return_once(|_, _| Ok(2));
    store.expect_delete_one().times(0);
    let service = make_service(store, now);

    let error = service
        .delete_company(&acme())
        .await
        .expect_err("deletion blocked");

    assert_eq!(error.code(), ErrorCode::AssociatedUsersExist);
    assert_eq!(
        error.message(),
        "This company cannot be deleted as it has associated users."
    );
}

#[rstest]
#[tokio::test]
async fn delete_checks_guard_before_deleting(now: DateTime<Utc>) {
    let mut store = MockDocumentStore::new();
    let mut seq = Sequence::new();
    store
        .expect_count_documents()
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(0));
    store
        .expect_delete_one()
        .with(eq(Collection::Companies), eq(Filter::by("code", "ACME")))
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_, _| Ok(DeleteOutcome { deleted_count: 1 }));
    let service = make_service(store, now);

    service
        .delete_company(&acme())
        .await
        .expect("unreferenced company is deleted");
}

#[rstest]
#[tokio::test]
async fn delete_reports_missing_company(now: DateTime<Utc>) {
    let mut store = MockDocumentStore::new();
    store
        .expect_count_documents()
        .times(1)
        .return_once(|_, _| Ok(0));
    store
        .expect_delete_one()
        .times(1)
        .return_once(|_, _| Ok(DeleteOutcome { deleted_count: 0 }));
    let service = make_service(store, now);

    let error = service
        .delete_company(&acme())
        .await
        .expect_err("missing company");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Company not found.");
}

#[rstest]
#[case::guard_fault(true)]
#[case::delete_fault(false)]
#[tokio::test]
async fn delete_store_faults_are_stable(now: DateTime<Utc>, #[case] fail_in_guard: bool) {
    let mut store = MockDocumentStore::new();
    if fail_in_guard {
        store
            .expect_count_documents()
            .times(1)
            .return_once(|_, _| Err(DocumentStoreError::connection("down")));
        store.expect_delete_one().times(0);
    } else {
        store
            .expect_count_documents()
            .times(1)
            .return_once(|_, _| Ok(0));
        store
            .expect_delete_one()
            .times(1)
            .return_once(|_, _| Err(DocumentStoreError::query("locked")));
    }
    let service = make_service(store, now);

    let error = service
        .delete_company(&acme())
        .await
        .expect_err("store fault");

    assert_eq!(error.code(), ErrorCode::StorageFailure);
    assert_eq!(error.message(), "Error deleting the company");
}

#[rstest]
#[tokio::test]
async fn list_uses_defensive_password_projection(now: DateTime<Utc>) {
    let mut store = MockDocumentStore::new();
    store
        .expect_find_many()
        .withf(|collection, _, projection| {
            *collection == Collection::Companies && projection.excludes("password")
        })
        .times(1)
        .return_once(|_, _, _| Ok(vec![doc(json!({ "_id": "c-1", "code": "ACME" }))]));
    let service = make_service(store, now);

    let companies = service.list_companies().await.expect("list succeeds");

    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].id().map(DocumentId::as_str), Some("c-1"));
}

#[rstest]
#[tokio::test]
async fn list_store_fault_is_stable(now: DateTime<Utc>) {
    let mut store = MockDocumentStore::new();
    store
        .expect_find_many()
        .times(1)
        .return_once(|_, _, _| Err(DocumentStoreError::query("boom")));
    let service = make_service(store, now);

    let error = service.list_companies().await.expect_err("list fails");

    assert_eq!(error.message(), "Error listing companies");
}
