//! Shared harness for integration tests.
//!
//! Builds the full application over a chosen document store, with a fixed
//! signing secret and the cheapest bcrypt cost.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use async_trait::async_trait;
use mockable::DefaultClock;
use recordkeeper::domain::ports::{DocumentStore, DocumentStoreError};
use recordkeeper::domain::{
    Collection, DeleteOutcome, Document, Filter, InsertOutcome, Projection, UpdateOutcome,
};
use recordkeeper::outbound::persistence::InMemoryDocumentStore;
use recordkeeper::server::{build_app, build_http_state};
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789";
pub const TEST_HASH_COST: u32 = 4;

/// Initialise the application over `store`.
pub async fn app_with_store<S>(
    store: Arc<S>,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
where
    S: DocumentStore + 'static,
{
    let state = build_http_state(store, TEST_HASH_COST, TEST_SECRET, Arc::new(DefaultClock));
    test::init_service(build_app(web::Data::new(state))).await
}

/// Application over a fresh in-memory store.
pub async fn app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    app_with_store(Arc::new(InMemoryDocumentStore::new())).await
}

/// Send `req` and decode the JSON response.
pub async fn send<S, B>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

/// Store whose every operation fails as if the backend were unreachable.
#[derive(Debug, Default)]
pub struct FailingDocumentStore;

fn unreachable_store() -> DocumentStoreError {
    DocumentStoreError::connection("connection refused: store at 10.0.0.7:27017")
}

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn find_one(
        &self,
        _collection: Collection,
        _filter: &Filter,
        _projection: &Projection,
    ) -> Result<Option<Document>, DocumentStoreError> {
        Err(unreachable_store())
    }

    async fn find_many(
        &self,
        _collection: Collection,
        _filter: &Filter,
        _projection: &Projection,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        Err(unreachable_store())
    }

    async fn insert_one(
        &self,
        _collection: Collection,
        _document: Document,
    ) -> Result<InsertOutcome, DocumentStoreError> {
        Err(unreachable_store())
    }

    async fn update_one(
        &self,
        _collection: Collection,
        _filter: &Filter,
        _changes: Document,
    ) -> Result<UpdateOutcome, DocumentStoreError> {
        Err(unreachable_store())
    }

    async fn delete_one(
        &self,
        _collection: Collection,
        _filter: &Filter,
    ) -> Result<DeleteOutcome, DocumentStoreError> {
        Err(unreachable_store())
    }

    async fn count_documents(
        &self,
        _collection: Collection,
        _filter: &Filter,
    ) -> Result<u64, DocumentStoreError> {
        Err(unreachable_store())
    }
}
