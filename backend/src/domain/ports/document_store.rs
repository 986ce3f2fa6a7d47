//! Driven port for the document store backing users and companies.
//!
//! Adapters implement plain exact-match persistence over named collections.
//! They never interpret business rules: uniqueness, referential integrity
//! and password handling live in the record services.

use async_trait::async_trait;

use crate::domain::{
    Collection, DeleteOutcome, Document, Filter, InsertOutcome, Projection, UpdateOutcome,
};

use super::define_port_error;

define_port_error! {
    /// Failures raised by document store adapters.
    pub enum DocumentStoreError {
        /// The store could not be reached.
        Connection { message: String } => "document store connection failed: {message}",
        /// An operation failed while executing.
        Query { message: String } => "document store query failed: {message}",
    }
}

/// Persistence contract used by the record services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First document, in insertion order, matching `filter`.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Option<Document>, DocumentStoreError>;

    /// Every matching document in insertion order.
    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<Document>, DocumentStoreError>;

    /// Insert a document; the store assigns `_id`.
    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<InsertOutcome, DocumentStoreError>;

    /// Assign `changes` field by field on the first match.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<UpdateOutcome, DocumentStoreError>;

    /// Remove the first match.
    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteOutcome, DocumentStoreError>;

    async fn count_documents(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, DocumentStoreError>;
}
