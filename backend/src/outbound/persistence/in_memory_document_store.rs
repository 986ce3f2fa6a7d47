//! Process-local document store.
//!
//! Collections are vectors behind a mutex, so iteration follows insertion
//! order and the first match is always the oldest. Contents are lost on
//! restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{
    Collection, DeleteOutcome, Document, DocumentId, Filter, InsertOutcome, Projection,
    UpdateOutcome, fields,
};

type Collections = HashMap<Collection, Vec<Document>>;

/// [`DocumentStore`] backed by in-process memory.
///
/// # Examples
/// ```
/// use recordkeeper::domain::ports::DocumentStore;
/// use recordkeeper::domain::{Collection, Filter};
/// use recordkeeper::outbound::persistence::InMemoryDocumentStore;
/// use serde_json::json;
///
/// # tokio_test_block_on(async {
/// let store = InMemoryDocumentStore::new();
/// let doc = json!({ "code": "ACME" }).as_object().cloned().unwrap_or_default();
/// store.insert_one(Collection::Companies, doc).await.expect("insert");
/// let count = store
///     .count_documents(Collection::Companies, &Filter::by("code", "ACME"))
///     .await
///     .expect("count");
/// assert_eq!(count, 1);
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<Collections>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, DocumentStoreError> {
        self.collections
            .lock()
            .map_err(|_| DocumentStoreError::query("document store lock poisoned"))
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let guard = self.lock()?;
        Ok(guard
            .get(&collection)
            .and_then(|documents| documents.iter().find(|doc| filter.matches(doc)))
            .map(|doc| projection.apply(doc.clone())))
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: &Filter,
        projection: &Projection,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let guard = self.lock()?;
        Ok(guard
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| filter.matches(doc))
                    .map(|doc| projection.apply(doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(
        &self,
        collection: Collection,
        mut document: Document,
    ) -> Result<InsertOutcome, DocumentStoreError> {
        let id = DocumentId::new(Uuid::new_v4().to_string());
        document.insert(fields::ID.into(), Value::from(id.clone()));
        self.lock()?.entry(collection).or_default().push(document);
        debug!(%collection, %id, "document inserted");
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        changes: Document,
    ) -> Result<UpdateOutcome, DocumentStoreError> {
        let mut guard = self.lock()?;
        let Some(target) = guard
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|doc| filter.matches(doc)))
        else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = false;
        for (field, value) in changes {
            // The identifier is immutable once assigned.
            if field == fields::ID {
                continue;
            }
            if target.get(&field) != Some(&value) {
                target.insert(field, value);
                modified = true;
            }
        }
        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<DeleteOutcome, DocumentStoreError> {
        let mut guard = self.lock()?;
        let Some(documents) = guard.get_mut(&collection) else {
            return Ok(DeleteOutcome::default());
        };
        match documents.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteOutcome { deleted_count: 1 })
            }
            None => Ok(DeleteOutcome::default()),
        }
    }

    async fn count_documents(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<u64, DocumentStoreError> {
        let guard = self.lock()?;
        let count = guard
            .get(&collection)
            .map_or(0, |documents| documents.iter().filter(|doc| filter.matches(doc)).count());
        Ok(count as u64)
    }
}
