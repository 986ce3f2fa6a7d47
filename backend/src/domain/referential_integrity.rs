//! Company/user referential integrity.
//!
//! A user is associated with a company when both carry the same `code`. A
//! company may only be deleted once no user is associated with it.
//!
//! The check is a plain count followed, in the caller, by a separate delete.
//! A user inserted between the two is not seen and the company is removed
//! anyway. The store offers no transaction spanning both collections, so this
//! window is accepted.

use std::sync::Arc;

use crate::domain::ports::{DocumentStore, DocumentStoreError};
use crate::domain::{Collection, Filter, RecordCode, fields};

/// Guards company deletion against dangling user references.
pub struct ReferentialIntegrityGuard<S> {
    store: Arc<S>,
}

impl<S> Clone for ReferentialIntegrityGuard<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ReferentialIntegrityGuard<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Whether no user references `code`.
    pub async fn can_delete_company(&self, code: &RecordCode) -> Result<bool, DocumentStoreError> {
        let associated = self
            .store
            .count_documents(Collection::Users, &Filter::by(fields::CODE, code))
            .await?;
        Ok(associated == 0)
    }
}
