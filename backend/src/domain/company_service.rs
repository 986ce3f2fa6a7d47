//! Company record service.
//!
//! Companies have no uniqueness check of their own. Deleting one consults the
//! [`ReferentialIntegrityGuard`] first so that users never point at a company
//! that no longer exists, within the limits described on the guard.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{CompanyRecords, DocumentStore};
use crate::domain::record_service_support::logged;
use crate::domain::referential_integrity::ReferentialIntegrityGuard;
use crate::domain::{
    Collection, CompanyPatch, CompanyRecord, CompanyView, Document, Error, Filter, NewCompany,
    Projection, RecordCode, fields,
};

const COMPANY_NOT_FOUND: &str = "Company not found";
const CREATE_NOT_ACKNOWLEDGED: &str = "Company creation failed";
const CREATE_ERROR: &str = "Company creation error";
const LIST_ERROR: &str = "Error listing companies";
const GET_ERROR: &str = "Error retrieving the company";
const NOT_MODIFIED: &str = "Company not found or no data was modified.";
const UPDATE_ERROR: &str = "Error updating the company.";
const ASSOCIATED_USERS: &str = "This company cannot be deleted as it has associated users.";
const DELETE_NOT_FOUND: &str = "Company not found.";
const DELETE_ERROR: &str = "Error deleting the company";

/// Company service implementing the [`CompanyRecords`] driving port.
pub struct CompanyService<S> {
    store: Arc<S>,
    guard: ReferentialIntegrityGuard<S>,
    clock: Arc<dyn Clock>,
}

impl<S> CompanyService<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        let guard = ReferentialIntegrityGuard::new(Arc::clone(&store));
        Self {
            store,
            guard,
            clock,
        }
    }

    // Companies never store passwords, but a client may have sent one.
    fn without_password() -> Projection {
        Projection::excluding([fields::PASSWORD])
    }

    fn into_view(
        operation: &'static str,
        document: Document,
        on_error: fn() -> Error,
    ) -> Result<CompanyView, Error> {
        CompanyRecord::from_document(document)
            .map(CompanyRecord::into_view)
            .map_err(logged(operation, on_error))
    }
}

#[async_trait]
impl<S> CompanyRecords for CompanyService<S>
where
    S: DocumentStore,
{
    async fn list_companies(&self) -> Result<Vec<CompanyView>, Error> {
        let documents = self
            .store
            .find_many(
                Collection::Companies,
                &Filter::everything(),
                &Self::without_password(),
            )
            .await
            .map_err(logged("list_companies", || Error::storage_failure(LIST_ERROR)))?;
        documents
            .into_iter()
            .map(|document| {
                Self::into_view("list_companies", document, || {
                    Error::storage_failure(LIST_ERROR)
                })
            })
            .collect()
    }

    async fn create_company(&self, company: NewCompany) -> Result<CompanyView, Error> {
        let create_error = || Error::create_failed(CREATE_ERROR);
        let document = company.into_document(self.clock.utc());
        let outcome = self
            .store
            .insert_one(Collection::Companies, document)
            .await
            .map_err(logged("create_company", create_error))?;
        if !outcome.acknowledged {
            warn!("company insert was not acknowledged");
            return Err(Error::create_failed(CREATE_NOT_ACKNOWLEDGED));
        }

        let created = self
            .store
            .find_one(
                Collection::Companies,
                &Filter::by(fields::ID, outcome.inserted_id.clone()),
                &Self::without_password(),
            )
            .await
            .map_err(logged("create_company", create_error))?
            .ok_or_else(|| {
                logged("create_company", create_error)(format!(
                    "inserted company {} could not be read back",
                    outcome.inserted_id
                ))
            })?;
        debug!(id = %outcome.inserted_id, "company created");
        Self::into_view("create_company", created, create_error)
    }

    async fn get_company(&self, code: &RecordCode) -> Result<CompanyView, Error> {
        let document = self
            .store
            .find_one(
                Collection::Companies,
                &Filter::by(fields::CODE, code),
                &Projection::excluding([fields::PASSWORD, fields::ID]),
            )
            .await
            .map_err(logged("get_company", || Error::storage_failure(GET_ERROR)))?
            .ok_or_else(|| Error::not_found(COMPANY_NOT_FOUND))?;
        Self::into_view("get_company", document, || Error::storage_failure(GET_ERROR))
    }

    async fn update_company(&self, code: &RecordCode, patch: CompanyPatch) -> Result<(), Error> {
        let outcome = self
            .store
            .update_one(
                Collection::Companies,
                &Filter::by(fields::CODE, code),
                patch.into_changes(),
            )
            .await
            .map_err(logged("update_company", || Error::storage_failure(UPDATE_ERROR)))?;
        // An existing company left untouched reads the same as a missing one.
        if outcome.modified_count == 0 {
            return Err(Error::not_found(NOT_MODIFIED));
        }
        debug!(%code, "company updated");
        Ok(())
    }

    async fn delete_company(&self, code: &RecordCode) -> Result<(), Error> {
        let delete_error = || Error::storage_failure(DELETE_ERROR);
        let allowed = self
            .guard
            .can_delete_company(code)
            .await
            .map_err(logged("delete_company", delete_error))?;
        if !allowed {
            debug!(%code, "company deletion blocked by associated users");
            return Err(Error::associated_users_exist(ASSOCIATED_USERS));
        }

        let outcome = self
            .store
            .delete_one(Collection::Companies, &Filter::by(fields::CODE, code))
            .await
            .map_err(logged("delete_company", delete_error))?;
        if outcome.deleted_count == 0 {
            return Err(Error::not_found(DELETE_NOT_FOUND));
        }
        debug!(%code, "company deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "company_service_tests.rs"]
mod tests;
