//! Driving port for company record management.

use async_trait::async_trait;

use crate::domain::{CompanyPatch, CompanyView, Error, NewCompany, RecordCode};

/// Domain use-case port for companies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRecords: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<CompanyView>, Error>;

    /// Create a company. Codes are not checked for uniqueness.
    async fn create_company(&self, company: NewCompany) -> Result<CompanyView, Error>;

    async fn get_company(&self, code: &RecordCode) -> Result<CompanyView, Error>;

    /// Apply a partial update. Fails with `NotFound` when nothing changed.
    async fn update_company(&self, code: &RecordCode, patch: CompanyPatch) -> Result<(), Error>;

    /// Delete a company that no user references.
    async fn delete_company(&self, code: &RecordCode) -> Result<(), Error>;
}
