//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `UserRecords`, `CompanyRecords`) are called
//! by inbound adapters. Driven ports (`DocumentStore`, `CredentialHasher`,
//! `TokenIssuer`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod company_records;
mod credential_hasher;
mod document_store;
mod login_service;
mod token_issuer;
mod user_records;

pub use company_records::CompanyRecords;
#[cfg(test)]
pub use company_records::MockCompanyRecords;
pub use credential_hasher::{CredentialHashError, CredentialHasher};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use document_store::{DocumentStore, DocumentStoreError};
#[cfg(test)]
pub use document_store::MockDocumentStore;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_records::MockUserRecords;
pub use user_records::{UserRecords, UserUpdateOutcome};
