//! Domain primitives, records and services.
//!
//! Purpose: hold the transport-agnostic core of the record API. Types here
//! know nothing about actix-web or about how documents are stored; adapters
//! reach them through [`ports`].
//!
//! Public surface:
//! - `Error` / `ErrorCode`: failure payload shared by every adapter.
//! - `Document`, `Filter`, `Projection`: the storage boundary.
//! - `NewUser`, `UserRecord`, `UserView`, `UserPatch` and their company
//!   counterparts: typed records.
//! - `UserService`, `CompanyService`: implementations of the driving ports.

pub mod auth;
pub mod company;
pub mod company_service;
pub mod document;
pub mod error;
pub mod ports;
pub mod record;
mod record_service_support;
pub mod referential_integrity;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{
    LoginCredentials, LoginOutcome, LoginValidationError, PasswordHash, SessionToken,
};
pub use self::company::{CompanyPatch, CompanyRecord, CompanyView, NewCompany};
pub use self::company_service::CompanyService;
pub use self::document::{
    Collection, DeleteOutcome, Document, DocumentId, Filter, InsertOutcome, Projection,
    UpdateOutcome, fields,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::record::{RecordCode, RecordDecodeError};
pub use self::referential_integrity::ReferentialIntegrityGuard;
pub use self::trace_id::TraceId;
pub use self::user::{Email, NewUser, UserPatch, UserRecord, UserValidationError, UserView};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recordkeeper::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
