//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their wire shape and register under the domain type's
//! name, so the generated document describes what handlers actually return.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// A required field is missing or the body is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A user with the same email already exists.
    #[schema(rename = "duplicate_email")]
    DuplicateEmail,
    /// Email or password did not match.
    #[schema(rename = "invalid_credentials")]
    InvalidCredentials,
    /// Bearer token missing, invalid or expired.
    #[schema(rename = "permission_denied")]
    PermissionDenied,
    #[schema(rename = "not_found")]
    NotFound,
    /// The company is still referenced by users.
    #[schema(rename = "associated_users_exist")]
    AssociatedUsersExist,
    /// Login could not be evaluated.
    #[schema(rename = "authentication_error")]
    AuthenticationError,
    #[schema(rename = "create_failed")]
    CreateFailed,
    #[schema(rename = "storage_failure")]
    StorageFailure,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "User not found")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details for client errors.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::UserView`].
///
/// Further attributes submitted at creation are returned alongside these.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserView)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier. Omitted by the by-code and by-token reads.
    #[schema(rename = "_id", example = "0b7c6c59-5f34-4e0c-9a33-0d8f1f0e5a77")]
    id: Option<String>,
    #[schema(example = "ada@example.com")]
    email: Option<String>,
    /// External lookup key shared with companies.
    #[schema(example = "ACME")]
    code: Option<String>,
    /// Creation timestamp.
    #[schema(rename = "dataCreated", value_type = Option<String>, format = DateTime)]
    data_created: Option<String>,
}

/// OpenAPI schema for [`crate::domain::CompanyView`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CompanyView)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CompanySchema {
    #[schema(rename = "_id")]
    id: Option<String>,
    #[schema(example = "ACME")]
    code: Option<String>,
    #[schema(example = "Acme Corporation")]
    name: Option<String>,
    #[schema(example = "Aerospace")]
    industry: Option<String>,
    #[schema(rename = "creationDate", value_type = Option<String>, format = DateTime)]
    creation_date: Option<String>,
}

/// Request body for `POST /users` and `PUT /users/{code}`.
///
/// Any further keys are stored as given. `_id` and `dataCreated` are ignored.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserPayloadSchema {
    /// Required on create.
    email: Option<String>,
    /// Stored only as a bcrypt hash.
    #[schema(format = Password)]
    password: Option<String>,
    code: Option<String>,
}

/// Request body for `POST /companies` and `PUT /companies/{code}`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CompanyPayloadSchema {
    code: Option<String>,
    name: Option<String>,
    industry: Option<String>,
}

/// Response body for `POST /login`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LoginResponseSchema {
    /// HS256 bearer token valid for 24 hours.
    token: String,
    /// The user, with `_id` echoed as `id`.
    user: UserSchema,
}
