//! User and company record API.
//!
//! Users and companies are free-form JSON documents linked by a shared
//! `code`. Passwords are stored as bcrypt hashes and logins are answered
//! with a 24 hour HS256 bearer token.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
