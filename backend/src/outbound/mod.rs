//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **persistence**: the document store behind the record services.
//! - **security**: bcrypt password hashing and JWT bearer tokens.
//!
//! Adapters are thin translators between domain types and the libraries
//! they wrap. They contain no business logic.

pub mod persistence;
pub mod security;
