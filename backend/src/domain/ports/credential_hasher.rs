//! Driven port for one-way password hashing.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Failures raised while producing a password hash.
    pub enum CredentialHashError {
        /// The hashing backend rejected the input or its parameters.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Salted one-way hashing of user passwords.
///
/// Implementations must never log the plaintext.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted digest of `plaintext`.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialHashError>;

    /// Whether `plaintext` matches `hash`. A malformed hash yields `false`.
    fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool;
}
