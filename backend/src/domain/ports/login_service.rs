//! Driving port for password login.
//!
//! Inbound adapters call this port to exchange credentials for a session
//! token without knowing how users are stored or how tokens are signed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify the credentials and issue a token for the matching user.
    ///
    /// Fails with `InvalidCredentials` when no user matches or the password is
    /// wrong, and with `AuthenticationError` when the stored user cannot be
    /// evaluated.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
