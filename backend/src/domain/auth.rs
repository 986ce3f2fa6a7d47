//! Authentication primitives: login credentials, stored password hashes and
//! issued session tokens.
//!
//! Inbound adapters validate raw payload values through the constructors here
//! before calling the login port.

use std::fmt;

use zeroize::Zeroizing;

use super::user::UserView;

/// Reasons a login payload cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was absent or blank.
    #[error("email is required")]
    MissingEmail,
    /// The password key was absent or null.
    #[error("password is required")]
    MissingPassword,
}

/// Login credentials submitted by a client.
///
/// ## Invariants
/// - `email` is non-blank. It is not trimmed: lookups are exact.
/// - `password` may be empty; an empty password simply fails verification.
///
/// # Examples
/// ```
/// use recordkeeper::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(Some("a@x.io"), Some("s3cret")).unwrap();
/// assert_eq!(creds.email(), "a@x.io");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials from optional payload fields.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, LoginValidationError> {
        let email = email
            .filter(|value| !value.trim().is_empty())
            .ok_or(LoginValidationError::MissingEmail)?;
        let password = password.ok_or(LoginValidationError::MissingPassword)?;
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Salted one-way digest of a password as stored on a user record.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Signed bearer token handed to a client after login.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Successful login: the issued token and the password-free user.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: SessionToken,
    pub user: UserView,
}
