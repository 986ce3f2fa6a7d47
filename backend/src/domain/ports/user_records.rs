//! Driving port for user record management.

use async_trait::async_trait;

use crate::domain::{DocumentId, Error, NewUser, RecordCode, UserPatch, UserView};

/// Whether an update to an existing user changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserUpdateOutcome {
    Modified,
    Unchanged,
}

/// Domain use-case port for users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRecords: Send + Sync {
    /// Every user, without passwords.
    async fn list_users(&self) -> Result<Vec<UserView>, Error>;

    /// Create a user after checking the email is not taken.
    async fn create_user(&self, user: NewUser) -> Result<UserView, Error>;

    /// Profile of the user a verified token was issued for.
    async fn profile(&self, id: &DocumentId) -> Result<UserView, Error>;

    async fn get_user(&self, code: &RecordCode) -> Result<UserView, Error>;

    async fn update_user(
        &self,
        code: &RecordCode,
        patch: UserPatch,
    ) -> Result<UserUpdateOutcome, Error>;

    async fn delete_user(&self, code: &RecordCode) -> Result<(), Error>;
}
