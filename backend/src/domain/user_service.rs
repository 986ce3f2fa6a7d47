//! User record and login service.
//!
//! Implements the [`UserRecords`] and [`LoginService`] driving ports on top of
//! the document store, the credential hasher and the token issuer. Storage
//! faults are logged here and surface to callers only as stable messages.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::{
    CredentialHasher, DocumentStore, LoginService, TokenIssuer, UserRecords, UserUpdateOutcome,
};
use crate::domain::record_service_support::logged;
use crate::domain::{
    Collection, Document, DocumentId, Error, Filter, LoginCredentials, LoginOutcome, NewUser,
    Projection, RecordCode, UserPatch, UserRecord, UserView, fields,
};

const USER_NOT_FOUND: &str = "User not found";
const DUPLICATE_EMAIL: &str = "User with the same email already exists";
const CREATE_NOT_ACKNOWLEDGED: &str = "User creation failed";
const CREATE_ERROR: &str = "User creation error";
const INVALID_CREDENTIALS: &str = "Invalid credentials";
const AUTHENTICATION_ERROR: &str = "Authentication error";
const LIST_ERROR: &str = "Error listing users";
const PROFILE_ERROR: &str = "Error getting user profile";
const UPDATE_ERROR: &str = "Error updating the user";
const DELETE_ERROR: &str = "Error deleting the user";

/// User service implementing the user and login driving ports.
pub struct UserService<S, H, T> {
    store: Arc<S>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<S, H, T> UserService<S, H, T> {
    pub fn new(store: Arc<S>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<S, H, T> UserService<S, H, T>
where
    S: DocumentStore,
    H: CredentialHasher,
    T: TokenIssuer,
{
    fn without_password() -> Projection {
        Projection::excluding([fields::PASSWORD])
    }

    fn profile_projection() -> Projection {
        Projection::excluding([fields::PASSWORD, fields::ID])
    }

    fn into_view(
        operation: &'static str,
        document: Document,
        on_error: fn() -> Error,
    ) -> Result<UserView, Error> {
        UserRecord::from_document(document)
            .map(UserRecord::into_view)
            .map_err(logged(operation, on_error))
    }

    /// Single profile lookup shared by the by-token and by-code reads.
    async fn find_profile(&self, operation: &'static str, filter: Filter) -> Result<UserView, Error> {
        let document = self
            .store
            .find_one(Collection::Users, &filter, &Self::profile_projection())
            .await
            .map_err(logged(operation, || Error::storage_failure(PROFILE_ERROR)))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        Self::into_view(operation, document, || Error::storage_failure(PROFILE_ERROR))
    }
}

#[async_trait]
impl<S, H, T> UserRecords for UserService<S, H, T>
where
    S: DocumentStore,
    H: CredentialHasher,
    T: TokenIssuer,
{
    async fn list_users(&self) -> Result<Vec<UserView>, Error> {
        let documents = self
            .store
            .find_many(Collection::Users, &Filter::everything(), &Self::without_password())
            .await
            .map_err(logged("list_users", || Error::storage_failure(LIST_ERROR)))?;
        documents
            .into_iter()
            .map(|document| {
                Self::into_view("list_users", document, || Error::storage_failure(LIST_ERROR))
            })
            .collect()
    }

    async fn create_user(&self, user: NewUser) -> Result<UserView, Error> {
        let create_error = || Error::create_failed(CREATE_ERROR);
        let existing = self
            .store
            .find_one(
                Collection::Users,
                &Filter::by(fields::EMAIL, user.email().as_str()),
                &Self::without_password(),
            )
            .await
            .map_err(logged("create_user", create_error))?;
        if existing.is_some() {
            debug!("user creation rejected: email already registered");
            return Err(Error::duplicate_email(DUPLICATE_EMAIL));
        }

        let password_hash = user
            .password()
            .map(|password| self.hasher.hash(password))
            .transpose()
            .map_err(logged("create_user", create_error))?;
        let document = user.into_document(password_hash, self.clock.utc());

        let outcome = self
            .store
            .insert_one(Collection::Users, document)
            .await
            .map_err(logged("create_user", create_error))?;
        if !outcome.acknowledged {
            warn!("user insert was not acknowledged");
            return Err(Error::create_failed(CREATE_NOT_ACKNOWLEDGED));
        }

        let created = self
            .store
            .find_one(
                Collection::Users,
                &Filter::by(fields::ID, outcome.inserted_id.clone()),
                &Self::without_password(),
            )
            .await
            .map_err(logged("create_user", create_error))?
            .ok_or_else(|| {
                logged("create_user", create_error)(format!(
                    "inserted user {} could not be read back",
                    outcome.inserted_id
                ))
            })?;
        debug!(id = %outcome.inserted_id, "user created");
        Self::into_view("create_user", created, create_error)
    }

    async fn profile(&self, id: &DocumentId) -> Result<UserView, Error> {
        self.find_profile("profile", Filter::by(fields::ID, id.clone()))
            .await
    }

    async fn get_user(&self, code: &RecordCode) -> Result<UserView, Error> {
        self.find_profile("get_user", Filter::by(fields::CODE, code))
            .await
    }

    async fn update_user(
        &self,
        code: &RecordCode,
        patch: UserPatch,
    ) -> Result<UserUpdateOutcome, Error> {
        let update_error = || Error::storage_failure(UPDATE_ERROR);
        let password_hash = patch
            .password()
            .map(|password| self.hasher.hash(password))
            .transpose()
            .map_err(logged("update_user", update_error))?;

        let outcome = self
            .store
            .update_one(
                Collection::Users,
                &Filter::by(fields::CODE, code),
                patch.into_changes(password_hash),
            )
            .await
            .map_err(logged("update_user", update_error))?;

        if outcome.matched_count == 0 {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        if outcome.modified_count == 0 {
            debug!(%code, "user update changed nothing");
            Ok(UserUpdateOutcome::Unchanged)
        } else {
            debug!(%code, "user updated");
            Ok(UserUpdateOutcome::Modified)
        }
    }

    async fn delete_user(&self, code: &RecordCode) -> Result<(), Error> {
        let outcome = self
            .store
            .delete_one(Collection::Users, &Filter::by(fields::CODE, code))
            .await
            .map_err(logged("delete_user", || Error::storage_failure(DELETE_ERROR)))?;
        if outcome.deleted_count == 0 {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        debug!(%code, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<S, H, T> LoginService for UserService<S, H, T>
where
    S: DocumentStore,
    H: CredentialHasher,
    T: TokenIssuer,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let auth_error = || Error::authentication_error(AUTHENTICATION_ERROR);
        let Some(document) = self
            .store
            .find_one(
                Collection::Users,
                &Filter::by(fields::EMAIL, credentials.email()),
                &Projection::all(),
            )
            .await
            .map_err(logged("login", auth_error))?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        };

        let record = UserRecord::from_document(document).map_err(logged("login", auth_error))?;
        let Some(password_hash) = record.password_hash() else {
            warn!("login attempted for a user without a stored password");
            return Err(auth_error());
        };
        if !self.hasher.verify(credentials.password(), password_hash) {
            debug!("login rejected: password mismatch");
            return Err(Error::invalid_credentials(INVALID_CREDENTIALS));
        }

        let Some(id) = record.id().cloned() else {
            return Err(logged("login", auth_error)("stored user has no _id"));
        };
        let token = self
            .tokens
            .issue(&id)
            .map_err(logged("login", auth_error))?;
        debug!(%id, "login succeeded");
        Ok(LoginOutcome {
            token,
            user: record.into_view().with_login_id(),
        })
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
