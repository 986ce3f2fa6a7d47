//! User record model.
//!
//! Users are free-form documents with a handful of reserved fields:
//! `_id`, `email`, `password`, `code` and `dataCreated`. The types here lift
//! those fields out of the raw [`Document`] so the service layer never
//! handles a password outside [`NewUser`] and [`UserPatch`], and so no
//! response type can carry one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use zeroize::Zeroizing;

use super::auth::PasswordHash;
use super::document::{Document, DocumentId, fields};
use super::record::{
    RecordDecodeError, strip_immutable, take_id, take_text, take_timestamp, timestamp_value,
};

/// Validation errors raised while reading a user payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("email is required")]
    MissingEmail,
    #[error("email must be a string")]
    EmailNotText,
    #[error("password must be a string")]
    PasswordNotText,
}

/// Unique login address of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn take_password(
    document: &mut Document,
) -> Result<Option<Zeroizing<String>>, UserValidationError> {
    match document.remove(fields::PASSWORD) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(password)) => Ok(Some(Zeroizing::new(password))),
        Some(_) => Err(UserValidationError::PasswordNotText),
    }
}

/// A user submitted for creation.
///
/// ## Invariants
/// - `email` is a non-blank string.
/// - Client-supplied `_id` and `dataCreated` are discarded.
///
/// # Examples
/// ```
/// use recordkeeper::domain::NewUser;
/// use serde_json::json;
///
/// let body = json!({ "email": "a@x.io", "password": "pw", "_id": "forged" });
/// let user = NewUser::try_from_document(body.as_object().cloned().unwrap_or_default())
///     .expect("valid payload");
/// assert_eq!(user.email().as_str(), "a@x.io");
/// assert_eq!(user.password(), Some("pw"));
/// ```
#[derive(Clone)]
pub struct NewUser {
    email: Email,
    password: Option<Zeroizing<String>>,
    attributes: Document,
}

impl NewUser {
    pub fn try_from_document(mut body: Document) -> Result<Self, UserValidationError> {
        strip_immutable(&mut body, fields::USER_CREATED);
        let email = match body.remove(fields::EMAIL) {
            None | Some(Value::Null) => return Err(UserValidationError::MissingEmail),
            Some(Value::String(email)) if email.trim().is_empty() => {
                return Err(UserValidationError::MissingEmail);
            }
            Some(Value::String(email)) => Email(email),
            Some(_) => return Err(UserValidationError::EmailNotText),
        };
        let password = take_password(&mut body)?;
        Ok(Self {
            email,
            password,
            attributes: body,
        })
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().map(String::as_str)
    }

    /// Document to insert, carrying the hash in place of the plaintext.
    #[must_use]
    pub fn into_document(
        self,
        password_hash: Option<PasswordHash>,
        created_at: DateTime<Utc>,
    ) -> Document {
        let Self {
            email,
            attributes: mut document,
            ..
        } = self;
        document.insert(fields::EMAIL.into(), Value::String(email.0));
        if let Some(hash) = password_hash {
            document.insert(fields::PASSWORD.into(), Value::String(hash.into_inner()));
        }
        document.insert(fields::USER_CREATED.into(), timestamp_value(created_at));
        document
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("has_password", &self.password.is_some())
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// A user as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    id: Option<DocumentId>,
    password_hash: Option<PasswordHash>,
    created_at: Option<DateTime<Utc>>,
    attributes: Document,
}

impl UserRecord {
    /// Decode a stored document. Fields removed by a projection read as
    /// absent.
    pub fn from_document(mut document: Document) -> Result<Self, RecordDecodeError> {
        let id = take_id(&mut document)?;
        let password_hash = take_text(&mut document, fields::PASSWORD)?.map(PasswordHash::new);
        let created_at = take_timestamp(&mut document, fields::USER_CREATED)?;
        Ok(Self {
            id,
            password_hash,
            created_at,
            attributes: document,
        })
    }

    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    pub fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Response shape with the password hash dropped.
    #[must_use]
    pub fn into_view(self) -> UserView {
        UserView {
            id: self.id,
            login_id: None,
            created_at: self.created_at,
            attributes: self.attributes,
        }
    }
}

/// Password-free user as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<DocumentId>,
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    login_id: Option<DocumentId>,
    #[serde(rename = "dataCreated", skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    attributes: Document,
}

impl UserView {
    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn attributes(&self) -> &Document {
        &self.attributes
    }

    /// Echo the identifier under `id` as well, as the login response does.
    #[must_use]
    pub fn with_login_id(mut self) -> Self {
        self.attributes.remove("id");
        self.login_id = self.id.clone();
        self
    }
}

/// Partial update of a user.
///
/// ## Invariants
/// - Client-supplied `_id` and `dataCreated` are discarded.
/// - A supplied password is held until the service replaces it with a hash.
#[derive(Clone)]
pub struct UserPatch {
    password: Option<Zeroizing<String>>,
    changes: Document,
}

impl UserPatch {
    pub fn try_from_document(mut body: Document) -> Result<Self, UserValidationError> {
        strip_immutable(&mut body, fields::USER_CREATED);
        let password = take_password(&mut body)?;
        Ok(Self {
            password,
            changes: body,
        })
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref().map(String::as_str)
    }

    /// Field assignments to apply, with the hash in place of the plaintext.
    #[must_use]
    pub fn into_changes(self, password_hash: Option<PasswordHash>) -> Document {
        let mut changes = self.changes;
        if let Some(hash) = password_hash {
            changes.insert(fields::PASSWORD.into(), Value::String(hash.into_inner()));
        }
        changes
    }
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("has_password", &self.password.is_some())
            .field("changes", &self.changes)
            .finish()
    }
}
