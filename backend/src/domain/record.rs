//! Shared pieces of the typed user and company records: the lookup key and
//! the helpers that lift reserved fields out of a raw [`Document`].

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::{Document, DocumentId, fields};

/// External-facing lookup key stored in the `code` field.
///
/// Users and companies share the key space: a user whose `code` equals a
/// company's `code` is associated with that company.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordCode(String);

impl RecordCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecordCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&RecordCode> for Value {
    fn from(value: &RecordCode) -> Self {
        Value::String(value.0.clone())
    }
}

/// A stored document whose reserved fields have the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordDecodeError {
    #[error("field `{field}` must be a string")]
    NotText { field: &'static str },
    #[error("field `{field}` must be an RFC 3339 timestamp")]
    BadTimestamp { field: &'static str },
}

/// Remove a string field. `null` and absence both read as `None`.
pub(crate) fn take_text(
    document: &mut Document,
    field: &'static str,
) -> Result<Option<String>, RecordDecodeError> {
    match document.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(_) => Err(RecordDecodeError::NotText { field }),
    }
}

pub(crate) fn take_id(document: &mut Document) -> Result<Option<DocumentId>, RecordDecodeError> {
    take_text(document, fields::ID).map(|id| id.map(DocumentId::new))
}

pub(crate) fn take_timestamp(
    document: &mut Document,
    field: &'static str,
) -> Result<Option<DateTime<Utc>>, RecordDecodeError> {
    let Some(raw) = take_text(document, field)? else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(&raw)
        .map(|parsed| Some(parsed.with_timezone(&Utc)))
        .map_err(|_| RecordDecodeError::BadTimestamp { field })
}

/// Stored representation of a creation timestamp.
pub(crate) fn timestamp_value(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Drop fields a client may never set directly.
pub(crate) fn strip_immutable(document: &mut Document, created_field: &str) {
    document.remove(fields::ID);
    document.remove(created_field);
}
