//! Storage-boundary primitives shared by the document store port and the
//! record services.
//!
//! Records cross the store boundary as loosely typed JSON objects
//! ([`Document`]). Everything above the port works with the typed records in
//! [`crate::domain::user`] and [`crate::domain::company`].

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored record as a JSON object.
pub type Document = Map<String, Value>;

/// Reserved field names understood by the record services.
pub mod fields {
    /// Store-assigned identifier.
    pub const ID: &str = "_id";
    /// External-facing lookup key shared by users and companies.
    pub const CODE: &str = "code";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    /// User creation timestamp.
    pub const USER_CREATED: &str = "dataCreated";
    /// Company creation timestamp.
    pub const COMPANY_CREATED: &str = "creationDate";
}

/// Opaque store-assigned identifier.
///
/// # Examples
/// ```
/// use recordkeeper::domain::DocumentId;
///
/// let id = DocumentId::new("64b0c0ffee");
/// assert_eq!(id.as_str(), "64b0c0ffee");
/// assert_eq!(id.to_string(), "64b0c0ffee");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DocumentId> for Value {
    fn from(value: DocumentId) -> Self {
        Value::String(value.0)
    }
}

/// Named collections held by the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Companies,
}

impl Collection {
    /// Collection name as stored.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Users => "user",
            Self::Companies => "company",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conjunction of exact-match clauses.
///
/// A `null` clause value also matches documents where the field is absent,
/// mirroring document-database query semantics. An empty filter matches
/// every document.
///
/// # Examples
/// ```
/// use recordkeeper::domain::{Document, Filter};
/// use serde_json::json;
///
/// let doc: Document = json!({ "code": "ACME", "name": "Acme" })
///     .as_object()
///     .cloned()
///     .unwrap_or_default();
/// assert!(Filter::by("code", "ACME").matches(&doc));
/// assert!(Filter::by("industry", json!(null)).matches(&doc));
/// assert!(!Filter::by("code", "ACME").and("name", "Other").matches(&doc));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    /// Filter matching every document.
    #[must_use]
    pub fn everything() -> Self {
        Self::default()
    }

    /// Filter on a single field.
    pub fn by(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::everything().and(field, value)
    }

    /// Add another clause.
    #[must_use]
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    #[must_use]
    pub fn clauses(&self) -> &[(String, Value)] {
        &self.clauses
    }

    /// Whether `document` satisfies every clause.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.clauses
            .iter()
            .all(|(field, expected)| match document.get(field) {
                Some(actual) => actual == expected,
                None => expected.is_null(),
            })
    }
}

/// Set of fields removed from documents returned by a read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    excluded: Vec<String>,
}

impl Projection {
    /// Projection returning every field.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Projection dropping the named fields.
    pub fn excluding<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: fields.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn excludes(&self, field: &str) -> bool {
        self.excluded.iter().any(|name| name == field)
    }

    /// Apply the projection to an owned document.
    #[must_use]
    pub fn apply(&self, mut document: Document) -> Document {
        for field in &self.excluded {
            document.remove(field);
        }
        document
    }
}

/// Result of an insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

/// Result of a single-document partial update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Result of a single-document delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}
