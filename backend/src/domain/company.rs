//! Company record model.
//!
//! Companies carry `code`, optional `name` and `industry`, a `creationDate`
//! stamp and any further attributes a client supplies. No field is required.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::document::{Document, DocumentId, fields};
use super::record::{RecordDecodeError, strip_immutable, take_id, take_timestamp, timestamp_value};

/// A company submitted for creation. Client-supplied `_id` and
/// `creationDate` are discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCompany {
    attributes: Document,
}

impl NewCompany {
    #[must_use]
    pub fn from_document(mut body: Document) -> Self {
        strip_immutable(&mut body, fields::COMPANY_CREATED);
        Self { attributes: body }
    }

    pub fn code(&self) -> Option<&str> {
        self.attributes.get(fields::CODE).and_then(|code| code.as_str())
    }

    #[must_use]
    pub fn into_document(self, created_at: DateTime<Utc>) -> Document {
        let mut document = self.attributes;
        document.insert(fields::COMPANY_CREATED.into(), timestamp_value(created_at));
        document
    }
}

/// A company as read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    id: Option<DocumentId>,
    created_at: Option<DateTime<Utc>>,
    attributes: Document,
}

impl CompanyRecord {
    pub fn from_document(mut document: Document) -> Result<Self, RecordDecodeError> {
        let id = take_id(&mut document)?;
        let created_at = take_timestamp(&mut document, fields::COMPANY_CREATED)?;
        Ok(Self {
            id,
            created_at,
            attributes: document,
        })
    }

    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    #[must_use]
    pub fn into_view(self) -> CompanyView {
        CompanyView {
            id: self.id,
            created_at: self.created_at,
            attributes: self.attributes,
        }
    }
}

/// Company as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyView {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<DocumentId>,
    #[serde(rename = "creationDate", skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    attributes: Document,
}

impl CompanyView {
    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn attributes(&self) -> &Document {
        &self.attributes
    }
}

/// Partial update of a company with `_id` and `creationDate` removed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyPatch {
    changes: Document,
}

impl CompanyPatch {
    #[must_use]
    pub fn from_document(mut body: Document) -> Self {
        strip_immutable(&mut body, fields::COMPANY_CREATED);
        Self { changes: body }
    }

    #[must_use]
    pub fn into_changes(self) -> Document {
        self.changes
    }
}
