//! Document persistence adapters.
//!
//! Adapters only translate between the store and the domain's
//! [`Document`](crate::domain::Document) boundary. No business rules live
//! here.

mod in_memory_document_store;

pub use in_memory_document_store::InMemoryDocumentStore;
