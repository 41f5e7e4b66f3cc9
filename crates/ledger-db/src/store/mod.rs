//! # Document Store
//!
//! The minimal query interface repositories talk to.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    DocumentStore Semantics                              │
//! │                                                                         │
//! │  add(col, fields)         → new document, generated ID returned        │
//! │  set(col, id, fields)     → create or REPLACE (old fields are gone)    │
//! │  update(col, id, fields)  → MERGE top-level fields; NotFound if absent │
//! │  delete(col, id)          → remove; absent is not an error             │
//! │  get(col, id)             → one document or None                       │
//! │  list(col)                → all documents, store order                 │
//! │  find_eq(col, f, v)       → documents where field f == v, store order  │
//! │                                                                         │
//! │  Every call is one independent request. Nothing spans two calls        │
//! │  atomically, so query-then-mutate sequences can race.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`SqliteDocumentStore`] is the implementation shipped here. Other
//! backends plug in by implementing the trait and handing an
//! `Arc<dyn DocumentStore>` to the repositories.

pub mod sqlite;

use async_trait::async_trait;
use ledger_core::{CollectionPath, Document, StoredDocument};
use serde_json::Value;
use std::fmt::Debug;

use crate::error::DbResult;

pub use sqlite::SqliteDocumentStore;

/// A schema-less document database with equality queries.
#[async_trait]
pub trait DocumentStore: Send + Sync + Debug {
    /// Creates a document with a generated ID and returns the ID.
    async fn add(&self, collection: &CollectionPath, fields: &Document) -> DbResult<String>;

    /// Creates or fully replaces the document at `id`.
    async fn set(&self, collection: &CollectionPath, id: &str, fields: &Document) -> DbResult<()>;

    /// Merges `fields` into the existing document at `id`.
    ///
    /// Fields not named in `fields` are left untouched. Fails with
    /// `DbError::NotFound` if the document doesn't exist.
    async fn update(
        &self,
        collection: &CollectionPath,
        id: &str,
        fields: &Document,
    ) -> DbResult<()>;

    /// Deletes the document at `id`. Returns whether it existed.
    async fn delete(&self, collection: &CollectionPath, id: &str) -> DbResult<bool>;

    /// Reads a single document.
    async fn get(&self, collection: &CollectionPath, id: &str)
        -> DbResult<Option<StoredDocument>>;

    /// Reads every document in the collection.
    async fn list(&self, collection: &CollectionPath) -> DbResult<Vec<StoredDocument>>;

    /// Reads documents whose `field` equals `value`.
    ///
    /// `value` must be a scalar (string, number, bool or null).
    async fn find_eq(
        &self,
        collection: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> DbResult<Vec<StoredDocument>>;
}
