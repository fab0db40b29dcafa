//! The `AttributeStore` trait and supporting query types.
//!
//! Implemented by storage backends (e.g. `facet-store-sqlite`). The CLI and
//! any other front end talk to this abstraction.

use crate::document::{AttributeRow, Document, Entry, GroupedValues};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Filter for [`AttributeStore::query_attributes`] and
/// [`AttributeStore::aggregate`]. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct AttributeQuery {
  pub page:   Option<String>,
  /// Attribute key; compared lower-cased.
  pub key:    Option<String>,
  /// Exact stored value.
  pub value:  Option<String>,
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

impl AttributeQuery {
  pub fn page(page: impl Into<String>) -> Self {
    Self { page: Some(page.into()), ..Default::default() }
  }

  pub fn key(key: impl Into<String>) -> Self {
    Self { key: Some(key.into()), ..Default::default() }
  }
}

/// What rows are grouped by when aggregating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
  /// One group per page, combining the values of all its matching keys.
  ByDocument,
  /// One group per key, combining the values of all pages.
  ByKey,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a metadata store backend.
///
/// Documents are created on first write and never duplicated; each document
/// holds at most one row per key.
pub trait AttributeStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert the document if it is new and return its id. A given title
  /// replaces the stored one; `None` keeps it.
  fn upsert_document(&self, page: &str, title: Option<&str>) -> Result<i64, Self::Error>;

  /// Set the value of `key` on a document, replacing any previous value.
  fn upsert_attribute(&self, document_id: i64, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Write a document and all of its attributes atomically.
  fn save_entry(&self, entry: &Entry) -> Result<Document, Self::Error>;

  fn get_document(&self, page: &str) -> Result<Option<Document>, Self::Error>;

  /// All documents ordered by page.
  fn list_documents(&self) -> Result<Vec<Document>, Self::Error>;

  /// Matching rows ordered by page, then by insertion.
  fn query_attributes(&self, query: &AttributeQuery) -> Result<Vec<AttributeRow>, Self::Error>;

  /// Group matching rows and combine each group's values into their distinct
  /// values, in first-seen order, joined with `separator`.
  fn aggregate(
    &self,
    query: &AttributeQuery,
    grouping: Grouping,
    separator: &str,
  ) -> Result<Vec<GroupedValues>, Self::Error>;
}
