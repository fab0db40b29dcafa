//! Documents, their attribute rows and the write-side [`Entry`].

use serde::{Deserialize, Serialize};

use crate::{
  column::ColumnSpec,
  host::IdCleaner,
  normalize::normalize_column,
  values::MultiValue,
};

/// A page that owns attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  pub id:    i64,
  /// Unique page identifier.
  pub page:  String,
  pub title: Option<String>,
}

/// One stored (document, key, value) triple joined with its page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRow {
  pub id:          i64,
  pub document_id: i64,
  pub page:        String,
  pub key:         String,
  /// Newline-joined sub-values; see [`MultiValue`].
  pub value:       String,
}

impl AttributeRow {
  pub fn values(&self) -> MultiValue { MultiValue::from_stored(&self.value) }
}

/// One group of an aggregated query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedValues {
  /// The page or the key the rows were grouped by.
  pub group: String,
  /// Distinct values of the group joined with the requested separator.
  pub value: String,
}

/// A normalized attribute waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryAttribute {
  pub column: ColumnSpec,
  pub values: MultiValue,
}

/// Everything written for one page in a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
  pub page:       String,
  pub title:      Option<String>,
  pub attributes: Vec<EntryAttribute>,
}

impl Entry {
  pub fn new(page: impl Into<String>, title: Option<String>) -> Self {
    Self { page: page.into(), title, attributes: Vec::new() }
  }

  /// Parse `declaration`, normalize `raw` for it and add the result.
  ///
  /// A later declaration of the same key replaces the earlier one.
  pub fn add_raw(&mut self, declaration: &str, raw: &str, ids: &impl IdCleaner) -> &mut Self {
    let column = ColumnSpec::parse(declaration);
    let values = normalize_column(&column, raw, ids);
    self.attributes.retain(|a| a.column.key != column.key);
    self.attributes.push(EntryAttribute { column, values });
    self
  }
}
