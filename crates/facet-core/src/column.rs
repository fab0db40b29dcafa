//! Column declarations such as `Location_page` or `Tag_tags`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::ValueType;

/// A parsed column declaration.
///
/// Derived from the declared name every time it is needed; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
  /// Lower-cased key used for storage and lookup.
  pub key:   String,
  pub kind:  ValueType,
  /// Whether the column holds a sequence of values.
  pub multi: bool,
  /// The key as declared, for display.
  pub title: String,
}

impl ColumnSpec {
  /// Parse a declaration.
  ///
  /// A trailing `s` (either case) marks the column multi-valued and is
  /// dropped before the rest is split at the first underscore into key and
  /// type. Never fails: without an underscore the type is empty and the
  /// column is plain text.
  pub fn parse(declaration: &str) -> Self {
    let (rest, multi) = match declaration.strip_suffix(['s', 'S']) {
      Some(rest) => (rest, true),
      None => (declaration, false),
    };

    let (key, kind) = rest.split_once('_').unwrap_or((rest, ""));

    Self {
      key: key.to_lowercase(),
      kind: ValueType::parse(&kind.to_lowercase()),
      multi,
      title: key.to_owned(),
    }
  }
}

impl fmt::Display for ColumnSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.key)?;
    if self.kind != ValueType::Text {
      write!(f, "_{}", self.kind)?;
    }
    if self.multi {
      f.write_str("s")?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn single_valued_page_column() {
    let col = ColumnSpec::parse("Location_page");
    assert_eq!(col, ColumnSpec {
      key:   "location".into(),
      kind:  ValueType::Page,
      multi: false,
      title: "Location".into(),
    });
  }

  #[test]
  fn trailing_s_marks_multi() {
    let col = ColumnSpec::parse("Tag_tags");
    assert_eq!(col.key, "tag");
    assert_eq!(col.kind, ValueType::Tag);
    assert!(col.multi);
    assert_eq!(col.title, "Tag");
  }

  #[test]
  fn trailing_s_is_stripped_before_splitting() {
    // The trailing "s" belongs to the declaration, not to the type name.
    let col = ColumnSpec::parse("Tags_tag");
    assert!(!col.multi);
    assert_eq!(col.key, "tags");
    assert_eq!(col.kind, ValueType::Tag);

    let col = ColumnSpec::parse("AUTHORS");
    assert!(col.multi);
    assert_eq!(col.key, "author");
    assert_eq!(col.title, "AUTHOR");
  }

  #[test]
  fn missing_type_is_text() {
    let col = ColumnSpec::parse("Tags");
    assert_eq!(col.key, "tag");
    assert_eq!(col.kind, ValueType::Text);
    assert!(col.multi);
  }

  #[test]
  fn splits_at_first_underscore_only() {
    let col = ColumnSpec::parse("release_date_dt");
    assert_eq!(col.key, "release");
    assert_eq!(col.kind, ValueType::Other("date_dt".into()));
  }

  #[test]
  fn unicode_lowercasing() {
    let col = ColumnSpec::parse("Ärger_URL");
    assert_eq!(col.key, "ärger");
    assert_eq!(col.kind, ValueType::Url);
    assert_eq!(col.title, "Ärger");
  }

  #[test]
  fn display_rebuilds_declaration() {
    assert_eq!(ColumnSpec::parse("Photo_img80s").to_string(), "photo_img80s");
    assert_eq!(ColumnSpec::parse("Name").to_string(), "name");
  }
}
