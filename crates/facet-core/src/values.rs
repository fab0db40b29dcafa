//! The ordered sequence of sub-values held by one attribute.
//!
//! On disk a multi-valued attribute is a single string with one sub-value per
//! line. Everything above the storage layer works with [`MultiValue`] instead
//! of splitting and joining strings by hand.

use serde::{Deserialize, Serialize};

/// Separator between sub-values in the stored representation.
pub const STORED_SEPARATOR: char = '\n';

/// An ordered list of non-empty sub-values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiValue(Vec<String>);

impl MultiValue {
  pub fn new() -> Self { Self::default() }

  /// Decode a stored value. Lines are trimmed and empty lines dropped;
  /// duplicates are kept.
  pub fn from_stored(stored: &str) -> Self {
    stored
      .split(STORED_SEPARATOR)
      .map(str::trim)
      .filter(|v| !v.is_empty())
      .map(str::to_owned)
      .collect()
  }

  /// Append a sub-value; empty strings are ignored.
  pub fn push(&mut self, value: impl Into<String>) {
    let value = value.into();
    if !value.is_empty() {
      self.0.push(value);
    }
  }

  /// Encode for storage.
  pub fn to_stored(&self) -> String {
    self.0.join(&STORED_SEPARATOR.to_string())
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = &str> { self.0.iter().map(String::as_str) }
}

impl FromIterator<String> for MultiValue {
  fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
    let mut values = Self::new();
    for value in iter {
      values.push(value);
    }
    values
  }
}

impl<'a> IntoIterator for &'a MultiValue {
  type Item = &'a String;
  type IntoIter = std::slice::Iter<'a, String>;

  fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decoding_skips_blank_lines_and_keeps_duplicates() {
    let values = MultiValue::from_stored("a\n b \n\n  \nb");
    assert_eq!(values.iter().collect::<Vec<_>>(), ["a", "b", "b"]);
  }

  #[test]
  fn encoding_joins_with_newlines() {
    let mut values = MultiValue::new();
    values.push("one");
    values.push("");
    values.push("two");
    assert_eq!(values.len(), 2);
    assert_eq!(values.to_stored(), "one\ntwo");
  }

  #[test]
  fn empty_stored_value_is_empty() {
    assert!(MultiValue::from_stored("").is_empty());
    assert_eq!(MultiValue::new().to_stored(), "");
  }
}
