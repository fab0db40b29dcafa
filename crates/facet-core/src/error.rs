//! Error types for `facet-core`.

use thiserror::Error;

use crate::kind::ValueType;

#[derive(Debug, Error)]
pub enum Error {
  /// A raw value does not fit its column type. Never escapes
  /// [`crate::normalize::normalize`]; the value is stored as empty instead.
  #[error("invalid {kind} value: {value:?}")]
  InvalidValue { kind: ValueType, value: String },

  #[error("document not found: {0}")]
  UnknownDocument(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
