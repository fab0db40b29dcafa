//! Error type for `facet-store-sqlite`.

use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] facet_core::Error),

  /// The store file could not be opened at all.
  #[error("failed to open store at {path:?}: {source}")]
  Unavailable {
    path:   PathBuf,
    #[source]
    source: rusqlite::Error,
  },

  /// Another connection holds the lock. Not retried.
  #[error("store is busy: {0}")]
  Busy(#[source] rusqlite::Error),

  #[error("database error: {0}")]
  Database(#[source] rusqlite::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for Error {
  fn from(err: rusqlite::Error) -> Self {
    match err.sqlite_error_code() {
      Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => Error::Busy(err),
      _ => Error::Database(err),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
