//! SQL schema for the Facet SQLite store.
//!
//! Executed when a store file is new or empty, and again by `reset` after
//! the tables are dropped.

/// Per-connection settings; run on every open.
pub const CONNECTION_SETUP: &str = "
PRAGMA foreign_keys = ON;
";

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS documents (
    id    INTEGER PRIMARY KEY,
    page  TEXT NOT NULL,
    title TEXT
);

-- One row per (document, key); multi-valued attributes keep their
-- sub-values newline-joined in `value`.
CREATE TABLE IF NOT EXISTS attributes (
    id          INTEGER PRIMARY KEY,
    document_id INTEGER NOT NULL REFERENCES documents(id),
    key         TEXT NOT NULL,
    value       TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS documents_page_idx      ON documents(page);
CREATE INDEX        IF NOT EXISTS attributes_key_idx      ON attributes(key);
CREATE INDEX        IF NOT EXISTS attributes_document_idx ON attributes(document_id);

PRAGMA user_version = 1;
";

/// Drops everything `SCHEMA` creates.
pub const DROP: &str = "
DROP TABLE IF EXISTS attributes;
DROP TABLE IF EXISTS documents;
";
