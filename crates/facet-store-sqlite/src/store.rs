//! [`SqliteStore`], the SQLite implementation of [`AttributeStore`].

use std::{
  fs,
  path::{Path, PathBuf},
  time::Duration,
};

use rusqlite::{Connection, OptionalExtension as _};

use facet_core::{
  document::{AttributeRow, Document, Entry, GroupedValues},
  store::{AttributeQuery, AttributeStore, Grouping},
};

use crate::{
  Error, Result, aggregate,
  schema::{CONNECTION_SETUP, DROP, SCHEMA},
};

/// File name of the store inside the cache directory.
pub const STORE_FILE: &str = "facet.sqlite";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Facet metadata store backed by a single SQLite file.
///
/// The connection is closed when the store is dropped.
pub struct SqliteStore {
  pub(crate) conn: Connection,
}

impl SqliteStore {
  /// Open the store at `path`, creating the schema when the file is missing
  /// or empty.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let init = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

    let conn = Connection::open(path).map_err(|source| {
      tracing::warn!("failed to open store at {}: {source}", path.display());
      Error::Unavailable { path: path.to_owned(), source }
    })?;

    Self::with_connection(conn, init)
  }

  /// Open `facet.sqlite` inside `cache_dir`, creating the directory first.
  pub fn open_in_cache(cache_dir: impl AsRef<Path>) -> Result<Self> {
    let cache_dir = cache_dir.as_ref();
    fs::create_dir_all(cache_dir)?;
    Self::open(store_path(cache_dir))
  }

  /// Open an empty in-memory store.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory().map_err(|source| Error::Unavailable {
      path: PathBuf::from(":memory:"),
      source,
    })?;
    Self::with_connection(conn, true)
  }

  fn with_connection(conn: Connection, init: bool) -> Result<Self> {
    conn.execute_batch(CONNECTION_SETUP)?;
    aggregate::register(&conn)?;

    let store = Self { conn };
    if init {
      store.ensure_schema()?;
    }
    Ok(store)
  }

  /// Create any missing tables and indexes.
  pub fn ensure_schema(&self) -> Result<()> {
    tracing::debug!("initialising store schema");
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  /// Drop all documents and attributes and re-create the empty schema.
  pub fn reset(&self) -> Result<()> {
    tracing::debug!("resetting store");
    self.conn.execute_batch(DROP)?;
    self.ensure_schema()
  }

  /// How long a statement waits for another connection's lock before
  /// failing with [`Error::Busy`].
  pub fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
    self.conn.busy_timeout(timeout)?;
    Ok(())
  }
}

/// Location of the store file inside `cache_dir`.
pub fn store_path(cache_dir: &Path) -> PathBuf { cache_dir.join(STORE_FILE) }

// ─── Statements ──────────────────────────────────────────────────────────────
//
// Free functions over `&Connection` so they run the same on the plain
// connection and inside a transaction.

fn upsert_document(conn: &Connection, page: &str, title: Option<&str>) -> Result<i64> {
  let id = conn.query_row(
    "INSERT INTO documents (page, title) VALUES (?1, ?2)
     ON CONFLICT (page) DO UPDATE SET title = COALESCE(excluded.title, documents.title)
     RETURNING id",
    rusqlite::params![page, title],
    |row| row.get(0),
  )?;
  Ok(id)
}

fn upsert_attribute(conn: &Connection, document_id: i64, key: &str, value: &str) -> Result<()> {
  let key = key.to_lowercase();

  let updated = conn.execute(
    "UPDATE attributes SET value = ?3 WHERE document_id = ?1 AND key = ?2",
    rusqlite::params![document_id, key, value],
  )?;

  if updated == 0 {
    conn.execute(
      "INSERT INTO attributes (document_id, key, value) VALUES (?1, ?2, ?3)",
      rusqlite::params![document_id, key, value],
    )?;
  }
  Ok(())
}

fn row_to_document(row: &rusqlite::Row<'_>) -> rusqlite::Result<Document> {
  Ok(Document {
    id:    row.get(0)?,
    page:  row.get(1)?,
    title: row.get(2)?,
  })
}

/// WHERE clause over `documents d JOIN attributes a` for `query`.
///
/// Parameters `?1`–`?3` are page, key and value; `extra` conditions are
/// appended verbatim.
fn where_clause(query: &AttributeQuery, extra: &[&'static str]) -> String {
  let mut conds: Vec<&'static str> = vec![];
  if query.page.is_some() {
    conds.push("d.page = ?1");
  }
  if query.key.is_some() {
    conds.push("a.key = ?2");
  }
  if query.value.is_some() {
    conds.push("a.value = ?3");
  }
  conds.extend_from_slice(extra);

  if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  }
}

/// Bound values for `?1`–`?5` of a query built with [`where_clause`].
struct QueryParams {
  page:   Option<String>,
  key:    Option<String>,
  value:  Option<String>,
  limit:  i64,
  offset: i64,
}

impl From<&AttributeQuery> for QueryParams {
  fn from(query: &AttributeQuery) -> Self {
    Self {
      page:   query.page.clone(),
      key:    query.key.as_deref().map(str::to_lowercase),
      value:  query.value.clone(),
      // SQLite treats a negative LIMIT as unbounded.
      limit:  query.limit.map_or(-1, |l| l as i64),
      offset: query.offset.unwrap_or(0) as i64,
    }
  }
}

// ─── AttributeStore impl ─────────────────────────────────────────────────────

impl AttributeStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  fn upsert_document(&self, page: &str, title: Option<&str>) -> Result<i64> {
    upsert_document(&self.conn, page, title)
  }

  fn upsert_attribute(&self, document_id: i64, key: &str, value: &str) -> Result<()> {
    upsert_attribute(&self.conn, document_id, key, value)
  }

  fn save_entry(&self, entry: &Entry) -> Result<Document> {
    // Rolled back on drop unless committed.
    let tx = self.conn.unchecked_transaction()?;

    let document_id = upsert_document(&tx, &entry.page, entry.title.as_deref())?;
    for attribute in &entry.attributes {
      upsert_attribute(&tx, document_id, &attribute.column.key, &attribute.values.to_stored())?;
    }
    tx.commit()?;

    tracing::debug!(
      "saved {} attributes for {}",
      entry.attributes.len(),
      entry.page
    );

    self
      .get_document(&entry.page)?
      .ok_or_else(|| facet_core::Error::UnknownDocument(entry.page.clone()).into())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  fn get_document(&self, page: &str) -> Result<Option<Document>> {
    let document = self
      .conn
      .query_row(
        "SELECT id, page, title FROM documents WHERE page = ?1",
        rusqlite::params![page],
        row_to_document,
      )
      .optional()?;
    Ok(document)
  }

  fn list_documents(&self) -> Result<Vec<Document>> {
    let mut stmt = self
      .conn
      .prepare("SELECT id, page, title FROM documents ORDER BY page")?;
    let documents = stmt
      .query_map([], row_to_document)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(documents)
  }

  fn query_attributes(&self, query: &AttributeQuery) -> Result<Vec<AttributeRow>> {
    let p = QueryParams::from(query);
    let where_clause = where_clause(query, &[]);

    let sql = format!(
      "SELECT a.id, a.document_id, d.page, a.key, a.value
       FROM attributes a
       JOIN documents d ON d.id = a.document_id
       {where_clause}
       ORDER BY d.page, a.id
       LIMIT ?4 OFFSET ?5"
    );

    let mut stmt = self.conn.prepare(&sql)?;
    let rows = stmt
      .query_map(
        rusqlite::params![p.page, p.key, p.value, p.limit, p.offset],
        |row| {
          Ok(AttributeRow {
            id:          row.get(0)?,
            document_id: row.get(1)?,
            page:        row.get(2)?,
            key:         row.get(3)?,
            value:       row.get(4)?,
          })
        },
      )?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
  }

  fn aggregate(
    &self,
    query: &AttributeQuery,
    grouping: Grouping,
    separator: &str,
  ) -> Result<Vec<GroupedValues>> {
    let p = QueryParams::from(query);
    let where_clause = where_clause(query, &["a.value != ''"]);
    let group = match grouping {
      Grouping::ByDocument => "page",
      Grouping::ByKey => "key",
    };

    // The inner ORDER BY fixes the order rows reach the aggregate, which is
    // the order distinct values come out in.
    let sql = format!(
      "SELECT {group}, {func}(value, ?6)
       FROM (
         SELECT d.page AS page, a.key AS key, a.value AS value
         FROM attributes a
         JOIN documents d ON d.id = a.document_id
         {where_clause}
         ORDER BY {group}, d.page, a.id
         LIMIT ?4 OFFSET ?5
       )
       GROUP BY {group}
       ORDER BY {group}",
      func = aggregate::FUNCTION_NAME,
    );

    let mut stmt = self.conn.prepare(&sql)?;
    let groups = stmt
      .query_map(
        rusqlite::params![p.page, p.key, p.value, p.limit, p.offset, separator],
        |row| {
          Ok(GroupedValues {
            group: row.get(0)?,
            value: row.get(1)?,
          })
        },
      )?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(groups)
  }
}
