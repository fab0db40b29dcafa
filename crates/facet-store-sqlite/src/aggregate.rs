//! The distinct-value `group_concat` aggregate.
//!
//! Replaces SQLite's built-in `group_concat` on every store connection.
//! Stored multi-values are split into their sub-values, which are collected
//! in the order the rows arrive; when the group is finished duplicates are
//! removed, keeping each value's first occurrence, and the rest are joined.

use std::collections::HashSet;

use facet_core::values::MultiValue;
use rusqlite::{
  Connection,
  functions::{Aggregate, Context, FunctionFlags},
};

/// SQL name the aggregate is registered under.
pub const FUNCTION_NAME: &str = "group_concat";

/// Separator used when the query does not pass one.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Accumulator for one group.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DistinctConcat {
  values:    Vec<String>,
  separator: Option<String>,
}

impl DistinctConcat {
  pub fn new() -> Self { Self::default() }

  /// Add the sub-values of one stored value. A given separator replaces the
  /// one remembered from earlier steps; the last one seen is used for the
  /// whole group.
  pub fn step(&mut self, value: &str, separator: Option<&str>) {
    if let Some(separator) = separator {
      self.separator = Some(separator.to_owned());
    }
    self
      .values
      .extend(MultiValue::from_stored(value).iter().map(str::to_owned));
  }

  pub fn is_empty(&self) -> bool { self.values.is_empty() }

  /// Distinct values in first-seen order, joined with the separator.
  pub fn finish(self) -> String {
    let mut seen = HashSet::new();
    let distinct: Vec<String> = self
      .values
      .into_iter()
      .filter(|v| seen.insert(v.clone()))
      .collect();
    distinct.join(self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR))
  }
}

/// The SQLite-facing side of [`DistinctConcat`].
struct GroupConcat;

impl Aggregate<DistinctConcat, Option<String>> for GroupConcat {
  fn init(&self, _: &mut Context<'_>) -> rusqlite::Result<DistinctConcat> {
    Ok(DistinctConcat::new())
  }

  fn step(&self, ctx: &mut Context<'_>, acc: &mut DistinctConcat) -> rusqlite::Result<()> {
    let separator: Option<String> = if ctx.len() > 1 { ctx.get(1)? } else { None };
    // NULL values are skipped, as with the built-in.
    if let Some(value) = ctx.get::<Option<String>>(0)? {
      acc.step(&value, separator.as_deref());
    }
    Ok(())
  }

  fn finalize(
    &self,
    _: &mut Context<'_>,
    acc: Option<DistinctConcat>,
  ) -> rusqlite::Result<Option<String>> {
    Ok(acc.filter(|acc| !acc.is_empty()).map(DistinctConcat::finish))
  }
}

/// Register the aggregate on `conn` in its one- and two-argument forms.
pub fn register(conn: &Connection) -> rusqlite::Result<()> {
  let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;
  conn.create_aggregate_function(FUNCTION_NAME, 1, flags, GroupConcat)?;
  conn.create_aggregate_function(FUNCTION_NAME, 2, flags, GroupConcat)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn concat(values: &[&str], separator: Option<&str>) -> String {
    let mut acc = DistinctConcat::new();
    for value in values {
      acc.step(value, separator);
    }
    acc.finish()
  }

  #[test]
  fn removes_duplicates_keeping_first_occurrence() {
    assert_eq!(concat(&["x", "y", "x", "z"], Some(",")), "x,y,z");
    assert_eq!(concat(&["b", "a", "b", "a", "c"], Some(" | ")), "b | a | c");
  }

  #[test]
  fn defaults_to_comma() {
    assert_eq!(concat(&["a", "b"], None), "a,b");
  }

  #[test]
  fn multi_values_are_split_before_dedup() {
    assert_eq!(concat(&["rust\nsql", "sql\nweb"], Some(",")), "rust,sql,web");
    assert_eq!(concat(&["a\n\n b ", "", "b"], None), "a,b");
  }

  #[test]
  fn last_separator_wins() {
    let mut acc = DistinctConcat::new();
    acc.step("a", Some(";"));
    acc.step("b", Some("/"));
    acc.step("c", None);
    assert_eq!(acc.finish(), "a/b/c");
  }

  #[test]
  fn sql_aggregate_dedups_in_row_order() {
    let conn = Connection::open_in_memory().unwrap();
    register(&conn).unwrap();

    let joined: String = conn
      .query_row(
        "SELECT group_concat(v, ',') FROM (
           SELECT 'x' AS v UNION ALL SELECT 'y' UNION ALL SELECT 'x' UNION ALL SELECT 'z'
         )",
        [],
        |row| row.get(0),
      )
      .unwrap();
    assert_eq!(joined, "x,y,z");
  }

  #[test]
  fn sql_aggregate_single_argument_and_nulls() {
    let conn = Connection::open_in_memory().unwrap();
    register(&conn).unwrap();

    let joined: String = conn
      .query_row(
        "SELECT group_concat(v) FROM (
           SELECT 'a' AS v UNION ALL SELECT NULL UNION ALL SELECT 'a' UNION ALL SELECT 'b'
         )",
        [],
        |row| row.get(0),
      )
      .unwrap();
    assert_eq!(joined, "a,b");

    let empty: Option<String> = conn
      .query_row("SELECT group_concat(v) FROM (SELECT 'a' AS v) WHERE 0", [], |row| {
        row.get(0)
      })
      .unwrap();
    assert_eq!(empty, None);
  }
}
