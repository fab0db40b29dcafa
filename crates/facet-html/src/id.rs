//! Page identifier cleaning.

use once_cell::sync::Lazy;
use regex::Regex;

static INVALID: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_.:-]+").unwrap());
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").unwrap());
static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r":[:._-]+").unwrap());
static LEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[:._-]+").unwrap());
static TRAILING: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:._-]+$").unwrap());

/// Canonical form of a page identifier.
///
/// Lower-cased; `/` and `;` act as namespace separators; anything that is not
/// a letter, digit, `_`, `-`, `.` or `:` turns into `_`. Separator runs are
/// collapsed and stripped from both ends.
pub fn clean_id(raw: &str) -> String {
  let id = raw.trim().to_lowercase().replace(['/', ';'], ":");
  let id = INVALID.replace_all(&id, "_");
  let id = UNDERSCORES.replace_all(&id, "_");
  let id = SEPARATOR_RUN.replace_all(&id, ":");
  let id = LEADING.replace(&id, "");
  TRAILING.replace(&id, "").into_owned()
}
