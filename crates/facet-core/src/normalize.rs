//! Canonicalization of raw input values before they are stored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
  Error, Result,
  column::ColumnSpec,
  host::IdCleaner,
  kind::ValueType,
  values::MultiValue,
};

static DATE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").unwrap());

static SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[a-z]+://").unwrap());

static EMAIL: Lazy<Regex> = Lazy::new(|| {
  Regex::new(
    r"^[-!#$%&'*+/=?^_`{|}~0-9A-Za-z]+(?:\.[-!#$%&'*+/=?^_`{|}~0-9A-Za-z]+)*@(?:[0-9A-Za-z](?:[-0-9A-Za-z]*[0-9A-Za-z])?\.)+[A-Za-z]{2,}$",
  )
  .unwrap()
});

/// Whether `candidate` is a syntactically valid e-mail address.
pub fn is_valid_email(candidate: &str) -> bool { EMAIL.is_match(candidate) }

/// Canonicalize `raw` for a column of type `kind`.
///
/// Returns an empty string for blank input and for values the type rejects.
pub fn normalize(raw: &str, kind: &ValueType, ids: &impl IdCleaner) -> String {
  match try_normalize(raw, kind, ids) {
    Ok(value) => value,
    Err(err) => {
      tracing::debug!("dropping value: {err}");
      String::new()
    }
  }
}

/// Like [`normalize`] but reports rejected values.
pub fn try_normalize(
  raw: &str,
  kind: &ValueType,
  ids: &impl IdCleaner,
) -> Result<String> {
  let value = raw.trim();
  if value.is_empty() {
    return Ok(String::new());
  }

  let invalid = || Error::InvalidValue {
    kind:  kind.clone(),
    value: value.to_owned(),
  };

  match kind {
    ValueType::Page | ValueType::NsPage => Ok(ids.clean_id(value)),
    ValueType::Date => normalize_date(value).ok_or_else(invalid),
    ValueType::Url if SCHEME.is_match(value) => Ok(value.to_owned()),
    ValueType::Url => Ok(format!("http://{value}")),
    ValueType::Mail => normalize_mail(value).ok_or_else(invalid),
    _ => Ok(value.to_owned()),
  }
}

/// `YYYY-M-D` to `YYYY-MM-DD`. Month and day are range-checked but the
/// calendar is not consulted, so `2023-02-31` passes.
fn normalize_date(value: &str) -> Option<String> {
  let caps = DATE.captures(value)?;
  let year: u32 = caps[1].parse().ok()?;
  let month: u32 = caps[2].parse().ok()?;
  let day: u32 = caps[3].parse().ok()?;

  if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
    return None;
  }
  Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// `<address> <display name>` from free text holding one address somewhere.
fn normalize_mail(value: &str) -> Option<String> {
  let mut address = None;
  let mut name = Vec::new();

  for token in value.split_whitespace() {
    if address.is_none() && is_valid_email(token) {
      address = Some(token.to_lowercase());
    } else {
      name.push(token);
    }
  }

  let address = address?;
  Some(format!("{address} {}", name.join(" ")).trim().to_owned())
}

/// Normalize the raw input of one column into its sub-values.
///
/// Multi-valued columns take a comma-separated list; each item is normalized
/// on its own and rejected items are dropped.
pub fn normalize_column(
  column: &ColumnSpec,
  raw: &str,
  ids: &impl IdCleaner,
) -> MultiValue {
  if column.multi {
    raw
      .split(',')
      .map(|item| normalize(item, &column.kind, ids))
      .collect()
  } else {
    std::iter::once(normalize(raw, &column.kind, ids)).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Lower-cases and swaps spaces for underscores.
  struct Ids;

  impl IdCleaner for Ids {
    fn clean_id(&self, raw: &str) -> String { raw.to_lowercase().replace(' ', "_") }
  }

  fn norm(raw: &str, kind: ValueType) -> String { normalize(raw, &kind, &Ids) }

  #[test]
  fn blank_is_empty_for_every_type() {
    for kind in [
      ValueType::Page,
      ValueType::NsPage,
      ValueType::Title,
      ValueType::Date,
      ValueType::Url,
      ValueType::Mail,
      ValueType::Tag,
      ValueType::Image { width: 40 },
      ValueType::Text,
      ValueType::Other("x".into()),
    ] {
      assert_eq!(norm("  ", kind.clone()), "", "{kind:?}");
      assert_eq!(norm("", kind), "");
    }
  }

  #[test]
  fn pages_are_cleaned() {
    assert_eq!(norm("  Some Page ", ValueType::Page), "some_page");
    assert_eq!(norm("Sub Page", ValueType::NsPage), "sub_page");
  }

  #[test]
  fn dates_are_zero_padded() {
    assert_eq!(norm("2024-3-7", ValueType::Date), "2024-03-07");
    assert_eq!(norm("2024-12-31", ValueType::Date), "2024-12-31");
  }

  #[test]
  fn malformed_dates_are_rejected() {
    assert_eq!(norm("2024-13-40", ValueType::Date), "");
    assert_eq!(norm("24-3-7", ValueType::Date), "");
    assert_eq!(norm("2024/3/7", ValueType::Date), "");
    assert_eq!(norm("2024-003-07", ValueType::Date), "");
    assert_eq!(norm("2024-0-7", ValueType::Date), "");
  }

  #[test]
  fn dates_are_not_checked_against_the_calendar() {
    assert_eq!(norm("2023-2-31", ValueType::Date), "2023-02-31");
  }

  #[test]
  fn invalid_date_is_reported_by_try_normalize() {
    let err = try_normalize("yesterday", &ValueType::Date, &Ids).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { ref value, .. } if value == "yesterday"));
  }

  #[test]
  fn urls_get_a_scheme() {
    assert_eq!(norm("example.com", ValueType::Url), "http://example.com");
    assert_eq!(norm("http://example.com", ValueType::Url), "http://example.com");
    assert_eq!(norm("FTP://files.example.com", ValueType::Url), "FTP://files.example.com");
    assert_eq!(norm("mailto:x@example.com", ValueType::Url), "http://mailto:x@example.com");
  }

  #[test]
  fn mail_moves_address_first() {
    assert_eq!(
      norm("Jane Doe Jane.Doe@Example.COM", ValueType::Mail),
      "jane.doe@example.com Jane Doe"
    );
    assert_eq!(
      norm("Jane jane@example.com Doe", ValueType::Mail),
      "jane@example.com Jane Doe"
    );
    assert_eq!(norm("jane@example.com", ValueType::Mail), "jane@example.com");
  }

  #[test]
  fn mail_keeps_only_the_first_address() {
    assert_eq!(
      norm("a@example.com b@example.com", ValueType::Mail),
      "a@example.com b@example.com"
    );
    assert_eq!(
      norm("B@Example.com a@example.com", ValueType::Mail),
      "b@example.com a@example.com"
    );
  }

  #[test]
  fn mail_without_address_is_rejected() {
    assert_eq!(norm("Jane Doe", ValueType::Mail), "");
    assert_eq!(norm("jane at example", ValueType::Mail), "");
  }

  #[test]
  fn other_types_are_trimmed_only() {
    assert_eq!(norm("  Hello World ", ValueType::Text), "Hello World");
    assert_eq!(norm(" wiki:logo.png ", ValueType::Image { width: 40 }), "wiki:logo.png");
    assert_eq!(norm("home|Home Page", ValueType::Title), "home|Home Page");
  }

  #[test]
  fn multi_column_splits_on_commas() {
    let column = ColumnSpec::parse("tag_tags");
    let values = normalize_column(&column, "alpha, beta ,, gamma", &Ids);
    assert_eq!(values.to_stored(), "alpha\nbeta\ngamma");
  }

  #[test]
  fn multi_column_drops_rejected_items() {
    let column = ColumnSpec::parse("due_dts");
    let values = normalize_column(&column, "2024-1-2, tomorrow, 2024-2-3", &Ids);
    assert_eq!(values.to_stored(), "2024-01-02\n2024-02-03");
  }

  #[test]
  fn single_column_keeps_commas() {
    let column = ColumnSpec::parse("summary");
    let values = normalize_column(&column, "one, two", &Ids);
    assert_eq!(values.to_stored(), "one, two");
  }
}
