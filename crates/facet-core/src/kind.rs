//! The closed set of semantic value types a column can declare.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width in pixels used for `img` columns that do not name one.
pub const DEFAULT_IMAGE_WIDTH: u32 = 40;

/// The semantic type of a column, parsed from the part of the declaration
/// after the first underscore.
///
/// The type selects both normalization and rendering. Unknown types are
/// kept verbatim in [`ValueType::Other`] and treated as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ValueType {
  /// A page identifier, linked from the wiki root.
  Page,
  /// A page identifier inside the namespace named after the column key.
  NsPage,
  /// `id|display title` pair.
  Title,
  /// A `YYYY-MM-DD` date (`dt`).
  Date,
  Url,
  /// An e-mail address followed by an optional display name.
  Mail,
  /// A tag linking to the filtered listing of its column.
  Tag,
  /// A media reference rendered as a thumbnail of the given width.
  Image { width: u32 },
  /// No type given.
  Text,
  /// Any type name outside the known set.
  Other(String),
}

impl ValueType {
  /// Classify a lower-cased type name.
  pub fn parse(name: &str) -> Self {
    match name {
      "" => Self::Text,
      "page" => Self::Page,
      "nspage" => Self::NsPage,
      "title" => Self::Title,
      "dt" => Self::Date,
      "url" => Self::Url,
      "mail" => Self::Mail,
      "tag" => Self::Tag,
      other => match other.strip_prefix("img") {
        Some(suffix) => Self::Image { width: image_width(suffix) },
        None => Self::Other(other.to_owned()),
      },
    }
  }

  /// Whether values of this type are stored and shown as-is.
  pub fn is_passthrough(&self) -> bool {
    matches!(self, Self::Text | Self::Other(_))
  }
}

/// Leading decimal digits of `suffix`; zero or nothing yields the default.
fn image_width(suffix: &str) -> u32 {
  let digits: String = suffix.chars().take_while(char::is_ascii_digit).collect();
  match digits.parse::<u32>() {
    Ok(0) | Err(_) => DEFAULT_IMAGE_WIDTH,
    Ok(width) => width,
  }
}

impl fmt::Display for ValueType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Page => f.write_str("page"),
      Self::NsPage => f.write_str("nspage"),
      Self::Title => f.write_str("title"),
      Self::Date => f.write_str("dt"),
      Self::Url => f.write_str("url"),
      Self::Mail => f.write_str("mail"),
      Self::Tag => f.write_str("tag"),
      Self::Image { width } => write!(f, "img{width}"),
      Self::Text => Ok(()),
      Self::Other(name) => f.write_str(name),
    }
  }
}

impl From<String> for ValueType {
  fn from(name: String) -> Self { Self::parse(&name) }
}

impl From<ValueType> for String {
  fn from(kind: ValueType) -> Self { kind.to_string() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_names() {
    assert_eq!(ValueType::parse("page"), ValueType::Page);
    assert_eq!(ValueType::parse("nspage"), ValueType::NsPage);
    assert_eq!(ValueType::parse("dt"), ValueType::Date);
    assert_eq!(ValueType::parse("mail"), ValueType::Mail);
    assert_eq!(ValueType::parse(""), ValueType::Text);
  }

  #[test]
  fn image_width_from_suffix() {
    assert_eq!(ValueType::parse("img120"), ValueType::Image { width: 120 });
    assert_eq!(ValueType::parse("img"), ValueType::Image { width: 40 });
    assert_eq!(ValueType::parse("img0"), ValueType::Image { width: 40 });
    assert_eq!(ValueType::parse("img64px"), ValueType::Image { width: 64 });
  }

  #[test]
  fn unknown_names_are_kept() {
    let kind = ValueType::parse("colour");
    assert_eq!(kind, ValueType::Other("colour".into()));
    assert!(kind.is_passthrough());
    assert_eq!(kind.to_string(), "colour");
  }

  #[test]
  fn display_round_trips() {
    for name in ["page", "nspage", "title", "dt", "url", "mail", "tag", "img80"] {
      assert_eq!(ValueType::parse(name).to_string(), name);
    }
  }
}
