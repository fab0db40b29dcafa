//! Built-in English strings.

const STRINGS: &[(&str, &str)] = &[("tagfilter", "Show pages matching '%s'")];

/// The built-in string for `key`, if there is one.
pub fn default_string(key: &str) -> Option<&'static str> {
  STRINGS.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}
