//! Capabilities the embedding host provides to the normalizer and renderer.
//!
//! The core decides *which* markup to produce for a value; building the actual
//! links, escaping text and cleaning page identifiers is left to these traits.
//! `facet-html` ships the default HTML implementation.

use serde::{Deserialize, Serialize};

/// Canonicalizes raw page identifiers. Lossy and deterministic.
pub trait IdCleaner {
  fn clean_id(&self, raw: &str) -> String;
}

/// An `<a>` element whose fields are already safe to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor<'a> {
  pub href:  &'a str,
  pub title: &'a str,
  pub text:  &'a str,
  pub class: &'a str,
}

/// Link and escaping primitives of the host renderer.
pub trait Markup {
  /// Link to a page. `id` is absolute when it starts with `:`. Without
  /// `text` the host picks its default link title.
  fn internal_link(&self, id: &str, text: Option<&str>) -> String;

  /// Render an anchor built by the caller.
  fn link(&self, anchor: &Anchor<'_>) -> String;

  /// Thumbnail of a media item linked to the full item. `alt` is raw text.
  fn media_link(&self, media: &str, width: u32, alt: &str) -> String;

  /// URL of a page view with extra query parameters.
  fn page_url(&self, id: &str, params: &[(&str, &str)]) -> String;

  /// Escape text for embedding in markup.
  fn escape(&self, text: &str) -> String;

  /// Hide an e-mail address from harvesters according to the host policy.
  fn obfuscate_email(&self, address: &str) -> String;

  /// Percent-encode text for use inside a URL.
  fn url_encode(&self, text: &str) -> String;
}

/// Source of user-facing strings.
pub trait Localize {
  /// Format string for `key`; may contain a single `%s` placeholder.
  fn translate(&self, key: &str) -> String;
}

/// How e-mail addresses are shown on rendered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailGuard {
  /// Human-readable obfuscation, e.g. `jo [at] example [dot] org`.
  #[default]
  Visible,
  /// Every character as a hex entity.
  Hex,
  /// No obfuscation.
  None,
}

/// Everything the renderer needs from its host.
pub trait Host: IdCleaner + Markup + Localize {
  fn mail_guard(&self) -> MailGuard;
}
