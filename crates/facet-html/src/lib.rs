//! Default HTML host for Facet.
//!
//! [`HtmlHost`] implements every collaborator trait of
//! [`facet_core::host`]: page-identifier cleaning, escaping, e-mail
//! obfuscation, URL building and localized strings. Pure synchronous; no
//! database dependency.
//!
//! # Quick start
//!
//! ```no_run
//! use facet_core::{ColumnSpec, render::render};
//! use facet_html::HtmlHost;
//!
//! let host = HtmlHost::new("https://wiki.example.org");
//! let column = ColumnSpec::parse("homepage_url");
//! println!("{}", render(&column.key, "http://example.org", &column.kind, &host));
//! ```

mod escape;
mod id;
mod lang;

use std::collections::HashMap;

use facet_core::host::{Anchor, Host, IdCleaner, Localize, MailGuard, Markup};

pub use escape::{escape_html, obfuscate_email, url_encode};
pub use id::clean_id;
pub use lang::default_string;

// ─── Host ─────────────────────────────────────────────────────────────────────

/// Renders links as plain HTML pointing at a DokuWiki-style site.
#[derive(Debug, Clone, Default)]
pub struct HtmlHost {
  base_url:   String,
  mail_guard: MailGuard,
  strings:    HashMap<String, String>,
}

impl HtmlHost {
  /// `base_url` is prepended to every page and media URL; it may be empty
  /// for root-relative links.
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into().trim_end_matches('/').to_owned(),
      ..Default::default()
    }
  }

  pub fn with_mail_guard(mut self, mail_guard: MailGuard) -> Self {
    self.mail_guard = mail_guard;
    self
  }

  /// Override localized strings by key.
  pub fn with_strings(mut self, strings: HashMap<String, String>) -> Self {
    self.strings.extend(strings);
    self
  }

  fn media_url(&self, media: &str, width: Option<u32>) -> String {
    let mut url = format!(
      "{}/lib/exe/fetch.php?media={}",
      self.base_url,
      encode_id(media)
    );
    if let Some(width) = width {
      url.push_str(&format!("&amp;w={width}"));
    }
    url
  }
}

/// URL-encode a page or media id, keeping namespace separators readable.
fn encode_id(id: &str) -> String { url_encode(id).replace("%3A", ":") }

// ─── Collaborator impls ───────────────────────────────────────────────────────

impl IdCleaner for HtmlHost {
  fn clean_id(&self, raw: &str) -> String { clean_id(raw) }
}

impl Markup for HtmlHost {
  fn internal_link(&self, id: &str, text: Option<&str>) -> String {
    let id = clean_id(id);
    let href = self.page_url(&id, &[]);
    let text = text.filter(|t| !t.is_empty()).unwrap_or(id.as_str());
    format!(
      "<a href=\"{href}\" class=\"wikilink1\" title=\"{}\">{}</a>",
      escape_html(&id),
      escape_html(text)
    )
  }

  fn link(&self, anchor: &Anchor<'_>) -> String {
    format!(
      "<a href=\"{}\" class=\"{}\" title=\"{}\">{}</a>",
      anchor.href, anchor.class, anchor.title, anchor.text
    )
  }

  fn media_link(&self, media: &str, width: u32, alt: &str) -> String {
    let alt = escape_html(alt);
    format!(
      "<a href=\"{}\" class=\"media\" rel=\"lightbox\"><img src=\"{}\" alt=\"{alt}\" title=\"{alt}\" width=\"{width}\" /></a>",
      self.media_url(media, None),
      self.media_url(media, Some(width)),
    )
  }

  fn page_url(&self, id: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!("{}/doku.php?id={}", self.base_url, encode_id(id));
    for (key, value) in params {
      url.push_str(&format!("&amp;{}={}", url_encode(key), url_encode(value)));
    }
    url
  }

  fn escape(&self, text: &str) -> String { escape_html(text) }

  fn obfuscate_email(&self, address: &str) -> String {
    obfuscate_email(address, self.mail_guard)
  }

  fn url_encode(&self, text: &str) -> String { url_encode(text) }
}

impl Localize for HtmlHost {
  fn translate(&self, key: &str) -> String {
    self
      .strings
      .get(key)
      .cloned()
      .or_else(|| default_string(key).map(str::to_owned))
      .unwrap_or_else(|| key.to_owned())
  }
}

impl Host for HtmlHost {
  fn mail_guard(&self) -> MailGuard { self.mail_guard }
}

#[cfg(test)]
mod tests {
  use facet_core::{ColumnSpec, render::render};

  use super::*;

  fn host() -> HtmlHost { HtmlHost::new("https://wiki.example.org/") }

  fn render_column(host: &HtmlHost, declaration: &str, stored: &str) -> String {
    let column = ColumnSpec::parse(declaration);
    render(&column.key, stored, &column.kind, host)
  }

  #[test]
  fn page_link() {
    assert_eq!(
      render_column(&host(), "location_page", "some:target"),
      "<a href=\"https://wiki.example.org/doku.php?id=some:target\" class=\"wikilink1\" \
       title=\"some:target\">some:target</a>"
    );
  }

  #[test]
  fn title_link_uses_display_title() {
    assert_eq!(
      render_column(&host(), "see_title", "wiki:start|Start & Finish"),
      "<a href=\"https://wiki.example.org/doku.php?id=wiki:start\" class=\"wikilink1\" \
       title=\"wiki:start\">Start &amp; Finish</a>"
    );
  }

  #[test]
  fn nspage_link() {
    let out = render_column(&host(), "person_nspage", "jane");
    assert!(out.contains("doku.php?id=person:jane"));
  }

  #[test]
  fn url_link() {
    assert_eq!(
      render_column(&host(), "home_url", "http://example.com/?a=1&b=2"),
      "<a href=\"http://example.com/?a=1&amp;b=2\" class=\"urlextern\" \
       title=\"http://example.com/?a=1&amp;b=2\">http://example.com/?a=1&amp;b=2</a>"
    );
  }

  #[test]
  fn mail_link_with_visible_guard() {
    assert_eq!(
      render_column(&host(), "contact_mail", "jane@example.com Jane Doe"),
      "<a href=\"mailto:jane%20%5Bat%5D%20example%20%5Bdot%5D%20com\" class=\"mail\" \
       title=\"jane [at] example [dot] com\">Jane Doe</a>"
    );
  }

  #[test]
  fn mail_link_without_guard() {
    let host = host().with_mail_guard(MailGuard::None);
    assert_eq!(
      render_column(&host, "contact_mail", "jane@example.com"),
      "<a href=\"mailto:jane@example.com\" class=\"mail\" \
       title=\"jane@example.com\">jane@example.com</a>"
    );
  }

  #[test]
  fn tag_link_filters_listing() {
    assert_eq!(
      render_column(&host(), "topic_tags", "rust\nsql"),
      "<a href=\"https://wiki.example.org/doku.php?id=topic&amp;dataflt=topic%3Arust\" \
       class=\"wikilink1\" title=\"Show pages matching 'rust'\">rust</a>, \
       <a href=\"https://wiki.example.org/doku.php?id=topic&amp;dataflt=topic%3Asql\" \
       class=\"wikilink1\" title=\"Show pages matching 'sql'\">sql</a>"
    );
  }

  #[test]
  fn tag_tooltip_can_be_overridden() {
    let host = host().with_strings(HashMap::from([(
      "tagfilter".to_owned(),
      "Seiten mit '%s'".to_owned(),
    )]));
    assert!(render_column(&host, "topic_tag", "rust").contains("title=\"Seiten mit 'rust'\""));
  }

  #[test]
  fn image_thumbnail() {
    assert_eq!(
      render_column(&host(), "photo_img80", "people:jane.jpg"),
      "<a href=\"https://wiki.example.org/lib/exe/fetch.php?media=people:jane.jpg\" \
       class=\"media\" rel=\"lightbox\"><img \
       src=\"https://wiki.example.org/lib/exe/fetch.php?media=people:jane.jpg&amp;w=80\" \
       alt=\"photo: jane.jpg\" title=\"photo: jane.jpg\" width=\"80\" /></a>"
    );
  }

  #[test]
  fn plain_text_is_escaped() {
    assert_eq!(render_column(&host(), "note", "<b>hi</b>"), "&lt;b&gt;hi&lt;/b&gt;");
  }

  #[test]
  fn unknown_string_falls_back_to_key() {
    assert_eq!(host().translate("nope"), "nope");
  }
}
