//! Turning stored values back into markup.

use crate::{
  host::{Anchor, Host, MailGuard},
  kind::ValueType,
  values::MultiValue,
};

/// Localization key of the tooltip on tag links.
pub const TAG_FILTER_KEY: &str = "tagfilter";

/// Query parameter the listing view filters on.
pub const FILTER_PARAM: &str = "dataflt";

/// Render the stored value of column `key` as markup.
///
/// Every sub-value is rendered on its own and the fragments are joined with
/// `", "`. Duplicate sub-values are rendered as often as they occur.
pub fn render(key: &str, stored: &str, kind: &ValueType, host: &impl Host) -> String {
  render_values(key, &MultiValue::from_stored(stored), kind, host)
}

/// [`render`] for an already decoded value.
pub fn render_values(
  key: &str,
  values: &MultiValue,
  kind: &ValueType,
  host: &impl Host,
) -> String {
  values
    .iter()
    .map(|value| render_one(key, value, kind, host))
    .collect::<Vec<_>>()
    .join(", ")
}

fn render_one(key: &str, value: &str, kind: &ValueType, host: &impl Host) -> String {
  match kind {
    ValueType::Page => host.internal_link(&format!(":{value}"), None),
    ValueType::Title => {
      let (id, title) = match value.split_once('|') {
        Some((id, title)) => (id, Some(title)),
        None => (value, None),
      };
      host.internal_link(&format!(":{id}"), title)
    }
    ValueType::NsPage => host.internal_link(&format!(":{key}:{value}"), None),
    ValueType::Mail => render_mail(value, host),
    ValueType::Url => {
      let url = host.escape(value);
      host.link(&Anchor { href: &url, title: &url, text: &url, class: "urlextern" })
    }
    ValueType::Tag => render_tag(key, value, host),
    ValueType::Image { width } => {
      let alt = format!("{key}: {}", basename(value));
      host.media_link(value, *width, &alt)
    }
    ValueType::Date | ValueType::Text | ValueType::Other(_) => host.escape(value),
  }
}

fn render_mail(value: &str, host: &impl Host) -> String {
  let (address, name) = match value.split_once(' ') {
    Some((address, name)) => (address, Some(name)),
    None => (value, None),
  };

  let address = host.obfuscate_email(&host.escape(address));
  let text = match name {
    Some(name) if !name.is_empty() => host.escape(name),
    _ => address.clone(),
  };
  let target = match host.mail_guard() {
    MailGuard::Visible => host.url_encode(&address),
    _ => address.clone(),
  };
  let href = format!("mailto:{target}");

  host.link(&Anchor { href: &href, title: &address, text: &text, class: "mail" })
}

fn render_tag(key: &str, value: &str, host: &impl Host) -> String {
  let listing = host.clean_id(key).replace('/', ":");
  let filter = format!("{key}:{value}");
  let href = host.page_url(&listing, &[(FILTER_PARAM, &filter)]);

  let text = host.escape(value);
  let title = host.translate(TAG_FILTER_KEY).replacen("%s", &text, 1);

  host.link(&Anchor { href: &href, title: &title, text: &text, class: "wikilink1" })
}

/// Last path segment of a media identifier.
fn basename(media: &str) -> &str {
  media.rsplit([':', '/']).next().unwrap_or(media)
}
