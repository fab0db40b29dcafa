//! Escaping, obfuscation and URL encoding.

use facet_core::host::MailGuard;

/// Escape the five HTML special characters.
pub fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#039;"),
      c => out.push(c),
    }
  }
  out
}

/// Disguise an e-mail address according to `guard`.
pub fn obfuscate_email(address: &str, guard: MailGuard) -> String {
  match guard {
    MailGuard::Visible => address
      .replace('@', " [at] ")
      .replace('.', " [dot] ")
      .replace('-', " [dash] "),
    MailGuard::Hex => address.chars().map(|c| format!("&#x{:x};", c as u32)).collect(),
    MailGuard::None => address.to_owned(),
  }
}

/// Percent-encode everything except unreserved characters; spaces become
/// `%20`.
pub fn url_encode(text: &str) -> String {
  // `byte_serialize` writes spaces as `+` and encodes a literal `+` as `%2B`,
  // so every remaining `+` was a space.
  url::form_urlencoded::byte_serialize(text.as_bytes())
    .collect::<String>()
    .replace('+', "%20")
}
