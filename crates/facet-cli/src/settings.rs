//! Runtime configuration, read from an optional TOML file and `FACET_*`
//! environment variables.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use facet_core::host::MailGuard;
use facet_html::HtmlHost;
use serde::Deserialize;

/// Prefix of environment variables that override the config file.
pub const ENV_PREFIX: &str = "FACET";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Directory holding `facet.sqlite`.
  #[serde(default = "default_cache_dir")]
  pub cache_dir:  PathBuf,
  /// Prefix of generated page and media links.
  #[serde(default)]
  pub base_url:   String,
  #[serde(default)]
  pub mail_guard: MailGuard,
  /// Overrides for localized strings, e.g. `tagfilter`.
  #[serde(default)]
  pub lang:       HashMap<String, String>,
}

fn default_cache_dir() -> PathBuf { PathBuf::from(".facet") }

impl Settings {
  /// Layer the environment over the file at `path`; the file may be
  /// missing.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise Settings")
  }

  /// The HTML host described by these settings.
  pub fn host(&self) -> HtmlHost {
    HtmlHost::new(self.base_url.as_str())
      .with_mail_guard(self.mail_guard)
      .with_strings(self.lang.clone())
  }
}
