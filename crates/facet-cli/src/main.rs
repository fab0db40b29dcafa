//! facet command-line binary.
//!
//! Reads `facet.toml` (or the path specified with `--config`), opens the
//! SQLite store in the configured cache directory, and runs one subcommand.
//!
//! ```text
//! facet put wiki:start due_dt=2024-3-7 "tag_tags=rust, sql"
//! facet show wiki:start Due_dt Tag_tags
//! facet values tag_tags --separator ,
//! ```

mod commands;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use facet_store_sqlite::{Error as StoreError, SqliteStore};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

#[derive(Parser)]
#[command(author, version, about = "Typed page metadata store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "facet.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print how column declarations are parsed.
  Column {
    #[arg(required = true)]
    declarations: Vec<String>,
  },
  /// Store `declaration=value` pairs on a page.
  Put {
    page:   String,
    /// Page title.
    #[arg(long)]
    title:  Option<String>,
    #[arg(value_parser = parse_pair)]
    values: Vec<(String, String)>,
  },
  /// Render the stored values of one page.
  Show {
    page:    String,
    /// Column declarations; every stored key when omitted.
    columns: Vec<String>,
  },
  /// Render the given columns of every page.
  Table {
    #[arg(required = true)]
    columns: Vec<String>,
  },
  /// Distinct values of a column across all pages.
  Values {
    column:    String,
    /// Print the stored values joined with this separator instead of
    /// rendering them.
    #[arg(long)]
    separator: Option<String>,
  },
  /// Drop all stored data.
  Reset,
}

fn main() -> anyhow::Result<()> {
  // Initialise tracing. Output goes to stderr so stdout stays clean.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  let output = match cli.command {
    Command::Column { declarations } => commands::column(&declarations)?,
    command => {
      let Some(store) = open_store(&settings)? else {
        return Ok(());
      };
      execute(command, &store, &settings)?
    }
  };

  println!("{output}");
  Ok(())
}

/// Open the store in the cache directory. `None` when the cache directory
/// or the file cannot be opened; that is logged and the run ends without
/// output.
fn open_store(settings: &Settings) -> anyhow::Result<Option<SqliteStore>> {
  match SqliteStore::open_in_cache(&settings.cache_dir) {
    Ok(store) => Ok(Some(store)),
    Err(StoreError::Unavailable { path, .. }) => {
      tracing::warn!("metadata store at {} is unavailable, nothing to do", path.display());
      Ok(None)
    }
    Err(StoreError::Io(err)) => {
      tracing::warn!(
        "cache directory {} is unusable ({err}), nothing to do",
        settings.cache_dir.display()
      );
      Ok(None)
    }
    Err(err) => Err(err)
      .with_context(|| format!("failed to open store in {}", settings.cache_dir.display())),
  }
}

fn execute(command: Command, store: &SqliteStore, settings: &Settings) -> anyhow::Result<String> {
  let host = settings.host();
  match command {
    Command::Column { declarations } => commands::column(&declarations),
    Command::Put { page, title, values } => commands::put(store, &host, &page, title, &values),
    Command::Show { page, columns } => commands::show(store, &host, &page, &columns),
    Command::Table { columns } => commands::table(store, &host, &columns),
    Command::Values { column, separator } => {
      commands::values(store, &host, &column, separator.as_deref())
    }
    Command::Reset => {
      store.reset().context("failed to reset store")?;
      Ok("store reset".to_owned())
    }
  }
}

/// Split `declaration=value` on the first `=`.
fn parse_pair(arg: &str) -> Result<(String, String), String> {
  arg
    .split_once('=')
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .ok_or_else(|| format!("expected declaration=value, got `{arg}`"))
}
