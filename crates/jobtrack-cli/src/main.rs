//! `jobtrack`: command-line front end for the job application store.
//!
//! # Usage
//!
//! ```text
//! jobtrack add --role "Backend Engineer" --company Acme --skills Rust,SQL
//! jobtrack list --search back --status applied --sort date --asc
//! jobtrack update 3f2a9c1e --status interviewed
//! jobtrack export --out ~/Downloads
//! ```
//!
//! Settings come from `jobtrack.toml` (or `--config`), overridden by
//! `JOBTRACK_*` environment variables, overridden by flags.

mod commands;
mod config;
mod render;

use std::{
  io::{self, Write as _},
  path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use commands::{FieldArgs, ViewArgs};
use jobtrack_core::{ApplicationStore, Persistence};
use jobtrack_store_sqlite::SqliteStorage;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "jobtrack", version, about = "Track job applications")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "jobtrack.toml")]
  config: PathBuf,

  /// SQLite file to use instead of the configured `store_path`.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Record a new application (`--role` and `--company` are required).
  Add {
    #[command(flatten)]
    fields: FieldArgs,
  },
  /// Change fields of an existing application.
  Update {
    /// Full id or unique prefix.
    id:             String,
    #[command(flatten)]
    fields:         FieldArgs,
    /// Remove the stored location.
    #[arg(long, conflicts_with = "location")]
    clear_location: bool,
    /// Remove the stored notes.
    #[arg(long, conflicts_with = "notes")]
    clear_notes:    bool,
  },
  /// Delete an application permanently.
  Delete {
    /// Full id or unique prefix.
    id: String,
  },
  /// List applications, filtered and sorted.
  List {
    #[command(flatten)]
    view: ViewArgs,
  },
  /// Show one application in full.
  Show {
    /// Full id or unique prefix.
    id: String,
  },
  /// Print counts per status.
  Stats,
  /// Write a CSV export.
  Export {
    /// Directory to write into (default: configured `export_dir`, else `.`).
    #[arg(short, long, value_name = "DIR")]
    out:     Option<PathBuf>,
    /// Export the filtered, sorted view instead of every record. Implied by
    /// any filter or sort flag.
    #[arg(long)]
    visible: bool,
    #[command(flatten)]
    view:    ViewArgs,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
  // Diagnostics go to stderr so stdout stays clean for command output.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let mut cfg = config::load(&cli.config)?;
  if let Some(path) = &cli.store {
    cfg.store_path = config::expand_tilde(path);
  }

  let storage = SqliteStorage::open(&cfg.store_path)
    .with_context(|| format!("failed to open store at {}", cfg.store_path.display()))?;
  let mut store = ApplicationStore::open(Persistence::new(storage));

  let today = commands::today();
  let mut stdout = io::stdout().lock();

  match cli.command {
    Command::Add { fields } => commands::add(&mut store, &fields, today, &mut stdout)?,
    Command::Update { id, fields, clear_location, clear_notes } => {
      commands::update(&mut store, &id, &fields, clear_location, clear_notes, &mut stdout)?
    }
    Command::Delete { id } => commands::delete(&mut store, &id, &mut stdout)?,
    Command::List { view } => commands::list(&mut store, &view, &cfg, &mut stdout)?,
    Command::Show { id } => commands::show(&store, &id, today, &mut stdout)?,
    Command::Stats => commands::stats(&store, &mut stdout)?,
    Command::Export { out, visible, view } => {
      let dir = out
        .map(|p| config::expand_tilde(&p))
        .or_else(|| cfg.export_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
      let path = commands::export(&mut store, &dir, &view, visible, &cfg, today)?;
      writeln!(stdout, "Exported to {}", path.display())?;
    }
  }

  if !store.is_durable() {
    tracing::warn!("changes could not be saved and were kept in memory only");
  }
  Ok(())
}
