//! Runtime configuration: an optional TOML file layered under `JOBTRACK_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use jobtrack_core::{SortDirection, SortOption};
use serde::Deserialize;

/// Settings read from `jobtrack.toml` (or `--config`) and the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
  /// SQLite file holding the application collection.
  #[serde(default = "default_store_path")]
  pub store_path:        PathBuf,
  /// Sort key for `list` and `export --visible` when none is given.
  #[serde(default)]
  pub default_sort:      SortOption,
  #[serde(default)]
  pub default_direction: SortDirection,
  /// Directory `export` writes into when `--out` is not given.
  #[serde(default)]
  pub export_dir:        Option<PathBuf>,
}

impl Default for CliConfig {
  fn default() -> Self {
    Self {
      store_path:        default_store_path(),
      default_sort:      SortOption::default(),
      default_direction: SortDirection::default(),
      export_dir:        None,
    }
  }
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/jobtrack/jobtrack.db") }

/// Read `path` (if it exists) and the environment, with `~` expanded in
/// every path setting.
pub fn load(path: &Path) -> anyhow::Result<CliConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("JOBTRACK"))
    .build()
    .with_context(|| format!("failed to read config file {}", path.display()))?;

  let mut cfg: CliConfig = settings
    .try_deserialize()
    .context("failed to deserialise CliConfig")?;

  cfg.store_path = expand_tilde(&cfg.store_path);
  cfg.export_dir = cfg.export_dir.as_deref().map(expand_tilde);
  Ok(cfg)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(cfg.default_sort, SortOption::Date);
    assert_eq!(cfg.default_direction, SortDirection::Descending);
    assert!(cfg.store_path.ends_with("jobtrack.db"));
  }

  #[test]
  fn file_values_are_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobtrack.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(
      f,
      "store_path = \"/tmp/jt/apps.db\"\ndefault_sort = \"status\"\n\
       default_direction = \"asc\"\nexport_dir = \"/tmp/exports\""
    )
    .unwrap();

    let cfg = load(&path).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/jt/apps.db"));
    assert_eq!(cfg.default_sort, SortOption::Status);
    assert_eq!(cfg.default_direction, SortDirection::Ascending);
    assert_eq!(cfg.export_dir, Some(PathBuf::from("/tmp/exports")));
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x/y.db")), PathBuf::from(home).join("x/y.db"));
    assert_eq!(expand_tilde(Path::new("/abs/y.db")), PathBuf::from("/abs/y.db"));
  }
}
