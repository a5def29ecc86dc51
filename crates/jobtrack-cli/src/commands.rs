//! Subcommand handlers. Each one drives an [`ApplicationStore`] and writes
//! human-readable output to `out`.

use std::{
  fs::File,
  io::{BufWriter, Write},
  path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use chrono::{NaiveDate, Utc};
use clap::Args;
use jobtrack_core::{
  ApplicationId, ApplicationPatch, ApplicationStatus, ApplicationStore, JobNature, JobType,
  KeyValueStorage, NewApplication, SortDirection, SortOption, application::parse_calendar_date,
};

use crate::{config::CliConfig, render};

// ─── Shared arguments ─────────────────────────────────────────────────────────

/// Filter and sort flags for `list` and `export --visible`.
#[derive(Args, Debug, Default, Clone)]
pub struct ViewArgs {
  /// Case-insensitive text matched against role or company.
  #[arg(short, long)]
  pub search: Option<String>,

  /// Only show records with this status.
  #[arg(long)]
  pub status: Option<ApplicationStatus>,

  /// Sort key: `date` or `status`.
  #[arg(long)]
  pub sort: Option<SortOption>,

  /// Sort ascending (oldest / earliest status first).
  #[arg(long, conflicts_with = "desc")]
  pub asc: bool,

  /// Sort descending.
  #[arg(long)]
  pub desc: bool,
}

impl ViewArgs {
  /// Whether any filter or sort flag was given.
  pub fn is_set(&self) -> bool {
    self.search.is_some() || self.status.is_some() || self.sort.is_some() || self.asc || self.desc
  }

  /// Configure `store` from config defaults, then these flags.
  fn apply<S: KeyValueStorage>(&self, store: &mut ApplicationStore<S>, cfg: &CliConfig) {
    store.set_sort_option(self.sort.unwrap_or(cfg.default_sort));
    let direction = if self.asc {
      SortDirection::Ascending
    } else if self.desc {
      SortDirection::Descending
    } else {
      cfg.default_direction
    };
    store.set_sort_direction(direction);
    store.set_status_filter(self.status);
    store.set_search_query(self.search.clone().unwrap_or_default());
  }
}

/// Record fields accepted by `add` and `update`.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
  #[arg(long)]
  pub role: Option<String>,

  #[arg(long)]
  pub company: Option<String>,

  /// Application date, `YYYY-MM-DD`.
  #[arg(long, value_parser = parse_calendar_date)]
  pub date: Option<NaiveDate>,

  #[arg(long)]
  pub status: Option<ApplicationStatus>,

  /// `on-site`, `hybrid`, or `remote`.
  #[arg(long)]
  pub job_type: Option<JobType>,

  /// `full-time` or `contract`.
  #[arg(long)]
  pub job_nature: Option<JobNature>,

  #[arg(long)]
  pub location: Option<String>,

  /// Comma-separated list, e.g. `Rust,SQL`.
  #[arg(long)]
  pub skills: Option<String>,

  #[arg(long, conflicts_with = "description_file")]
  pub description: Option<String>,

  /// Read the description from a file.
  #[arg(long, value_name = "FILE")]
  pub description_file: Option<PathBuf>,

  #[arg(long)]
  pub notes: Option<String>,
}

impl FieldArgs {
  fn skills(&self) -> Option<Vec<String>> {
    self.skills.as_deref().map(split_skills)
  }

  fn description(&self) -> Result<Option<String>> {
    match (&self.description, &self.description_file) {
      (Some(text), _) => Ok(Some(text.clone())),
      (None, Some(path)) => std::fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("reading description from {}", path.display())),
      (None, None) => Ok(None),
    }
  }
}

/// Split a comma-separated skill list, dropping blank entries.
pub fn split_skills(raw: &str) -> Vec<String> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
    .collect()
}

fn non_blank(field: &str, value: Option<&str>) -> Result<String> {
  match value.map(str::trim) {
    Some(v) if !v.is_empty() => Ok(v.to_owned()),
    _ => bail!("{field} must not be empty"),
  }
}

/// Resolve a full id or a unique prefix of one.
pub fn resolve_id<S: KeyValueStorage>(store: &ApplicationStore<S>, raw: &str) -> Result<ApplicationId> {
  if let Ok(id) = raw.parse::<ApplicationId>() {
    return Ok(id);
  }
  let prefix = raw.trim().to_ascii_lowercase();
  if prefix.is_empty() {
    bail!("application id must not be empty");
  }
  let mut matches = store
    .applications()
    .iter()
    .filter(|a| a.id.to_string().starts_with(&prefix));
  match (matches.next(), matches.next()) {
    (Some(app), None) => Ok(app.id),
    (None, _) => Err(anyhow!("no application matches id {raw:?}")),
    (Some(_), Some(_)) => Err(anyhow!("id prefix {raw:?} is ambiguous")),
  }
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

pub fn add<S: KeyValueStorage>(
  store: &mut ApplicationStore<S>,
  fields: &FieldArgs,
  today: NaiveDate,
  out: &mut impl Write,
) -> Result<()> {
  let role = non_blank("role", fields.role.as_deref())?;
  let company = non_blank("company", fields.company.as_deref())?;

  let mut input = NewApplication::new(role, company, fields.date.unwrap_or(today));
  if let Some(status) = fields.status {
    input.status = status;
  }
  if let Some(job_type) = fields.job_type {
    input.job_type = job_type;
  }
  if let Some(job_nature) = fields.job_nature {
    input.job_nature = job_nature;
  }
  input.location = fields.location.clone();
  input.skills = fields.skills().unwrap_or_default();
  input.description = fields.description()?.unwrap_or_default();
  input.notes = fields.notes.clone();

  let app = store.add(input);
  writeln!(out, "Added {} ({} @ {})", app.id, app.role, app.company)?;
  Ok(())
}

pub fn update<S: KeyValueStorage>(
  store: &mut ApplicationStore<S>,
  raw_id: &str,
  fields: &FieldArgs,
  clear_location: bool,
  clear_notes: bool,
  out: &mut impl Write,
) -> Result<()> {
  let id = resolve_id(store, raw_id)?;

  let patch = ApplicationPatch {
    role:             fields.role.as_deref().map(|r| non_blank("role", Some(r))).transpose()?,
    company:          fields
      .company
      .as_deref()
      .map(|c| non_blank("company", Some(c)))
      .transpose()?,
    description:      fields.description()?,
    skills:           fields.skills(),
    application_date: fields.date,
    status:           fields.status,
    job_type:         fields.job_type,
    job_nature:       fields.job_nature,
    location:         if clear_location { Some(None) } else { fields.location.clone().map(Some) },
    notes:            if clear_notes { Some(None) } else { fields.notes.clone().map(Some) },
  };
  if patch.is_empty() {
    bail!("nothing to update; pass at least one field");
  }

  if !store.update(id, patch) {
    bail!("no application with id {id}");
  }
  writeln!(out, "Updated {id}")?;
  Ok(())
}

pub fn delete<S: KeyValueStorage>(
  store: &mut ApplicationStore<S>,
  raw_id: &str,
  out: &mut impl Write,
) -> Result<()> {
  let id = resolve_id(store, raw_id)?;
  if !store.delete(id) {
    bail!("no application with id {id}");
  }
  writeln!(out, "Deleted {id}")?;
  Ok(())
}

pub fn list<S: KeyValueStorage>(
  store: &mut ApplicationStore<S>,
  view: &ViewArgs,
  cfg: &CliConfig,
  out: &mut impl Write,
) -> Result<()> {
  view.apply(store, cfg);
  render::list(out, &store.visible_applications())?;
  Ok(())
}

pub fn show<S: KeyValueStorage>(
  store: &ApplicationStore<S>,
  raw_id: &str,
  today: NaiveDate,
  out: &mut impl Write,
) -> Result<()> {
  let id = resolve_id(store, raw_id)?;
  let app = store
    .get(id)
    .ok_or_else(|| anyhow!("no application with id {id}"))?;
  render::detail(out, app, today)?;
  Ok(())
}

pub fn stats<S: KeyValueStorage>(store: &ApplicationStore<S>, out: &mut impl Write) -> Result<()> {
  render::stats(out, &store.stats())?;
  Ok(())
}

/// Write `job-applications-<today>.csv` into `dir` and return its path.
///
/// Exports every record in insertion order unless `visible` is set or `view`
/// carries any filter or sort flag, in which case the filtered, sorted view
/// is written instead.
pub fn export<S: KeyValueStorage>(
  store: &mut ApplicationStore<S>,
  dir: &Path,
  view: &ViewArgs,
  visible: bool,
  cfg: &CliConfig,
  today: NaiveDate,
) -> Result<PathBuf> {
  std::fs::create_dir_all(dir)
    .with_context(|| format!("creating export directory {}", dir.display()))?;
  let path = dir.join(jobtrack_csv::export_file_name(today));
  let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
  let mut writer = BufWriter::new(file);

  let count = if visible || view.is_set() {
    view.apply(store, cfg);
    let apps = store.visible_applications();
    jobtrack_csv::write_to(&mut writer, apps.iter().copied())?;
    apps.len()
  } else {
    jobtrack_csv::write_to(&mut writer, store.applications())?;
    store.len()
  };
  writer
    .flush()
    .with_context(|| format!("writing {}", path.display()))?;

  tracing::info!(path = %path.display(), count, "exported applications");
  Ok(path)
}

/// Today's date in UTC.
pub fn today() -> NaiveDate { Utc::now().date_naive() }

#[cfg(test)]
mod tests;
