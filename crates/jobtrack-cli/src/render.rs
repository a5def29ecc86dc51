//! Plain-text rendering of records, details, and statistics.

use std::io::{self, Write};

use chrono::NaiveDate;
use jobtrack_core::{
  ApplicationStats, JobApplication,
  description::{DescriptionSection, sections},
};

/// Leading characters of an id shown in list output.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(app: &JobApplication) -> String {
  app.id.to_string().chars().take(SHORT_ID_LEN).collect()
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// One line per record, in the order given.
pub fn list(out: &mut impl Write, apps: &[&JobApplication]) -> io::Result<()> {
  if apps.is_empty() {
    return writeln!(out, "No applications found.");
  }
  for app in apps {
    let mut tags = vec![app.job_type.to_string(), app.job_nature.to_string()];
    if let Some(loc) = app.location.as_deref().filter(|l| !l.is_empty()) {
      tags.push(loc.to_owned());
    }
    writeln!(
      out,
      "{}  {}  {:<14}  {} @ {}  [{}]",
      short_id(app),
      app.application_date.format("%Y-%m-%d"),
      app.status.label(),
      app.role,
      app.company,
      tags.join(", "),
    )?;
  }
  Ok(())
}

// ─── Detail ───────────────────────────────────────────────────────────────────

fn age(applied: NaiveDate, today: NaiveDate) -> String {
  match (today - applied).num_days() {
    0 => "today".into(),
    1 => "1 day ago".into(),
    n if n > 1 => format!("{n} days ago"),
    -1 => "in 1 day".into(),
    n => format!("in {} days", -n),
  }
}

pub fn detail(out: &mut impl Write, app: &JobApplication, today: NaiveDate) -> io::Result<()> {
  writeln!(out, "{} @ {}", app.role, app.company)?;
  writeln!(out, "  id:        {}", app.id)?;
  writeln!(out, "  status:    {}", app.status)?;
  writeln!(
    out,
    "  applied:   {} ({})",
    app.application_date.format("%Y-%m-%d"),
    age(app.application_date, today)
  )?;
  writeln!(out, "  type:      {}, {}", app.job_type, app.job_nature)?;
  if let Some(loc) = app.location.as_deref().filter(|l| !l.is_empty()) {
    writeln!(out, "  location:  {loc}")?;
  }
  if !app.skills.is_empty() {
    writeln!(out, "  skills:    {}", app.skills.join(", "))?;
  }
  writeln!(out, "  created:   {}", app.created_at.to_rfc3339())?;
  if let Some(notes) = app.notes.as_deref().filter(|n| !n.is_empty()) {
    writeln!(out, "  notes:     {notes}")?;
  }

  let sections = sections(&app.description);
  if sections.is_empty() {
    return Ok(());
  }
  writeln!(out)?;
  writeln!(out, "Description")?;
  for section in sections {
    match section {
      DescriptionSection::Paragraph(text) => {
        for line in text.lines() {
          writeln!(out, "  {}", line.trim())?;
        }
      }
      DescriptionSection::List { title, items } => {
        if !title.is_empty() {
          writeln!(out, "  {title}")?;
        }
        for item in items {
          writeln!(out, "    • {item}")?;
        }
      }
    }
  }
  Ok(())
}

// ─── Stats ────────────────────────────────────────────────────────────────────

pub fn stats(out: &mut impl Write, stats: &ApplicationStats) -> io::Result<()> {
  writeln!(out, "Total Applications  {}", stats.total)?;
  writeln!(out, "Applied             {}", stats.applied)?;
  writeln!(out, "Interviewed         {}", stats.interviewed)?;
  writeln!(out, "Offers Received     {}", stats.offers)
}
