//! CSV export of job applications.
//!
//! Pure and synchronous: takes records in the order they should appear and
//! produces text. Every cell, header included, is double-quoted; rows end in
//! `\n`; embedded quotes are doubled.
//!
//! ```no_run
//! # fn demo(apps: &[jobtrack_core::JobApplication]) -> jobtrack_csv::Result<()> {
//! let text = jobtrack_csv::export(apps)?;
//! let name = jobtrack_csv::export_file_name(chrono::Utc::now().date_naive());
//! std::fs::write(name, text)?;
//! # Ok(())
//! # }
//! ```

pub mod error;

use std::io;

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use jobtrack_core::JobApplication;

pub use error::{Error, Result};

/// Column headers, in output order.
pub const HEADERS: [&str; 9] = [
  "Role",
  "Company",
  "Job Type",
  "Job Nature",
  "Location",
  "Required Skills",
  "Job Description",
  "Application Date",
  "Status",
];

const SKILL_SEPARATOR: &str = "; ";

/// `job-applications-<YYYY-MM-DD>.csv`
pub fn export_file_name(on: NaiveDate) -> String {
  format!("job-applications-{}.csv", on.format("%Y-%m-%d"))
}

/// The cells for one record, in [`HEADERS`] order.
pub fn record(app: &JobApplication) -> [String; 9] {
  [
    app.role.clone(),
    app.company.clone(),
    app.job_type.to_string(),
    app.job_nature.to_string(),
    app.location.clone().unwrap_or_default(),
    app.skills.join(SKILL_SEPARATOR),
    single_line(&app.description),
    app.application_date.format("%Y-%m-%d").to_string(),
    app.status.to_string(),
  ]
}

/// Newlines become spaces so a description never spans rows.
fn single_line(text: &str) -> String {
  text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Write the header and one row per record to `out`.
pub fn write_to<'a, W, I>(out: W, apps: I) -> Result<()>
where
  W: io::Write,
  I: IntoIterator<Item = &'a JobApplication>,
{
  let mut wtr = WriterBuilder::new()
    .quote_style(QuoteStyle::Always)
    .terminator(Terminator::Any(b'\n'))
    .from_writer(out);

  wtr.write_record(HEADERS)?;
  for app in apps {
    wtr.write_record(record(app))?;
  }
  wtr.flush()?;
  Ok(())
}

/// Render the export as a string.
pub fn export<'a, I>(apps: I) -> Result<String>
where
  I: IntoIterator<Item = &'a JobApplication>,
{
  let mut buf = Vec::new();
  write_to(&mut buf, apps)?;
  Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests;
