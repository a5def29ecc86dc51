//! The job application record and its closed value sets.
//!
//! Field names serialise in camelCase and enum values serialise as their
//! display labels (`"Offer Received"`, `"On-site"`, `"Full-time"`), which is
//! the layout of the persisted state blob.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque identifier assigned when a record is added. Never reused.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
  /// A fresh random (v4) identifier.
  pub fn generate() -> Self { Self(Uuid::new_v4()) }
}

impl fmt::Display for ApplicationId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0.hyphenated(), f)
  }
}

impl FromStr for ApplicationId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Uuid::parse_str(s.trim())
      .map(Self)
      .map_err(|_| Error::InvalidId(s.to_owned()))
  }
}

// ─── Value sets ──────────────────────────────────────────────────────────────

/// Lowercase, with `-` and `_` folded to spaces, so `offer-received`,
/// `Offer_Received` and `offer received` all compare equal.
fn normalize_label(s: &str) -> String {
  s.trim()
    .chars()
    .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
    .collect()
}

/// Where an application stands. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
  Applied,
  Interviewed,
  #[serde(rename = "Offer Received")]
  OfferReceived,
}

impl ApplicationStatus {
  /// Position in the fixed status ordering used for sorting.
  pub fn rank(self) -> u8 {
    match self {
      Self::Applied => 0,
      Self::Interviewed => 1,
      Self::OfferReceived => 2,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Applied => "Applied",
      Self::Interviewed => "Interviewed",
      Self::OfferReceived => "Offer Received",
    }
  }
}

impl fmt::Display for ApplicationStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for ApplicationStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match normalize_label(s).as_str() {
      "applied" => Ok(Self::Applied),
      "interviewed" => Ok(Self::Interviewed),
      "offer received" | "offer" => Ok(Self::OfferReceived),
      _ => Err(Error::UnknownStatus(s.to_owned())),
    }
  }
}

/// Work arrangement. Records stored without one read back as on-site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobType {
  #[default]
  #[serde(rename = "On-site")]
  OnSite,
  Hybrid,
  Remote,
}

impl JobType {
  pub fn label(self) -> &'static str {
    match self {
      Self::OnSite => "On-site",
      Self::Hybrid => "Hybrid",
      Self::Remote => "Remote",
    }
  }
}

impl fmt::Display for JobType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for JobType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match normalize_label(s).as_str() {
      "on site" | "onsite" => Ok(Self::OnSite),
      "hybrid" => Ok(Self::Hybrid),
      "remote" => Ok(Self::Remote),
      _ => Err(Error::UnknownJobType(s.to_owned())),
    }
  }
}

/// Employment kind. Records stored without one read back as full-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JobNature {
  #[default]
  #[serde(rename = "Full-time")]
  FullTime,
  Contract,
}

impl JobNature {
  pub fn label(self) -> &'static str {
    match self {
      Self::FullTime => "Full-time",
      Self::Contract => "Contract",
    }
  }
}

impl fmt::Display for JobNature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for JobNature {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match normalize_label(s).as_str() {
      "full time" | "fulltime" => Ok(Self::FullTime),
      "contract" => Ok(Self::Contract),
      _ => Err(Error::UnknownJobNature(s.to_owned())),
    }
  }
}

// ─── Calendar dates ──────────────────────────────────────────────────────────

/// Parse an application date. Accepts `YYYY-MM-DD`, or a full RFC 3339
/// timestamp whose date part (in its own offset) is kept.
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
  let s = s.trim();
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
    .map_err(|_| Error::InvalidDate(s.to_owned()))
}

/// Serde adapter storing a [`NaiveDate`] as an ISO-8601 date string.
mod calendar_date {
  use chrono::NaiveDate;
  use serde::{Deserialize, Deserializer, Serializer, de};

  pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&date.format("%Y-%m-%d"))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(d)?;
    super::parse_calendar_date(&raw).map_err(de::Error::custom)
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One tracked job application.
///
/// `id` and `created_at` are assigned by the store and never change. Every
/// other field may be overwritten through [`ApplicationPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
  pub id:               ApplicationId,
  pub role:             String,
  pub company:          String,
  /// Free text; blank lines and `•` bullets carry display structure only.
  #[serde(default)]
  pub description:      String,
  /// Display order; duplicates are allowed.
  #[serde(default)]
  pub skills:           Vec<String>,
  #[serde(with = "calendar_date")]
  pub application_date: NaiveDate,
  pub status:           ApplicationStatus,
  #[serde(default)]
  pub job_type:         JobType,
  #[serde(default)]
  pub job_nature:       JobNature,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:            Option<String>,
  /// Audit timestamp; never used for ordering.
  pub created_at:       DateTime<Utc>,
}

// ─── NewApplication ──────────────────────────────────────────────────────────

/// Input to [`crate::store::ApplicationStore::add`]. The store assigns `id`
/// and `created_at`; they are not accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
  pub role:             String,
  pub company:          String,
  pub description:      String,
  pub skills:           Vec<String>,
  pub application_date: NaiveDate,
  pub status:           ApplicationStatus,
  pub job_type:         JobType,
  pub job_nature:       JobNature,
  pub location:         Option<String>,
  pub notes:            Option<String>,
}

impl NewApplication {
  /// Convenience constructor: status `Applied`, other optional fields at
  /// their defaults.
  pub fn new(
    role: impl Into<String>,
    company: impl Into<String>,
    application_date: NaiveDate,
  ) -> Self {
    Self {
      role: role.into(),
      company: company.into(),
      description: String::new(),
      skills: Vec::new(),
      application_date,
      status: ApplicationStatus::Applied,
      job_type: JobType::default(),
      job_nature: JobNature::default(),
      location: None,
      notes: None,
    }
  }

  pub(crate) fn into_application(
    self,
    id: ApplicationId,
    created_at: DateTime<Utc>,
  ) -> JobApplication {
    JobApplication {
      id,
      role: self.role,
      company: self.company,
      description: self.description,
      skills: self.skills,
      application_date: self.application_date,
      status: self.status,
      job_type: self.job_type,
      job_nature: self.job_nature,
      location: self.location,
      notes: self.notes,
      created_at,
    }
  }
}

// ─── ApplicationPatch ────────────────────────────────────────────────────────

/// A partial update. `None` leaves a field untouched; for the optional text
/// fields, `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationPatch {
  pub role:             Option<String>,
  pub company:          Option<String>,
  pub description:      Option<String>,
  pub skills:           Option<Vec<String>>,
  pub application_date: Option<NaiveDate>,
  pub status:           Option<ApplicationStatus>,
  pub job_type:         Option<JobType>,
  pub job_nature:       Option<JobNature>,
  pub location:         Option<Option<String>>,
  pub notes:            Option<Option<String>>,
}

impl ApplicationPatch {
  /// A patch that only moves the record to `status`.
  pub fn status(status: ApplicationStatus) -> Self {
    Self { status: Some(status), ..Self::default() }
  }

  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// Overwrite the fields present in the patch. `id` and `created_at` are
  /// not reachable from here.
  pub fn apply_to(self, app: &mut JobApplication) {
    if let Some(role) = self.role {
      app.role = role;
    }
    if let Some(company) = self.company {
      app.company = company;
    }
    if let Some(description) = self.description {
      app.description = description;
    }
    if let Some(skills) = self.skills {
      app.skills = skills;
    }
    if let Some(date) = self.application_date {
      app.application_date = date;
    }
    if let Some(status) = self.status {
      app.status = status;
    }
    if let Some(job_type) = self.job_type {
      app.job_type = job_type;
    }
    if let Some(job_nature) = self.job_nature {
      app.job_nature = job_nature;
    }
    if let Some(location) = self.location {
      app.location = location;
    }
    if let Some(notes) = self.notes {
      app.notes = notes;
    }
  }
}
