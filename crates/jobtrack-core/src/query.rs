//! Filter and sort criteria for the visible application list.
//!
//! The criteria are ephemeral view state. They are never persisted, and the
//! list they produce is recomputed on every request.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  application::{ApplicationStatus, JobApplication},
};

// ─── Sort keys ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
  /// By `application_date`, as a calendar date.
  #[default]
  Date,
  /// By status rank: Applied, Interviewed, Offer Received.
  Status,
}

impl fmt::Display for SortOption {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Date => "date",
      Self::Status => "status",
    })
  }
}

impl FromStr for SortOption {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "date" => Ok(Self::Date),
      "status" => Ok(Self::Status),
      _ => Err(Error::UnknownSortOption(s.to_owned())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
  #[serde(rename = "asc")]
  Ascending,
  #[default]
  #[serde(rename = "desc")]
  Descending,
}

impl SortDirection {
  pub fn reversed(self) -> Self {
    match self {
      Self::Ascending => Self::Descending,
      Self::Descending => Self::Ascending,
    }
  }
}

impl fmt::Display for SortDirection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Ascending => "asc",
      Self::Descending => "desc",
    })
  }
}

impl FromStr for SortDirection {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "asc" | "ascending" => Ok(Self::Ascending),
      "desc" | "descending" => Ok(Self::Descending),
      _ => Err(Error::UnknownSortDirection(s.to_owned())),
    }
  }
}

// ─── Criteria ────────────────────────────────────────────────────────────────

/// The current filter and sort selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCriteria {
  /// Case-insensitive substring matched against role or company.
  pub search_query:   String,
  /// Exact status to keep; `None` keeps all.
  pub status_filter:  Option<ApplicationStatus>,
  pub sort_option:    SortOption,
  pub sort_direction: SortDirection,
}

impl ViewCriteria {
  /// Whether `app` passes both the text and the status filter.
  pub fn matches(&self, app: &JobApplication) -> bool {
    let needle = self.search_query.to_lowercase();
    let text_ok = needle.is_empty()
      || app.role.to_lowercase().contains(&needle)
      || app.company.to_lowercase().contains(&needle);
    let status_ok = self.status_filter.is_none_or(|s| s == app.status);
    text_ok && status_ok
  }

  /// Order two records by the selected key and direction.
  pub fn compare(&self, a: &JobApplication, b: &JobApplication) -> Ordering {
    let ord = match self.sort_option {
      SortOption::Date => a.application_date.cmp(&b.application_date),
      SortOption::Status => a.status.rank().cmp(&b.status.rank()),
    };
    match self.sort_direction {
      SortDirection::Ascending => ord,
      SortDirection::Descending => ord.reverse(),
    }
  }

  /// Filter then stably sort `apps`. Records with equal keys keep their
  /// input order in either direction.
  pub fn apply<'a, I>(&self, apps: I) -> Vec<&'a JobApplication>
  where
    I: IntoIterator<Item = &'a JobApplication>,
  {
    let mut visible: Vec<&JobApplication> =
      apps.into_iter().filter(|app| self.matches(app)).collect();
    visible.sort_by(|a, b| self.compare(a, b));
    visible
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_sort_keys() {
    assert_eq!("Status".parse::<SortOption>().unwrap(), SortOption::Status);
    assert_eq!("ascending".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
    assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Descending);
    assert!("company".parse::<SortOption>().is_err());
  }

  #[test]
  fn defaults_sort_newest_first() {
    let c = ViewCriteria::default();
    assert_eq!(c.sort_option, SortOption::Date);
    assert_eq!(c.sort_direction, SortDirection::Descending);
    assert!(c.search_query.is_empty());
    assert!(c.status_filter.is_none());
  }

  #[test]
  fn matches_needs_text_and_status() {
    let on = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let app = crate::NewApplication::new("Backend Engineer", "Acme", on)
      .into_application(crate::ApplicationId::generate(), chrono::Utc::now());

    let mut c = ViewCriteria { search_query: "ACME".into(), ..ViewCriteria::default() };
    assert!(c.matches(&app));
    c.status_filter = Some(ApplicationStatus::Interviewed);
    assert!(!c.matches(&app));
    c.status_filter = Some(ApplicationStatus::Applied);
    c.search_query = "frontend".into();
    assert!(!c.matches(&app));
  }

  #[test]
  fn reversed_flips() {
    assert_eq!(SortDirection::Ascending.reversed(), SortDirection::Descending);
    assert_eq!(SortDirection::Descending.reversed(), SortDirection::Ascending);
  }
}
