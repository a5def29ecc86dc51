//! Aggregate counts over the whole collection, as shown on the dashboard.

use serde::Serialize;

use crate::application::{ApplicationStatus, JobApplication};

/// Per-status totals. Always computed over every record, regardless of the
/// current filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationStats {
  pub total:       usize,
  pub applied:     usize,
  pub interviewed: usize,
  pub offers:      usize,
}

impl ApplicationStats {
  pub fn from_applications<'a, I>(apps: I) -> Self
  where
    I: IntoIterator<Item = &'a JobApplication>,
  {
    apps.into_iter().fold(Self::default(), |mut acc, app| {
      acc.total += 1;
      match app.status {
        ApplicationStatus::Applied => acc.applied += 1,
        ApplicationStatus::Interviewed => acc.interviewed += 1,
        ApplicationStatus::OfferReceived => acc.offers += 1,
      }
      acc
    })
  }

  pub fn count(&self, status: ApplicationStatus) -> usize {
    match status {
      ApplicationStatus::Applied => self.applied,
      ApplicationStatus::Interviewed => self.interviewed,
      ApplicationStatus::OfferReceived => self.offers,
    }
  }
}
