//! Shape tests for the CSV export.

use chrono::{NaiveDate, TimeZone, Utc};
use jobtrack_core::{
  ApplicationId, ApplicationStatus, JobApplication, JobNature, JobType,
};

use crate::{HEADERS, export, export_file_name};

fn sample() -> JobApplication {
  JobApplication {
    id:               ApplicationId::generate(),
    role:             "Backend Engineer".into(),
    company:          "Acme, Inc.".into(),
    description:      "We build APIs.\n\nRequired Skills:\n• Rust".into(),
    skills:           vec!["Rust".into(), "SQL".into(), "Docker".into()],
    application_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
    status:           ApplicationStatus::OfferReceived,
    job_type:         JobType::Hybrid,
    job_nature:       JobNature::Contract,
    location:         Some("Jakarta".into()),
    notes:            Some("not exported".into()),
    created_at:       Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
  }
}

#[test]
fn single_record_is_two_lines() {
  let out = export(&[sample()]).unwrap();
  assert_eq!(out.lines().count(), 2);
}

#[test]
fn header_lists_columns_quoted() {
  let out = export(&[]).unwrap();
  let expected = HEADERS.map(|h| format!("\"{h}\"")).join(",");
  assert_eq!(out, format!("{expected}\n"));
}

#[test]
fn row_cells_are_quoted_and_flattened() {
  let out = export(&[sample()]).unwrap();
  let row = out.lines().nth(1).unwrap();
  assert_eq!(
    row,
    "\"Backend Engineer\",\"Acme, Inc.\",\"Hybrid\",\"Contract\",\"Jakarta\",\
     \"Rust; SQL; Docker\",\"We build APIs.  Required Skills: • Rust\",\
     \"2024-03-15\",\"Offer Received\""
  );
}

#[test]
fn missing_location_is_empty_cell() {
  let mut app = sample();
  app.location = None;
  app.description = "a\r\nb\rc".into();
  let out = export(&[app]).unwrap();
  let row = out.lines().nth(1).unwrap();
  assert!(row.contains(",\"Contract\",\"\",\"Rust; SQL; Docker\",\"a b c\","));
}

#[test]
fn embedded_quotes_are_doubled() {
  let mut app = sample();
  app.role = "\"Senior\" Engineer".into();
  let out = export(&[app]).unwrap();
  assert!(out.lines().nth(1).unwrap().starts_with("\"\"\"Senior\"\" Engineer\","));
}

#[test]
fn rows_follow_input_order() {
  let mut second = sample();
  second.role = "Second".into();
  let out = export([&sample(), &second]).unwrap();
  let roles: Vec<_> = out.lines().skip(1).map(|l| l.split(',').next().unwrap()).collect();
  assert_eq!(roles, ["\"Backend Engineer\"", "\"Second\""]);
}

#[test]
fn file_name_uses_iso_date() {
  let on = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
  assert_eq!(export_file_name(on), "job-applications-2024-07-04.csv");
}
