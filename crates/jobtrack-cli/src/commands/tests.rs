//! Handler tests against an in-memory store.

use chrono::NaiveDate;
use jobtrack_core::{
  ApplicationStatus, ApplicationStore, JobType, MemoryStorage, Persistence, SortOption,
};

use super::*;

fn store() -> ApplicationStore<MemoryStorage> {
  ApplicationStore::open(Persistence::new(MemoryStorage::new()))
}

fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() }

fn fields(role: &str, company: &str, date: (i32, u32, u32)) -> FieldArgs {
  FieldArgs {
    role: Some(role.into()),
    company: Some(company.into()),
    date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
    ..FieldArgs::default()
  }
}

fn output(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
  let mut buf = Vec::new();
  f(&mut buf).unwrap();
  String::from_utf8(buf).unwrap()
}

#[test]
fn add_requires_role_and_company() {
  let mut s = store();
  let mut out = Vec::new();

  let blank_role = FieldArgs { role: Some("  ".into()), ..fields("", "Acme", (2024, 1, 1)) };
  assert!(add(&mut s, &blank_role, today(), &mut out).is_err());

  let no_company = FieldArgs { company: None, ..fields("Backend Engineer", "", (2024, 1, 1)) };
  assert!(add(&mut s, &no_company, today(), &mut out).is_err());

  assert!(s.is_empty());
}

#[test]
fn add_fills_fields_and_defaults_date_to_today() {
  let mut s = store();
  let args = FieldArgs {
    date: None,
    skills: Some("Rust, SQL,, ".into()),
    job_type: Some(JobType::Remote),
    location: Some("Bandung".into()),
    ..fields("Backend Engineer", "Acme", (2024, 1, 1))
  };
  let text = output(|out| add(&mut s, &args, today(), out));
  assert!(text.starts_with("Added "));

  let app = &s.applications()[0];
  assert_eq!(app.application_date, today());
  assert_eq!(app.skills, ["Rust", "SQL"]);
  assert_eq!(app.job_type, JobType::Remote);
  assert_eq!(app.status, ApplicationStatus::Applied);
  assert_eq!(app.location.as_deref(), Some("Bandung"));
}

#[test]
fn update_by_prefix_and_clear_location() {
  let mut s = store();
  let args = FieldArgs { location: Some("Bandung".into()), ..fields("Backend Engineer", "Acme", (2024, 1, 1)) };
  add(&mut s, &args, today(), &mut Vec::new()).unwrap();
  let id = s.applications()[0].id;
  let prefix: String = id.to_string().chars().take(8).collect();

  let patch = FieldArgs { status: Some(ApplicationStatus::Interviewed), ..FieldArgs::default() };
  update(&mut s, &prefix, &patch, true, false, &mut Vec::new()).unwrap();

  let app = s.get(id).unwrap();
  assert_eq!(app.status, ApplicationStatus::Interviewed);
  assert_eq!(app.location, None);
  assert_eq!(app.role, "Backend Engineer");
}

#[test]
fn update_without_fields_is_rejected() {
  let mut s = store();
  add(&mut s, &fields("Backend Engineer", "Acme", (2024, 1, 1)), today(), &mut Vec::new()).unwrap();
  let id = s.applications()[0].id.to_string();
  assert!(update(&mut s, &id, &FieldArgs::default(), false, false, &mut Vec::new()).is_err());
}

#[test]
fn unknown_id_is_an_error() {
  let mut s = store();
  let missing = ApplicationId::generate().to_string();
  assert!(delete(&mut s, &missing, &mut Vec::new()).is_err());
  assert!(delete(&mut s, "zzzz", &mut Vec::new()).is_err());
}

#[test]
fn list_applies_view_and_config_defaults() {
  let mut s = store();
  add(&mut s, &fields("Backend Engineer", "Acme", (2024, 1, 1)), today(), &mut Vec::new()).unwrap();
  add(&mut s, &fields("Frontend Developer", "Globex", (2024, 3, 1)), today(), &mut Vec::new()).unwrap();
  add(&mut s, &fields("Backend Developer", "Initech", (2024, 2, 1)), today(), &mut Vec::new()).unwrap();

  let cfg = CliConfig::default();
  let text = output(|out| list(&mut s, &ViewArgs::default(), &cfg, out));
  let roles: Vec<_> = text
    .lines()
    .map(|l| l.split_once("  [").unwrap().0.rsplit("  ").next().unwrap())
    .collect();
  assert_eq!(
    roles,
    ["Frontend Developer @ Globex", "Backend Developer @ Initech", "Backend Engineer @ Acme"]
  );

  let view = ViewArgs { search: Some("BACK".into()), asc: true, ..ViewArgs::default() };
  let text = output(|out| list(&mut s, &view, &cfg, out));
  assert_eq!(text.lines().count(), 2);
  assert!(text.lines().next().unwrap().contains("Backend Engineer"));
}

#[test]
fn list_reports_empty_result() {
  let mut s = store();
  let cfg = CliConfig { default_sort: SortOption::Status, ..CliConfig::default() };
  let text = output(|out| list(&mut s, &ViewArgs::default(), &cfg, out));
  assert_eq!(text, "No applications found.\n");
}

#[test]
fn show_renders_description_sections() {
  let mut s = store();
  let args = FieldArgs {
    description: Some("We ship.\n\nRequired Skills:\n• Rust\n• SQL".into()),
    ..fields("Backend Engineer", "Acme", (2024, 5, 22))
  };
  add(&mut s, &args, today(), &mut Vec::new()).unwrap();
  let id = s.applications()[0].id.to_string();

  let text = output(|out| show(&s, &id, today(), out));
  assert!(text.contains("2024-05-22 (10 days ago)"));
  assert!(text.contains("  Required Skills:\n    • Rust\n    • SQL\n"));
}

#[test]
fn export_writes_dated_file() {
  let dir = tempfile::tempdir().unwrap();
  let mut s = store();
  add(&mut s, &fields("Backend Engineer", "Acme", (2024, 1, 1)), today(), &mut Vec::new()).unwrap();
  add(&mut s, &fields("Frontend Developer", "Globex", (2024, 2, 1)), today(), &mut Vec::new()).unwrap();

  let cfg = CliConfig::default();
  let path = export(&mut s, dir.path(), &ViewArgs::default(), false, &cfg, today()).unwrap();
  assert_eq!(path.file_name().unwrap(), "job-applications-2024-06-01.csv");
  let text = std::fs::read_to_string(&path).unwrap();
  assert_eq!(text.lines().count(), 3);
  assert!(text.lines().nth(1).unwrap().contains("\"Backend Engineer\""));

  let path = export(&mut s, dir.path(), &ViewArgs::default(), true, &cfg, today()).unwrap();
  let text = std::fs::read_to_string(&path).unwrap();
  assert!(text.lines().nth(1).unwrap().contains("\"Frontend Developer\""));
}

#[test]
fn export_filter_flags_imply_visible() {
  let dir = tempfile::tempdir().unwrap();
  let mut s = store();
  add(&mut s, &fields("Backend Engineer", "Acme", (2024, 1, 1)), today(), &mut Vec::new()).unwrap();
  add(&mut s, &fields("Frontend Developer", "Globex", (2024, 2, 1)), today(), &mut Vec::new()).unwrap();

  let view = ViewArgs { search: Some("front".into()), ..ViewArgs::default() };
  assert!(view.is_set());
  assert!(!ViewArgs::default().is_set());

  let path = export(&mut s, dir.path(), &view, false, &CliConfig::default(), today()).unwrap();
  let text = std::fs::read_to_string(&path).unwrap();
  assert_eq!(text.lines().count(), 2);
  assert!(text.contains("\"Frontend Developer\""));
}

#[test]
fn split_skills_drops_blanks() {
  assert_eq!(split_skills(" Rust ,, Go,"), ["Rust", "Go"]);
  assert!(split_skills("").is_empty());
}
