//! Display structure of a free-text job description.
//!
//! Descriptions are stored as plain text. Blank lines separate sections; a
//! section whose lines start with `•` is shown as a bullet list, with any
//! text before the first bullet as its title.

const BULLET: char = '•';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionSection {
  Paragraph(String),
  List { title: String, items: Vec<String> },
}

/// Split `text` into display sections. Empty sections are dropped.
pub fn sections(text: &str) -> Vec<DescriptionSection> {
  let text = text.replace("\r\n", "\n");
  text
    .split("\n\n")
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(section)
    .collect()
}

fn section(raw: &str) -> DescriptionSection {
  let is_list = raw.lines().any(|l| l.trim_start().starts_with(BULLET))
    || is_requirements_heading(raw);
  if !is_list {
    return DescriptionSection::Paragraph(raw.to_owned());
  }

  let mut title = String::new();
  let mut items = Vec::new();
  for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
    if let Some(item) = line.strip_prefix(BULLET) {
      items.push(item.trim().to_owned());
    } else if items.is_empty() {
      if !title.is_empty() {
        title.push(' ');
      }
      title.push_str(line);
    } else if let Some(last) = items.last_mut() {
      // Continuation of a wrapped bullet.
      last.push(' ');
      last.push_str(line);
    }
  }
  DescriptionSection::List { title, items }
}

fn is_requirements_heading(raw: &str) -> bool {
  let lower = raw.to_lowercase();
  lower.contains("required skills:") || lower.contains("candidate requirements:")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn paragraphs_split_on_blank_lines() {
    let got = sections("We build rockets.\n\nJoin us.");
    assert_eq!(
      got,
      vec![
        DescriptionSection::Paragraph("We build rockets.".into()),
        DescriptionSection::Paragraph("Join us.".into()),
      ]
    );
  }

  #[test]
  fn bullets_become_titled_list() {
    let got = sections("Required Skills:\n• Rust\n• SQL\n\nPerks");
    assert_eq!(
      got,
      vec![
        DescriptionSection::List {
          title: "Required Skills:".into(),
          items: vec!["Rust".into(), "SQL".into()],
        },
        DescriptionSection::Paragraph("Perks".into()),
      ]
    );
  }

  #[test]
  fn leading_bullet_has_empty_title() {
    let got = sections("• one\n• two\n  continued");
    assert_eq!(
      got,
      vec![DescriptionSection::List {
        title: String::new(),
        items: vec!["one".into(), "two continued".into()],
      }]
    );
  }

  #[test]
  fn indented_bullets_are_a_list() {
    let got = sections("What you'll do:\n  • design APIs\n  • review code");
    assert_eq!(
      got,
      vec![DescriptionSection::List {
        title: "What you'll do:".into(),
        items: vec!["design APIs".into(), "review code".into()],
      }]
    );
  }

  #[test]
  fn requirements_heading_without_bullets_is_a_list() {
    let got = sections("Candidate requirements: none listed");
    assert_eq!(
      got,
      vec![DescriptionSection::List {
        title: "Candidate requirements: none listed".into(),
        items: vec![],
      }]
    );
  }

  #[test]
  fn empty_text_has_no_sections() {
    assert!(sections("").is_empty());
    assert!(sections("\n\n\n\n").is_empty());
  }
}
