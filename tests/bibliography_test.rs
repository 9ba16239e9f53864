//! Integration tests for reference-list parsing and formatting.

use citeform::bibliography::{format_entry_str, BibliographyParser, SectionSource};
use citeform::{format_entry, parse_bibliography, BibliographyEntry, EntryKind, Error, Style};

const PAPER: &str = "Reading in the Digital Age\n\n\
    Readers skim more than they admit (Smith, 2020).\n\n\
    References\n\
    Smith, J. (2020). Reading habits. Journal of Reading.\n\
    Jones, K. (2018). Skimming and scanning. Academic Press.\n";

#[test]
fn test_references_heading_two_entries() {
    let entries = parse_bibliography(PAPER);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| !e.raw.is_empty()));
    assert_eq!(entries[0].author.as_deref(), Some("Smith"));
    assert_eq!(entries[1].year.as_deref(), Some("2018"));
}

#[test]
fn test_locate_reports_source() {
    let parser = BibliographyParser::new();
    let section = parser.locate(PAPER).expect("references section");
    assert_eq!(section.source, SectionSource::Titled("References"));
    assert!(section.body.starts_with("Smith, J."));
}

#[test]
fn test_no_bibliography() {
    assert!(parse_bibliography("Only a short note.").is_empty());
    assert!(parse_bibliography("").is_empty());
}

#[test]
fn test_formatting_is_idempotent() {
    let entry = BibliographyEntry::new("raw")
        .with_author("Smith, John")
        .with_title("Reading Habits")
        .with_year("2020")
        .with_journal("Journal of Reading", "12", "3", "45-67");

    for style in Style::ALL {
        let first = format_entry(&entry, style);
        let second = format_entry(&entry, style);
        assert_eq!(first, second);
    }
}

#[test]
fn test_parsed_entries_format_with_fallbacks() {
    let entries = parse_bibliography(PAPER);
    let formatted = format_entry(&entries[1], Style::Mla);
    assert_eq!(entries[1].kind(), EntryKind::Book);
    assert!(formatted.starts_with("Jones. "));
    assert!(formatted.ends_with(", 2018."));
}

#[test]
fn test_web_entry_kind() {
    let entries = parse_bibliography(
        "Body.\n\nWorks Cited\nLee, Kim. \"Citations Online.\" 2021. https://example.org/cite.\n",
    );
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].url.as_deref(), Some("https://example.org/cite"));
    assert_eq!(entries[0].kind(), EntryKind::Web);
    assert_eq!(
        format_entry(&entries[0], Style::Apa),
        "Lee. (2021). Citations Online. . https://example.org/cite"
    );
}

#[test]
fn test_format_entry_str_unknown_style() {
    let entry = BibliographyEntry::new("raw");
    assert!(matches!(
        format_entry_str(&entry, "turabian"),
        Err(Error::InvalidStyle(_))
    ));
}
