//! Reference-list entry formatting.
//!
//! One pure template per `(style, entry kind)` pair. The match in
//! [`template`] is exhaustive, so adding a style or kind fails to compile
//! until every combination has a template.

use crate::error::Result;
use crate::model::{BibliographyEntry, EntryKind, Style};

/// Fallback author.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Fallback title.
pub const UNTITLED: &str = "Untitled";
/// Fallback year.
pub const NO_DATE: &str = "n.d.";

/// Entry fields with fallbacks applied.
struct Fields<'a> {
    author: &'a str,
    title: &'a str,
    year: &'a str,
    journal: &'a str,
    volume: &'a str,
    issue: &'a str,
    pages: &'a str,
    publisher: &'a str,
    location: &'a str,
    url: &'a str,
}

impl<'a> Fields<'a> {
    fn from_entry(entry: &'a BibliographyEntry) -> Self {
        Self {
            author: field_or(&entry.author, UNKNOWN_AUTHOR),
            title: field_or(&entry.title, UNTITLED),
            year: field_or(&entry.year, NO_DATE),
            journal: field_or(&entry.journal, ""),
            volume: field_or(&entry.volume, ""),
            issue: field_or(&entry.issue, ""),
            pages: field_or(&entry.pages, ""),
            publisher: field_or(&entry.publisher, ""),
            location: field_or(&entry.location, ""),
            url: field_or(&entry.url, ""),
        }
    }
}

fn field_or<'a>(field: &'a Option<String>, fallback: &'a str) -> &'a str {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => fallback,
    }
}

type Template = fn(&Fields<'_>) -> String;

/// Template for a style and entry kind.
fn template(style: Style, kind: EntryKind) -> Template {
    match (style, kind) {
        (Style::Mla, EntryKind::Journal) => |f: &Fields<'_>| {
            format!(
                "{}. \"{}.\" {}, vol. {}, no. {}, {}, pp. {}.",
                f.author, f.title, f.journal, f.volume, f.issue, f.year, f.pages
            )
        },
        (Style::Mla, EntryKind::Web) => |f: &Fields<'_>| {
            format!(
                "{}. \"{}.\" {}, {}, {}.",
                f.author, f.title, f.publisher, f.year, f.url
            )
        },
        (Style::Mla, EntryKind::Book) => |f: &Fields<'_>| {
            format!(
                "{}. {}. {}: {}, {}.",
                f.author, f.title, f.location, f.publisher, f.year
            )
        },
        (Style::Apa, EntryKind::Journal) => |f: &Fields<'_>| {
            format!(
                "{}. ({}). {}. {}, {}({}), {}.",
                f.author, f.year, f.title, f.journal, f.volume, f.issue, f.pages
            )
        },
        (Style::Apa, EntryKind::Web) => |f: &Fields<'_>| {
            format!(
                "{}. ({}). {}. {}. {}",
                f.author, f.year, f.title, f.publisher, f.url
            )
        },
        (Style::Apa, EntryKind::Book) => |f: &Fields<'_>| {
            format!("{}. ({}). {}. {}.", f.author, f.year, f.title, f.publisher)
        },
        (Style::Chicago, EntryKind::Journal) => |f: &Fields<'_>| {
            format!(
                "{}. \"{}.\" {} {}, no. {} ({}): {}.",
                f.author, f.title, f.journal, f.volume, f.issue, f.year, f.pages
            )
        },
        (Style::Chicago, EntryKind::Web) => |f: &Fields<'_>| {
            format!(
                "{}. \"{}.\" {}, {}. {}.",
                f.author, f.title, f.publisher, f.year, f.url
            )
        },
        (Style::Chicago, EntryKind::Book) => |f: &Fields<'_>| {
            format!(
                "{}. {}. {}: {}, {}.",
                f.author, f.title, f.location, f.publisher, f.year
            )
        },
    }
}

/// Format a bibliography entry in the given style.
pub fn format_entry(entry: &BibliographyEntry, style: Style) -> String {
    let fields = Fields::from_entry(entry);
    template(style, entry.kind())(&fields)
}

/// Format using a style identifier (`mla`, `apa`, `chicago`).
pub fn format_entry_str(entry: &BibliographyEntry, style: &str) -> Result<String> {
    let style: Style = style.parse()?;
    Ok(format_entry(entry, style))
}

/// Format a whole reference list, preserving order.
pub fn format_entries(entries: &[BibliographyEntry], style: Style) -> Vec<String> {
    entries.iter().map(|e| format_entry(e, style)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn article() -> BibliographyEntry {
        BibliographyEntry::new("raw")
            .with_author("Smith, John")
            .with_title("Reading Habits")
            .with_year("2020")
            .with_journal("Journal of Reading", "12", "3", "45-67")
    }

    fn website() -> BibliographyEntry {
        BibliographyEntry::new("raw")
            .with_author("Lee, Kim")
            .with_title("Citations Online")
            .with_year("2021")
            .with_publisher("Cite Hub")
            .with_url("https://example.org/cite")
    }

    fn book() -> BibliographyEntry {
        BibliographyEntry::new("raw")
            .with_author("Doe, Jane")
            .with_title("Writing Well")
            .with_year("2019")
            .with_publisher("Academic Press")
            .with_location("Boston")
    }

    #[test]
    fn test_mla_templates() {
        assert_eq!(
            format_entry(&article(), Style::Mla),
            "Smith, John. \"Reading Habits.\" Journal of Reading, vol. 12, no. 3, 2020, pp. 45-67."
        );
        assert_eq!(
            format_entry(&website(), Style::Mla),
            "Lee, Kim. \"Citations Online.\" Cite Hub, 2021, https://example.org/cite."
        );
        assert_eq!(
            format_entry(&book(), Style::Mla),
            "Doe, Jane. Writing Well. Boston: Academic Press, 2019."
        );
    }

    #[test]
    fn test_apa_templates() {
        assert_eq!(
            format_entry(&article(), Style::Apa),
            "Smith, John. (2020). Reading Habits. Journal of Reading, 12(3), 45-67."
        );
        assert_eq!(
            format_entry(&website(), Style::Apa),
            "Lee, Kim. (2021). Citations Online. Cite Hub. https://example.org/cite"
        );
        assert_eq!(
            format_entry(&book(), Style::Apa),
            "Doe, Jane. (2019). Writing Well. Academic Press."
        );
    }

    #[test]
    fn test_chicago_templates() {
        assert_eq!(
            format_entry(&article(), Style::Chicago),
            "Smith, John. \"Reading Habits.\" Journal of Reading 12, no. 3 (2020): 45-67."
        );
        assert_eq!(
            format_entry(&website(), Style::Chicago),
            "Lee, Kim. \"Citations Online.\" Cite Hub, 2021. https://example.org/cite."
        );
        assert_eq!(
            format_entry(&book(), Style::Chicago),
            "Doe, Jane. Writing Well. Boston: Academic Press, 2019."
        );
    }

    #[test]
    fn test_fallbacks_applied_at_format_time() {
        let entry = BibliographyEntry::new("something");
        assert_eq!(
            format_entry(&entry, Style::Apa),
            "Unknown Author. (n.d.). Untitled. ."
        );
        // the entry itself stays partial
        assert_eq!(entry.author, None);
    }

    #[test]
    fn test_format_is_deterministic() {
        let entry = book();
        for style in Style::ALL {
            assert_eq!(format_entry(&entry, style), format_entry(&entry, style));
        }
    }

    #[test]
    fn test_format_entry_str() {
        assert!(matches!(
            format_entry_str(&book(), "ieee"),
            Err(Error::InvalidStyle(_))
        ));
        assert_eq!(
            format_entry_str(&book(), "apa").unwrap(),
            "Doe, Jane. (2019). Writing Well. Academic Press."
        );
    }

    #[test]
    fn test_format_entries_keeps_order() {
        let formatted = format_entries(&[book(), article()], Style::Mla);
        assert_eq!(formatted.len(), 2);
        assert!(formatted[0].starts_with("Doe"));
        assert!(formatted[1].starts_with("Smith"));
    }
}
