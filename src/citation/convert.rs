//! Cross-style citation conversion.
//!
//! Conversion is two table lookups: pull `(author, year, page)` out of the
//! source citation according to its style, then render those parts with the
//! target style's template. Information the source style never carried (MLA
//! has no year) comes out as `n.d.`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Citation, CitationKind, Style};

/// Text returned in place of a Chicago footnote.
///
/// Footnotes need consecutive numbering across the whole document, which a
/// single citation cannot know.
pub const UNSUPPORTED_FOOTNOTE: &str =
    "[unsupported: Chicago footnote conversion requires document-wide note numbering]";

/// Literal used when the year cannot be recovered.
pub const NO_DATE: &str = "n.d.";

const UNKNOWN_AUTHOR: &str = "Unknown Author";

#[allow(clippy::expect_used)]
static APA_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"p\.?\s+(\d+(?:-\d+)?)").expect("APA page regex is valid"));

/// Outcome of converting one citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Conversion {
    /// The citation rewritten in the target style
    Converted {
        /// Rewritten text
        text: String,
    },
    /// The target form cannot be produced from a single citation
    Unsupported {
        /// Why the conversion was refused
        reason: String,
    },
}

impl Conversion {
    /// The converted text, or the unsupported sentinel.
    pub fn as_str(&self) -> &str {
        match self {
            Conversion::Converted { text } => text,
            Conversion::Unsupported { .. } => UNSUPPORTED_FOOTNOTE,
        }
    }

    /// Check if a conversion was produced.
    pub fn is_supported(&self) -> bool {
        matches!(self, Conversion::Converted { .. })
    }

    fn converted(text: String) -> Self {
        Conversion::Converted { text }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Author, year and page pulled out of a citation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationParts {
    /// Author surname(s)
    pub author: String,
    /// Publication year, if the source style carries one
    pub year: Option<String>,
    /// Page or page range
    pub page: Option<String>,
    /// Note number for Chicago footnotes
    pub footnote: Option<String>,
}

impl CitationParts {
    /// Year or `n.d.`.
    pub fn year_or_nd(&self) -> &str {
        self.year.as_deref().unwrap_or(NO_DATE)
    }
}

/// Read the parts of `citation` as laid out by `from`'s patterns.
pub fn extract(citation: &Citation, from: Style) -> CitationParts {
    let owned = |i: usize| citation.group(i).map(str::to_string);
    let author = |i: usize| owned(i).unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

    match from {
        Style::Mla => CitationParts {
            author: author(0),
            year: None,
            page: owned(1),
            footnote: None,
        },
        Style::Apa => CitationParts {
            author: author(0),
            year: owned(1),
            page: APA_PAGE
                .captures(&citation.text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string()),
            footnote: None,
        },
        Style::Chicago => match citation.kind {
            CitationKind::Footnote => CitationParts {
                author: author(1),
                year: None,
                page: owned(2),
                footnote: owned(0),
            },
            _ => CitationParts {
                author: author(0),
                year: owned(1),
                page: owned(2),
                footnote: None,
            },
        },
    }
}

/// Render parts in the target style.
///
/// `form` selects Chicago's variant: in-text citations stay author-date,
/// anything else would become a footnote and is refused.
pub fn render(parts: &CitationParts, to: Style, form: CitationKind) -> Conversion {
    let author = &parts.author;
    match to {
        Style::Mla => match &parts.page {
            Some(page) => Conversion::converted(format!("({} {})", author, page)),
            None => Conversion::converted(format!("({})", author)),
        },
        Style::Apa => match (&parts.year, &parts.page) {
            (Some(year), Some(page)) => {
                Conversion::converted(format!("({}, {}, p. {})", author, year, page))
            }
            _ => Conversion::converted(format!("({}, {})", author, parts.year_or_nd())),
        },
        Style::Chicago => match form {
            CitationKind::InText => match &parts.page {
                Some(page) => Conversion::converted(format!(
                    "{} ({}, {})",
                    author,
                    parts.year_or_nd(),
                    page
                )),
                None => Conversion::converted(format!("{} ({})", author, parts.year_or_nd())),
            },
            CitationKind::Parenthetical | CitationKind::Footnote => Conversion::Unsupported {
                reason: "Chicago footnotes need document-wide consecutive numbering".to_string(),
            },
        },
    }
}

/// Convert a citation from one style to another.
pub fn convert(citation: &Citation, from: Style, to: Style) -> Conversion {
    let parts = extract(citation, from);
    let result = render(&parts, to, citation.kind);
    if !result.is_supported() {
        log::debug!(
            "convert: {:?} at {} cannot become a {} footnote",
            citation.text,
            citation.position,
            to
        );
    }
    result
}

/// Convert using style identifiers (`mla`, `apa`, `chicago`).
pub fn convert_str(citation: &Citation, from: &str, to: &str) -> Result<Conversion> {
    let from: Style = from.parse()?;
    let to: Style = to.parse()?;
    Ok(convert(citation, from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn groups(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    fn mla_smith() -> Citation {
        Citation::new(
            "(Smith 45)",
            Style::Mla,
            CitationKind::Parenthetical,
            0,
            groups(&[Some("Smith"), Some("45")]),
        )
    }

    #[test]
    fn test_mla_to_apa_is_lossy() {
        let result = convert(&mla_smith(), Style::Mla, Style::Apa);
        assert_eq!(result.as_str(), "(Smith, n.d.)");
    }

    #[test]
    fn test_mla_to_mla_keeps_page() {
        let result = convert(&mla_smith(), Style::Mla, Style::Mla);
        assert_eq!(result.as_str(), "(Smith 45)");
    }

    #[test]
    fn test_apa_with_page() {
        let citation = Citation::new(
            "(Smith, 2020, p. 4)",
            Style::Apa,
            CitationKind::Parenthetical,
            0,
            groups(&[Some("Smith"), Some("2020")]),
        );
        assert_eq!(convert(&citation, Style::Apa, Style::Apa).as_str(), "(Smith, 2020, p. 4)");
        assert_eq!(convert(&citation, Style::Apa, Style::Mla).as_str(), "(Smith 4)");
    }

    #[test]
    fn test_apa_without_page() {
        let citation = Citation::new(
            "(Smith, 2020)",
            Style::Apa,
            CitationKind::Parenthetical,
            0,
            groups(&[Some("Smith"), Some("2020")]),
        );
        assert_eq!(convert(&citation, Style::Apa, Style::Apa).as_str(), "(Smith, 2020)");
        assert_eq!(convert(&citation, Style::Apa, Style::Mla).as_str(), "(Smith)");
    }

    #[test]
    fn test_chicago_in_text_round() {
        let citation = Citation::new(
            "Jones (1998, 45)",
            Style::Chicago,
            CitationKind::InText,
            0,
            groups(&[Some("Jones"), Some("1998"), Some("45")]),
        );
        assert_eq!(
            convert(&citation, Style::Chicago, Style::Chicago).as_str(),
            "Jones (1998, 45)"
        );
        assert_eq!(
            convert(&citation, Style::Chicago, Style::Apa).as_str(),
            "(Jones, 1998, p. 45)"
        );
    }

    #[test]
    fn test_chicago_footnote_source() {
        let citation = Citation::new(
            "3. Smith, The Title, 45",
            Style::Chicago,
            CitationKind::Footnote,
            0,
            groups(&[Some("3"), Some("Smith"), Some("45")]),
        );
        let parts = extract(&citation, Style::Chicago);
        assert_eq!(parts.footnote.as_deref(), Some("3"));
        assert_eq!(parts.author, "Smith");
        assert_eq!(parts.year, None);
        assert_eq!(convert(&citation, Style::Chicago, Style::Mla).as_str(), "(Smith 45)");
    }

    #[test]
    fn test_footnote_target_is_unsupported() {
        let result = convert(&mla_smith(), Style::Mla, Style::Chicago);
        assert!(!result.is_supported());
        assert_eq!(result.as_str(), UNSUPPORTED_FOOTNOTE);
        assert_eq!(result.to_string(), UNSUPPORTED_FOOTNOTE);
    }

    #[test]
    fn test_in_text_to_chicago_in_text() {
        let citation = Citation::new(
            "Smith (2020)",
            Style::Apa,
            CitationKind::InText,
            0,
            groups(&[Some("Smith"), Some("2020")]),
        );
        assert_eq!(convert(&citation, Style::Apa, Style::Chicago).as_str(), "Smith (2020)");
    }

    #[test]
    fn test_missing_groups_fall_back() {
        let citation = Citation::new("()", Style::Mla, CitationKind::InText, 0, Vec::new());
        assert_eq!(convert(&citation, Style::Mla, Style::Mla).as_str(), "(Unknown Author)");
    }

    #[test]
    fn test_convert_str_rejects_unknown_style() {
        let result = convert_str(&mla_smith(), "mla", "harvard");
        assert!(matches!(result, Err(Error::InvalidStyle(_))));
        let result = convert_str(&mla_smith(), "MLA", "apa").unwrap();
        assert_eq!(result.as_str(), "(Smith, n.d.)");
    }

    #[test]
    fn test_conversion_serializes_with_status() {
        let json = serde_json::to_string(&convert(&mla_smith(), Style::Mla, Style::Mla)).unwrap();
        assert_eq!(json, r#"{"status":"converted","text":"(Smith 45)"}"#);
    }
}
