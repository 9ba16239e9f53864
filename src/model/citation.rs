//! Citation-level types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An academic citation style.
///
/// The declaration order is the canonical enumeration order and doubles as
/// the tie-break priority when voting (MLA > APA > Chicago).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Modern Language Association
    Mla,
    /// American Psychological Association
    Apa,
    /// Chicago Manual of Style
    Chicago,
}

impl Style {
    /// All styles in canonical order.
    pub const ALL: [Style; 3] = [Style::Mla, Style::Apa, Style::Chicago];

    /// Lowercase identifier (`mla`, `apa`, `chicago`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Mla => "mla",
            Style::Apa => "apa",
            Style::Chicago => "chicago",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Style::Mla => "MLA",
            Style::Apa => "APA",
            Style::Chicago => "Chicago",
        }
    }

    fn index(self) -> usize {
        match self {
            Style::Mla => 0,
            Style::Apa => 1,
            Style::Chicago => 2,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mla" => Ok(Style::Mla),
            "apa" => Ok(Style::Apa),
            "chicago" => Ok(Style::Chicago),
            _ => Err(Error::InvalidStyle(s.to_string())),
        }
    }
}

/// How a citation appears in the prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationKind {
    /// Narrative reference woven into the sentence, e.g. `Smith (2020)`
    InText,
    /// Bracketed reference, e.g. `(Smith 45)`
    Parenthetical,
    /// Numbered note, e.g. `12. Smith, Title, 45`
    Footnote,
}

impl CitationKind {
    /// Lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationKind::InText => "in_text",
            CitationKind::Parenthetical => "parenthetical",
            CitationKind::Footnote => "footnote",
        }
    }
}

impl fmt::Display for CitationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A citation found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// The matched citation text
    pub text: String,

    /// Style whose pattern produced this match
    pub style: Style,

    /// Citation kind within that style
    pub kind: CitationKind,

    /// The sentence containing the match
    pub sentence: String,

    /// Byte offset of the match start in the analyzed text
    pub position: usize,

    /// Capture groups in declaration order (`None` for groups that did not participate)
    pub groups: Vec<Option<String>>,

    /// Surrounding text for display
    #[serde(default)]
    pub context: String,
}

impl Citation {
    /// Create a citation with no sentence or context.
    pub fn new(
        text: impl Into<String>,
        style: Style,
        kind: CitationKind,
        position: usize,
        groups: Vec<Option<String>>,
    ) -> Self {
        Self {
            text: text.into(),
            style,
            kind,
            sentence: String::new(),
            position,
            groups,
            context: String::new(),
        }
    }

    /// Get a capture group by index, if it participated in the match.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }

    /// Byte offset one past the end of the match.
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }
}

/// Number of citation matches per style.
///
/// Always carries all three styles; absent styles count zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleCounts {
    /// MLA match count
    pub mla: usize,
    /// APA match count
    pub apa: usize,
    /// Chicago match count
    pub chicago: usize,
}

impl StyleCounts {
    /// Create zeroed counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a style.
    pub fn get(&self, style: Style) -> usize {
        self.as_array()[style.index()]
    }

    /// Set the count for a style.
    pub fn set(&mut self, style: Style, count: usize) {
        *self.slot(style) = count;
    }

    /// Increment the count for a style by one.
    pub fn increment(&mut self, style: Style) {
        *self.slot(style) += 1;
    }

    /// Sum over all styles.
    pub fn total(&self) -> usize {
        self.mla + self.apa + self.chicago
    }

    /// Check whether every count is zero.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate `(style, count)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Style, usize)> + '_ {
        Style::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    fn as_array(&self) -> [usize; 3] {
        [self.mla, self.apa, self.chicago]
    }

    fn slot(&mut self, style: Style) -> &mut usize {
        match style {
            Style::Mla => &mut self.mla,
            Style::Apa => &mut self.apa,
            Style::Chicago => &mut self.chicago,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_str() {
        assert_eq!("mla".parse::<Style>().unwrap(), Style::Mla);
        assert_eq!(" APA ".parse::<Style>().unwrap(), Style::Apa);
        assert_eq!("Chicago".parse::<Style>().unwrap(), Style::Chicago);
        assert!(matches!(
            "harvard".parse::<Style>(),
            Err(Error::InvalidStyle(_))
        ));
    }

    #[test]
    fn test_style_serde_lowercase() {
        let json = serde_json::to_string(&Style::Chicago).unwrap();
        assert_eq!(json, "\"chicago\"");
        let kind = serde_json::to_string(&CitationKind::InText).unwrap();
        assert_eq!(kind, "\"in_text\"");
    }

    #[test]
    fn test_style_counts() {
        let mut counts = StyleCounts::new();
        assert!(counts.is_empty());

        counts.increment(Style::Apa);
        counts.increment(Style::Apa);
        counts.set(Style::Chicago, 5);

        assert_eq!(counts.get(Style::Mla), 0);
        assert_eq!(counts.get(Style::Apa), 2);
        assert_eq!(counts.total(), 7);

        let pairs: Vec<_> = counts.iter().collect();
        assert_eq!(
            pairs,
            vec![(Style::Mla, 0), (Style::Apa, 2), (Style::Chicago, 5)]
        );
    }

    #[test]
    fn test_citation_group_access() {
        let citation = Citation::new(
            "Smith (2020)",
            Style::Chicago,
            CitationKind::InText,
            10,
            vec![Some("Smith".into()), Some("2020".into()), None],
        );
        assert_eq!(citation.group(0), Some("Smith"));
        assert_eq!(citation.group(2), None);
        assert_eq!(citation.group(9), None);
        assert_eq!(citation.end(), 22);
    }
}
