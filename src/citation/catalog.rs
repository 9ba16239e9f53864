//! Declarative table of citation recognition patterns.
//!
//! One row per `(style, kind)`. The detector walks the whole table; nothing
//! else in the crate knows which regex belongs to which style.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{CitationKind, Style};

/// Author token: capitalized name, optionally hyphenated or multi-word,
/// followed by an optional second author and/or "et al.".
const AUTHOR: &str = r"([A-Z][a-z]+(?:[-\s][A-Z][a-z]+)*)(?:\s+and\s+[A-Z][a-z]+)?(?:\s+et\s+al\.?)?";

/// Raw catalog rows: style, kind, pattern template (`{author}` is expanded),
/// and whether the match must not directly follow a digit.
const CATALOG: &[(Style, CitationKind, &str, bool)] = &[
    // (Smith 45), (Smith and Jones 45-47)
    (Style::Mla, CitationKind::InText, r"\({author}\s+(\d+)(?:-\d+)?\)", false),
    (Style::Mla, CitationKind::Parenthetical, r"\({author}\s+(\d+)(?:-\d+)?\)", false),
    // Smith (2020), Smith (2020, p. 4)
    (
        Style::Apa,
        CitationKind::InText,
        r"{author}\s+\((\d{4})(?:,\s+p\.?\s+\d+(?:-\d+)?)?\)",
        false,
    ),
    // (Smith, 2020), (Smith et al., 2020, p. 4)
    (
        Style::Apa,
        CitationKind::Parenthetical,
        r"\({author},\s+(\d{4})(?:,\s+p\.?\s+\d+(?:-\d+)?)?\)",
        false,
    ),
    // Smith (2020), Smith (2020, 45)
    (
        Style::Chicago,
        CitationKind::InText,
        r"{author}\s+\((\d{4})(?:,\s+(\d+(?:-\d+)?))?\)",
        false,
    ),
    // 12. Smith, A Title, 45
    (
        Style::Chicago,
        CitationKind::Footnote,
        r"(\d+)\.?\s+([A-Z][a-z]+(?:[-\s][A-Z][a-z]+)*),\s+[^,]+,\s+(\d+)(?:-\d+)?",
        true,
    ),
];

#[allow(clippy::expect_used)]
static STANDARD: LazyLock<PatternCatalog> = LazyLock::new(|| {
    PatternCatalog::from_rows(CATALOG).expect("built-in citation patterns are valid")
});

/// A compiled recognition pattern.
#[derive(Debug, Clone)]
pub struct CitationPattern {
    /// Style this pattern votes for
    pub style: Style,
    /// Citation kind this pattern recognizes
    pub kind: CitationKind,
    /// Compiled expression
    pub regex: Regex,
    /// Reject matches that start right after a digit
    pub forbid_leading_digit: bool,
}

impl CitationPattern {
    /// Find all non-overlapping matches in `haystack`.
    ///
    /// Yields `(match start, match text, capture groups)`.
    pub fn find_all<'h>(&self, haystack: &'h str) -> Vec<(usize, &'h str, Vec<Option<String>>)> {
        let mut found = Vec::new();
        let mut start = 0;

        while start <= haystack.len() {
            let Some(caps) = self.regex.captures_at(haystack, start) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };

            if self.forbid_leading_digit && preceded_by_digit(haystack, whole.start()) {
                // retry one character further on, like a negative lookbehind would
                start = next_char_boundary(haystack, whole.start());
                continue;
            }

            let groups = caps
                .iter()
                .skip(1)
                .map(|g| g.map(|m| m.as_str().to_string()))
                .collect();
            found.push((whole.start(), whole.as_str(), groups));

            start = if whole.end() > whole.start() {
                whole.end()
            } else {
                next_char_boundary(haystack, whole.end())
            };
        }

        found
    }
}

fn preceded_by_digit(haystack: &str, at: usize) -> bool {
    haystack[..at]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit())
}

fn next_char_boundary(haystack: &str, at: usize) -> usize {
    haystack[at..]
        .chars()
        .next()
        .map_or(haystack.len() + 1, |c| at + c.len_utf8())
}

/// The full `style → kind → pattern` table.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    patterns: Vec<CitationPattern>,
}

impl PatternCatalog {
    /// The built-in catalog covering MLA, APA and Chicago.
    pub fn standard() -> &'static PatternCatalog {
        &STANDARD
    }

    /// Build a catalog from `(style, kind, pattern, forbid_leading_digit)` rows.
    ///
    /// `{author}` in a pattern is replaced with the shared author expression.
    pub fn from_rows(rows: &[(Style, CitationKind, &str, bool)]) -> Result<Self, regex::Error> {
        let patterns = rows
            .iter()
            .map(|(style, kind, template, forbid)| -> Result<CitationPattern, regex::Error> {
                let source = template.replace("{author}", AUTHOR);
                Ok(CitationPattern {
                    style: *style,
                    kind: *kind,
                    regex: Regex::new(&source)?,
                    forbid_leading_digit: *forbid,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { patterns })
    }

    /// All patterns in table order.
    pub fn patterns(&self) -> &[CitationPattern] {
        &self.patterns
    }

    /// Patterns registered for one style.
    pub fn patterns_for(&self, style: Style) -> impl Iterator<Item = &CitationPattern> {
        self.patterns.iter().filter(move |p| p.style == style)
    }

    /// Look up the pattern for a `(style, kind)` pair.
    pub fn get(&self, style: Style, kind: CitationKind) -> Option<&CitationPattern> {
        self.patterns
            .iter()
            .find(|p| p.style == style && p.kind == kind)
    }

    /// Citation kinds each style recognizes.
    pub fn kinds(style: Style) -> &'static [CitationKind] {
        match style {
            Style::Mla => &[CitationKind::InText, CitationKind::Parenthetical],
            Style::Apa => &[CitationKind::InText, CitationKind::Parenthetical],
            Style::Chicago => &[CitationKind::InText, CitationKind::Footnote],
        }
    }
}
