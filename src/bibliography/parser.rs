//! Reference-list location and entry parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Diagnostics;
use crate::model::BibliographyEntry;

/// Section titles that introduce a reference list, in lookup priority order.
pub const SECTION_TITLES: [&str; 5] = [
    "Works Cited",
    "References",
    "Bibliography",
    "Literature Cited",
    "Sources",
];

/// Number of trailing paragraphs inspected when no titled section exists.
const TRAILING_PARAGRAPHS: usize = 3;

#[allow(clippy::expect_used)]
static SURNAME_INITIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([A-Z][a-z]+(?:[-\s][A-Z][a-z]+)*),\s+[A-Z]")
        .expect("surname-initial regex is valid")
});

#[allow(clippy::expect_used)]
static LEADING_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-z]+(?:[-\s][A-Z][a-z]+)*").expect("leading author regex is valid")
});

#[allow(clippy::expect_used)]
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("year regex is valid"));

#[allow(clippy::expect_used)]
static QUOTED_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["\u{201C}]([^"\u{201D}]+)["\u{201D}]"#).expect("quoted title regex is valid")
});

#[allow(clippy::expect_used)]
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url regex is valid"));

#[allow(clippy::expect_used)]
static LABELLED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[A-Z][a-zA-Z\s]+:|\[)").expect("labelled line regex is valid")
});

#[allow(clippy::expect_used)]
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("paragraph break regex is valid"));

/// Where a bibliography block was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionSource {
    /// Under one of [`SECTION_TITLES`]
    Titled(&'static str),
    /// Guessed from the last paragraphs of the document
    TrailingParagraphs,
}

/// A located bibliography block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibliographySection<'a> {
    /// How the block was found
    pub source: SectionSource,
    /// Block text (without the title line)
    pub body: &'a str,
}

/// Finds and parses reference lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct BibliographyParser;

impl BibliographyParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse the document's reference list into entries.
    ///
    /// Returns an empty list when no reference list can be found.
    pub fn parse(&self, text: &str) -> Vec<BibliographyEntry> {
        self.parse_with_diagnostics(text, &mut Diagnostics::new())
    }

    /// Parse, recording how the reference list was located.
    pub fn parse_with_diagnostics(
        &self,
        text: &str,
        diagnostics: &mut Diagnostics,
    ) -> Vec<BibliographyEntry> {
        let Some(section) = self.locate(text) else {
            diagnostics.info("no bibliography section found");
            return Vec::new();
        };

        match section.source {
            SectionSource::Titled(title) => {
                diagnostics.info(format!("bibliography found under \"{}\"", title))
            }
            SectionSource::TrailingParagraphs => diagnostics.warn(
                "no bibliography heading; treating the last paragraphs as the reference list",
            ),
        }

        let entries: Vec<BibliographyEntry> = split_entries(section.body)
            .into_iter()
            .map(parse_entry)
            .collect();

        let partial = entries
            .iter()
            .filter(|e| e.author.is_none() || e.year.is_none())
            .count();
        if partial > 0 {
            diagnostics.info(format!(
                "{} of {} bibliography entries are missing an author or year",
                partial,
                entries.len()
            ));
        }
        log::debug!("BibliographyParser: {} entries", entries.len());

        entries
    }

    /// Locate the reference-list block.
    pub fn locate<'a>(&self, text: &'a str) -> Option<BibliographySection<'a>> {
        SECTION_TITLES
            .iter()
            .find_map(|title| titled_block(text, title))
            .or_else(|| trailing_block(text))
    }
}

/// Byte-offset lines, each including its terminating newline.
fn lines_with_offsets(text: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start, line)
        })
        .collect()
}

fn titled_block<'a>(text: &'a str, title: &'static str) -> Option<BibliographySection<'a>> {
    let lines = lines_with_offsets(text);
    let heading = lines.iter().position(|(_, line)| {
        let trimmed = line.trim().trim_end_matches(':').trim_end();
        trimmed.eq_ignore_ascii_case(title)
    })?;

    let body_start = lines
        .get(heading + 1)
        .map_or(text.len(), |(start, _)| *start);
    let body_end = lines[heading + 1..]
        .iter()
        .find(|(_, line)| ends_block(line))
        .map_or(text.len(), |(start, _)| *start);

    Some(BibliographySection {
        source: SectionSource::Titled(title),
        body: text[body_start..body_end].trim(),
    })
}

/// A labelled line (`Appendix A:`), a bracketed marker, or an all-caps heading.
fn ends_block(line: &str) -> bool {
    if LABELLED_LINE.is_match(line) {
        return true;
    }
    let trimmed = line.trim();
    let letters = trimmed.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2
        && trimmed.len() < 100
        && trimmed
            .chars()
            .all(|c| c.is_uppercase() || c == ' ' || c == '-' || c == '&')
}

fn trailing_block(text: &str) -> Option<BibliographySection<'_>> {
    let breaks: Vec<usize> = PARAGRAPH_BREAK.find_iter(text).map(|m| m.end()).collect();
    // the original heuristic needs more than three paragraphs to call the tail a list
    if breaks.len() < TRAILING_PARAGRAPHS {
        return None;
    }
    let tail_start = breaks[breaks.len() - TRAILING_PARAGRAPHS];
    let tail = &text[tail_start..];
    if SURNAME_INITIAL.is_match(tail) {
        Some(BibliographySection {
            source: SectionSource::TrailingParagraphs,
            body: tail.trim(),
        })
    } else {
        None
    }
}

/// Split a block at lines beginning with a capital letter.
pub fn split_entries(block: &str) -> Vec<&str> {
    let mut starts: Vec<usize> = vec![0];
    for (offset, line) in lines_with_offsets(block).into_iter().skip(1) {
        if line.starts_with(|c: char| c.is_ascii_uppercase()) {
            starts.push(offset);
        }
    }
    starts.push(block.len());

    starts
        .windows(2)
        .map(|w| block[w[0]..w[1]].trim())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Pull author, year, title and URL out of one entry.
pub fn parse_entry(text: &str) -> BibliographyEntry {
    let mut entry = BibliographyEntry::new(text);

    let author = LEADING_AUTHOR.find(text);
    let year = YEAR.find(text);

    entry.author = author.map(|m| m.as_str().to_string());
    entry.year = year.map(|m| m.as_str().to_string());

    entry.title = match QUOTED_TITLE.captures(text).and_then(|c| c.get(1)) {
        Some(quoted) => non_empty(quoted.as_str().trim_end_matches(['.', ','])),
        None => match (author, year) {
            (Some(a), Some(y)) if y.start() > a.end() => {
                let between = trim_title(&text[a.end()..y.start()]);
                if is_initials(between) {
                    title_after_year(&text[y.end()..])
                } else {
                    non_empty(between)
                }
            }
            _ => None,
        },
    };

    entry.url = URL
        .find(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';']).to_string());

    entry
}

fn trim_title(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '(' | ')'))
}

/// A run of initials such as `J. R.`.
fn is_initials(text: &str) -> bool {
    !text.is_empty()
        && text.split_whitespace().all(|word| {
            let mut chars = word.trim_end_matches('.').chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
        })
}

/// First sentence after the year, as in `Smith, J. (2020). Title. Journal.`
fn title_after_year(rest: &str) -> Option<String> {
    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ')' | '.' | ','));
    let sentence = rest.split_once('.').map_or(rest, |(head, _)| head);
    non_empty(trim_title(sentence))
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

/// Parse a document's reference list with default settings.
pub fn parse_bibliography(text: &str) -> Vec<BibliographyEntry> {
    BibliographyParser::new().parse(text)
}
