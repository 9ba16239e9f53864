//! Rule-based structure recovery.

use std::sync::LazyLock;

use regex::Regex;

use crate::layout::paragraph_spans;
use crate::model::{ElementKind, Metadata, Section, StructureElement};

#[allow(clippy::expect_used)]
static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z\s:]{2,50}$").expect("valid heading regex"));

/// Minimum byte distance between two accepted section headings.
const SECTION_SPACING: usize = 100;

/// Recovers document structure from plain text.
///
/// Implementations must work on the text alone; richer strategies can be
/// swapped in behind this trait.
pub trait StructureAnalyzer: Send + Sync {
    /// Title, author and date.
    fn extract_metadata(&self, text: &str) -> Metadata;

    /// Classified paragraphs in document order.
    fn identify_structure(&self, text: &str) -> Vec<StructureElement>;

    /// Section headings in document order.
    fn identify_sections(&self, text: &str) -> Vec<Section>;
}

/// Default analyzer using line and paragraph heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAnalyzer;

impl HeuristicAnalyzer {
    /// Create a heuristic analyzer.
    pub fn new() -> Self {
        Self
    }
}

impl StructureAnalyzer for HeuristicAnalyzer {
    fn extract_metadata(&self, text: &str) -> Metadata {
        text.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(Metadata::with_title)
            .unwrap_or_default()
    }

    fn identify_structure(&self, text: &str) -> Vec<StructureElement> {
        paragraph_spans(text)
            .into_iter()
            .enumerate()
            .map(|(position, (_, content))| StructureElement {
                kind: classify_paragraph(content, position),
                content: content.to_string(),
                position,
            })
            .collect()
    }

    fn identify_sections(&self, text: &str) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            let start = offset;
            offset += line.len();

            let candidate = line.trim_end_matches(['\n', '\r']);
            if !is_heading_line(candidate) {
                continue;
            }
            if let Some(last) = sections.last() {
                if start - last.position < SECTION_SPACING {
                    continue;
                }
            }
            sections.push(Section::new(candidate.trim(), start));
        }

        log::debug!("HeuristicAnalyzer: {} sections", sections.len());
        sections
    }
}

/// Whether a single line looks like a section heading.
pub fn is_heading_line(line: &str) -> bool {
    HEADING_LINE.is_match(line)
}

fn classify_paragraph(content: &str, index: usize) -> ElementKind {
    let len = content.chars().count();
    let lower = content.to_lowercase();

    if len < 100 && is_all_caps(content) {
        ElementKind::Heading
    } else if index == 0 && len < 200 {
        ElementKind::Abstract
    } else if lower.contains("references") || lower.contains("bibliography") {
        ElementKind::Bibliography
    } else {
        ElementKind::Paragraph
    }
}

fn is_all_caps(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| !c.is_lowercase())
}
