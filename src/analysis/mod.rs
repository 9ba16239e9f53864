//! Whole-document analysis.
//!
//! [`analyze`] runs every extractor over one manuscript: metadata, paragraph
//! structure, section headings, citation detection with style voting, and the
//! reference list. Nothing here fails on unusual input; gaps are reported
//! through [`Diagnostics`].

mod heuristic;

pub use heuristic::{is_heading_line, HeuristicAnalyzer, StructureAnalyzer};

use serde::{Deserialize, Serialize};
use unicode_normalization::{is_nfc, UnicodeNormalization};

use crate::bibliography::{format_entry, BibliographyParser};
use crate::citation::{convert, vote_with_diagnostics, CitationDetector, Conversion, Detection};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::layout::{break_lines, paragraph_spans, LayoutGeometry};
use crate::model::{
    BibliographyEntry, Citation, CitationKind, Metadata, Section, StructureElement, Style,
};
use crate::options::AnalyzeOptions;

/// Everything recovered from one manuscript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Title and other metadata
    pub metadata: Metadata,

    /// Classified paragraphs
    pub structure: Vec<StructureElement>,

    /// Section headings
    pub sections: Vec<Section>,

    /// Detected citations and per-style counts
    pub citations: Detection,

    /// Style with the most matches, `None` when nothing matched
    pub dominant_style: Option<Style>,

    /// Parsed reference list
    pub bibliography: Vec<BibliographyEntry>,

    /// Notes and warnings produced along the way
    pub diagnostics: Diagnostics,

    /// The analyzed text; citation and section positions index into it
    #[serde(skip)]
    pub text: String,
}

/// One citation rewritten in another style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedCitation {
    /// Source text as matched
    pub original: String,
    /// Byte offset of the source citation
    pub position: usize,
    /// Source citation form
    pub kind: CitationKind,
    /// Conversion outcome
    pub result: Conversion,
}

impl DocumentAnalysis {
    /// Citations detected for one style.
    pub fn citations_for(&self, style: Style) -> &[Citation] {
        self.citations.for_style(style)
    }

    /// Convert every citation detected as `from` into `to`.
    pub fn convert_citations(&self, from: Style, to: Style) -> Vec<ConvertedCitation> {
        self.citations
            .for_style(from)
            .iter()
            .map(|citation| ConvertedCitation {
                original: citation.text.clone(),
                position: citation.position,
                kind: citation.kind,
                result: convert(citation, from, to),
            })
            .collect()
    }

    /// Format every bibliography entry in `style`.
    pub fn format_bibliography(&self, style: Style) -> Vec<String> {
        self.bibliography
            .iter()
            .map(|entry| format_entry(entry, style))
            .collect()
    }

    /// Line numbers of each section heading once the text is wrapped with
    /// `geometry`.
    ///
    /// Lines are counted the same way [`crate::render::paginate_text`] lays
    /// them out, so the result can be fed to
    /// [`crate::layout::optimize_headings`].
    pub fn heading_lines(&self, geometry: &LayoutGeometry) -> Result<Vec<usize>> {
        heading_lines(&self.text, &self.sections, geometry)
    }
}

/// Map section byte offsets to wrapped line numbers.
pub(crate) fn heading_lines(
    text: &str,
    sections: &[Section],
    geometry: &LayoutGeometry,
) -> Result<Vec<usize>> {
    let width = geometry.wrap_width()?;

    let mut line = 0;
    let mut paragraphs = Vec::new();
    for (offset, paragraph) in paragraph_spans(text) {
        paragraphs.push((offset, paragraph, line));
        line += break_lines(paragraph, width).len();
    }

    let lines = sections
        .iter()
        .filter_map(|section| {
            let (offset, paragraph, first_line) = paragraphs
                .iter()
                .rev()
                .find(|(offset, _, _)| *offset <= section.position)?;
            let within = (section.position - offset).min(paragraph.len());
            let before = paragraph.get(..within).unwrap_or("");
            Some(first_line + break_lines(before, width).len())
        })
        .collect();
    Ok(lines)
}

/// Analyze a manuscript with the default [`HeuristicAnalyzer`].
pub fn analyze(text: &str, options: &AnalyzeOptions) -> DocumentAnalysis {
    analyze_with(text, options, &HeuristicAnalyzer)
}

/// Analyze a manuscript with a custom structure analyzer.
pub fn analyze_with(
    text: &str,
    options: &AnalyzeOptions,
    analyzer: &dyn StructureAnalyzer,
) -> DocumentAnalysis {
    let mut diagnostics = Diagnostics::new();

    let text = if options.normalize_unicode && !is_nfc(text) {
        diagnostics.info("input normalized to Unicode NFC; positions refer to the normalized text");
        text.nfc().collect::<String>()
    } else {
        text.to_string()
    };

    let metadata = analyzer.extract_metadata(&text);
    let structure = analyzer.identify_structure(&text);
    let sections = analyzer.identify_sections(&text);

    let detector = CitationDetector::new()
        .with_parallel(options.parallel)
        .with_context_chars(options.context_chars);
    let citations = detector.detect(&text);
    let dominant_style = vote_with_diagnostics(&citations.counts, &mut diagnostics);

    let footnotes = citations
        .for_style(Style::Chicago)
        .iter()
        .filter(|c| c.kind == CitationKind::Footnote)
        .count();
    if footnotes > 0 {
        diagnostics.info(format!(
            "{footnotes} Chicago footnote citations found; converting into footnote form is unsupported"
        ));
    }

    let bibliography = BibliographyParser::new().parse_with_diagnostics(&text, &mut diagnostics);

    log::debug!(
        "analyze: {} paragraphs, {} sections, {} citations, {} bibliography entries",
        structure.len(),
        sections.len(),
        citations.total(),
        bibliography.len()
    );

    DocumentAnalysis {
        metadata,
        structure,
        sections,
        citations,
        dominant_style,
        bibliography,
        diagnostics,
        text,
    }
}
