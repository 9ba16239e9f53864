//! # citeform
//!
//! Citation analysis and manuscript layout for MLA, APA and Chicago.
//!
//! This library detects in-text citations, decides which style a manuscript
//! follows, converts citations between styles, parses and formats reference
//! lists, and computes page geometry, line wrapping and pagination.
//!
//! ## Quick Start
//!
//! ```
//! use citeform::{analyze, AnalyzeOptions, Style};
//!
//! let text = "Readers skim (Smith 45).\n\nWorks Cited\nSmith, John. \"Skimming.\" 2020.";
//! let analysis = analyze(text, &AnalyzeOptions::default());
//!
//! assert_eq!(analysis.dominant_style, Some(Style::Mla));
//! assert_eq!(analysis.bibliography.len(), 1);
//! ```
//!
//! ## Features
//!
//! - **Citation detection**: one declarative pattern table per style and kind
//! - **Style voting**: dominant style with a fixed tie-break order
//! - **Conversion**: citations and reference entries rewritten per style
//! - **Layout**: unit-aware page geometry, greedy wrapping, orphan-free headings
//! - **Parallel processing**: Uses Rayon to scan sentences concurrently
//! - **Diagnostics**: every guess is reported back instead of logged away

pub mod analysis;
pub mod bibliography;
pub mod citation;
pub mod diagnostics;
pub mod error;
pub mod layout;
pub mod model;
pub mod options;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    analyze_with, ConvertedCitation, DocumentAnalysis, HeuristicAnalyzer, StructureAnalyzer,
};
pub use bibliography::BibliographyParser;
pub use citation::{
    vote, CitationDetector, Conversion, Detection, PatternCatalog, UNSUPPORTED_FOOTNOTE,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use layout::{
    break_lines, optimize_headings, paginate, ContentMetrics, HeadingPlacement, LayoutGeometry,
    Margins, PageGeometry, PageSize, Unit,
};
pub use model::{
    BibliographyEntry, Citation, CitationKind, ElementKind, EntryKind, Metadata, Section,
    StructureElement, Style, StyleCounts,
};
pub use options::AnalyzeOptions;
pub use render::{JsonFormat, PagedDocument};

use std::io::Read;
use std::path::Path;

/// Analyze a manuscript.
///
/// # Example
///
/// ```
/// use citeform::{analyze, AnalyzeOptions};
///
/// let analysis = analyze("See Smith (2020).", &AnalyzeOptions::default());
/// assert_eq!(analysis.citations.total(), 2);
/// ```
pub fn analyze(text: &str, options: &AnalyzeOptions) -> DocumentAnalysis {
    analysis::analyze(text, options)
}

/// Read a UTF-8 text file and analyze it.
pub fn analyze_file<P: AsRef<Path>>(path: P, options: &AnalyzeOptions) -> Result<DocumentAnalysis> {
    let text = std::fs::read_to_string(path)?;
    Ok(analyze(&text, options))
}

/// Read UTF-8 text from a reader and analyze it.
pub fn analyze_reader<R: Read>(mut reader: R, options: &AnalyzeOptions) -> Result<DocumentAnalysis> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(analyze(&text, options))
}

/// Detect citations with default settings.
pub fn detect_citations(text: &str) -> Detection {
    CitationDetector::new().detect(text)
}

/// Dominant citation style of a text, `None` if no citation matched.
pub fn dominant_style(text: &str) -> Option<Style> {
    vote(&detect_citations(text).counts)
}

/// Parse the reference list of a text.
pub fn parse_bibliography(text: &str) -> Vec<BibliographyEntry> {
    bibliography::parse_bibliography(text)
}

/// Format one bibliography entry.
pub fn format_entry(entry: &BibliographyEntry, style: Style) -> String {
    bibliography::format_entry(entry, style)
}

/// Convert one citation between styles.
pub fn convert_citation(citation: &Citation, from: Style, to: Style) -> Conversion {
    citation::convert(citation, from, to)
}

/// Builder for analyzing and laying out manuscripts.
///
/// # Example
///
/// ```
/// use citeform::{Citeform, PageSize, Style};
///
/// let result = Citeform::new()
///     .sequential()
///     .with_page(PageSize::A4)
///     .with_font_size(11.0)?
///     .analyze("Title\n\nAs argued (Smith 45).");
///
/// let converted = result.convert_citations(Style::Apa);
/// assert_eq!(converted[0].result.as_str(), "(Smith, n.d.)");
/// # Ok::<(), citeform::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Citeform {
    options: AnalyzeOptions,
    geometry: LayoutGeometry,
}

impl Citeform {
    /// Create a new builder with default options and US Letter geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Keep input exactly as given instead of normalizing to NFC.
    pub fn without_normalization(mut self) -> Self {
        self.options = self.options.with_normalize_unicode(false);
        self
    }

    /// Set the context kept around each citation.
    pub fn with_context_chars(mut self, chars: usize) -> Self {
        self.options = self.options.with_context_chars(chars);
        self
    }

    /// Replace all analysis options.
    pub fn with_options(mut self, options: AnalyzeOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a named page size.
    pub fn with_page(mut self, size: PageSize) -> Self {
        self.geometry = self.geometry.on_page(size);
        self
    }

    /// Set the font size in points.
    pub fn with_font_size(mut self, font_size: f64) -> Result<Self> {
        self.geometry.set_font_size(font_size)?;
        Ok(self)
    }

    /// Replace the layout geometry.
    pub fn with_geometry(mut self, geometry: LayoutGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Analyze text.
    pub fn analyze(self, text: &str) -> CiteformResult {
        CiteformResult {
            analysis: analyze(text, &self.options),
            geometry: self.geometry,
        }
    }

    /// Analyze a UTF-8 text file.
    pub fn analyze_file<P: AsRef<Path>>(self, path: P) -> Result<CiteformResult> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.analyze(&text))
    }
}

/// Result of analyzing a manuscript with [`Citeform`].
#[derive(Debug, Clone)]
pub struct CiteformResult {
    /// The analysis
    pub analysis: DocumentAnalysis,
    /// Geometry used for layout
    geometry: LayoutGeometry,
}

impl CiteformResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.analysis, format)
    }

    /// Lay the analyzed text out on pages.
    pub fn paginate(&self) -> Result<PagedDocument> {
        render::paginate_text(&self.analysis.text, &self.geometry)
    }

    /// Convert citations of the dominant style into `to`.
    ///
    /// Empty when no style dominates.
    pub fn convert_citations(&self, to: Style) -> Vec<ConvertedCitation> {
        self.analysis
            .dominant_style
            .map(|from| self.analysis.convert_citations(from, to))
            .unwrap_or_default()
    }

    /// Format the reference list in `style`.
    pub fn format_bibliography(&self, style: Style) -> Vec<String> {
        self.analysis.format_bibliography(style)
    }

    /// Get the analysis.
    pub fn analysis(&self) -> &DocumentAnalysis {
        &self.analysis
    }

    /// Get the layout geometry.
    pub fn geometry(&self) -> &LayoutGeometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citeform_builder() {
        let citeform = Citeform::new()
            .sequential()
            .with_context_chars(10)
            .with_page(PageSize::Legal);

        assert!(!citeform.options.parallel);
        assert_eq!(citeform.options.context_chars, 10);
        assert!((citeform.geometry.geometry().page_height - 1008.0).abs() < 1e-9);
    }

    #[test]
    fn test_builder_rejects_bad_font() {
        assert!(matches!(
            Citeform::new().with_font_size(-2.0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_page_preset_keeps_font() {
        let citeform = Citeform::new()
            .with_font_size(10.0)
            .unwrap()
            .with_page(PageSize::A4);
        assert!((citeform.geometry.font_size() - 10.0).abs() < 1e-9);
        assert_eq!(citeform.geometry.metrics().chars_per_line, 75);
    }

    #[test]
    fn test_dominant_style() {
        assert_eq!(dominant_style("As argued (Smith, 2020)."), Some(Style::Apa));
        assert_eq!(dominant_style("No citations here."), None);
    }

    #[test]
    fn test_result_without_dominant_style() {
        let result = Citeform::new().analyze("Plain prose only.");
        assert!(result.convert_citations(Style::Mla).is_empty());
        assert!(result.format_bibliography(Style::Mla).is_empty());
    }

    #[test]
    fn test_result_paginate() {
        let result = Citeform::new().analyze("Title\n\nSome body text (Smith 45).");
        let paged = result.paginate().unwrap();
        assert_eq!(paged.page_count(), 1);
        assert_eq!(paged.pages[0].lines[0], "Title");
    }

    #[test]
    fn test_analyze_file_missing() {
        let result = analyze_file("/nonexistent/manuscript.txt", &AnalyzeOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_analyze_reader() {
        let analysis =
            analyze_reader("See Smith (2020).".as_bytes(), &AnalyzeOptions::default()).unwrap();
        assert_eq!(analysis.citations.total(), 2);
    }
}
