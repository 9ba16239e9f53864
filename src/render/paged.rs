//! Paginated plain-text rendering.

use serde::{Deserialize, Serialize};

use crate::analysis::{HeuristicAnalyzer, StructureAnalyzer};
use crate::error::Result;
use crate::layout::{
    break_paragraphs, optimize_headings, paginate, ContentMetrics, HeadingPlacement,
    LayoutGeometry,
};

/// Page separator used by [`to_paged_text`].
pub const FORM_FEED: char = '\u{c}';

/// One page of wrapped lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number
    pub number: usize,
    /// Lines on this page
    pub lines: Vec<String>,
}

/// Text laid out on pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedDocument {
    /// Pages in order
    pub pages: Vec<PageText>,
    /// Section headings after orphan avoidance
    pub headings: Vec<HeadingPlacement>,
    /// Metrics the text was laid out with
    pub metrics: ContentMetrics,
}

impl PagedDocument {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total wrapped lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}

/// Wrap `text` paragraph by paragraph and split the lines into pages.
pub fn paginate_text(text: &str, geometry: &LayoutGeometry) -> Result<PagedDocument> {
    let metrics = geometry.metrics();
    let width = geometry.wrap_width()?;
    let lines_per_page = metrics.lines_per_page;

    let (lines, _) = break_paragraphs(text, width);
    let page_count = paginate(lines.len(), lines_per_page)?;

    let sections = HeuristicAnalyzer.identify_sections(text);
    let heading_lines = crate::analysis::heading_lines(text, &sections, geometry)?;
    let headings = optimize_headings(&heading_lines, lines.len(), lines_per_page)?;

    let pages: Vec<PageText> = lines
        .chunks(lines_per_page)
        .enumerate()
        .map(|(i, chunk)| PageText {
            number: i + 1,
            lines: chunk.to_vec(),
        })
        .collect();
    debug_assert_eq!(pages.len(), page_count);

    log::debug!(
        "paginate_text: {} lines on {} pages ({} chars/line, {} lines/page)",
        lines.len(),
        page_count,
        width,
        lines_per_page
    );

    Ok(PagedDocument {
        pages,
        headings,
        metrics,
    })
}

/// Join pages with a form feed between them.
pub fn to_paged_text(document: &PagedDocument) -> String {
    let separator = format!("\n{FORM_FEED}");
    document
        .pages
        .iter()
        .map(|page| page.lines.join("\n"))
        .collect::<Vec<_>>()
        .join(&separator)
}
