//! Citation detection.
//!
//! The detector deliberately over-generates: a phrase like `Smith (2020)`
//! matches both the APA and Chicago narrative patterns, and a stray number can
//! look like a Chicago note. Every match is kept and counted; the voter
//! decides which style dominates.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::catalog::{CitationPattern, PatternCatalog};
use super::segment::{RuleSegmenter, Sentence, SentenceSegmenter};
use crate::model::{Citation, Style, StyleCounts};

/// Result of scanning a text for citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Citations grouped by style, each sorted by position
    pub citations: BTreeMap<Style, Vec<Citation>>,

    /// Match counts per style
    pub counts: StyleCounts,
}

impl Detection {
    /// Create an empty detection with all three styles present.
    pub fn new() -> Self {
        Self {
            citations: Style::ALL.into_iter().map(|s| (s, Vec::new())).collect(),
            counts: StyleCounts::new(),
        }
    }

    /// Citations matched by one style.
    pub fn for_style(&self, style: Style) -> &[Citation] {
        self.citations.get(&style).map_or(&[], Vec::as_slice)
    }

    /// All citations across styles, ordered by position.
    pub fn all(&self) -> Vec<&Citation> {
        let mut all: Vec<&Citation> = self.citations.values().flatten().collect();
        all.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.style.cmp(&b.style))
                .then(a.kind.cmp(&b.kind))
        });
        all
    }

    /// Total number of matches.
    pub fn total(&self) -> usize {
        self.counts.total()
    }

    /// Check if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl Default for Detection {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans text against a pattern catalog.
#[derive(Clone)]
pub struct CitationDetector {
    catalog: &'static PatternCatalog,
    segmenter: Arc<dyn SentenceSegmenter>,
    parallel: bool,
    context_chars: usize,
}

impl CitationDetector {
    /// Create a detector with the standard catalog and rule-based segmentation.
    pub fn new() -> Self {
        Self {
            catalog: PatternCatalog::standard(),
            segmenter: Arc::new(RuleSegmenter::new()),
            parallel: true,
            context_chars: 50,
        }
    }

    /// Use a custom catalog.
    pub fn with_catalog(mut self, catalog: &'static PatternCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Use a custom sentence segmenter.
    pub fn with_segmenter(mut self, segmenter: Arc<dyn SentenceSegmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Enable or disable parallel scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set how much surrounding text to keep with each citation.
    pub fn with_context_chars(mut self, chars: usize) -> Self {
        self.context_chars = chars;
        self
    }

    /// Detect citations in `text`.
    ///
    /// Positions in the result are byte offsets into `text`.
    pub fn detect(&self, text: &str) -> Detection {
        let sentences = self.segmenter.segment(text);
        log::debug!("CitationDetector: scanning {} sentences", sentences.len());

        let found: Vec<Citation> = if self.parallel && sentences.len() > 1 {
            sentences
                .par_iter()
                .flat_map_iter(|sentence| self.scan_sentence(text, sentence))
                .collect()
        } else {
            sentences
                .iter()
                .flat_map(|sentence| self.scan_sentence(text, sentence))
                .collect()
        };

        let mut detection = Detection::new();
        for citation in found {
            detection.counts.increment(citation.style);
            detection
                .citations
                .entry(citation.style)
                .or_default()
                .push(citation);
        }

        // parallel collection order is not part of the contract; position is
        for list in detection.citations.values_mut() {
            list.sort_by(|a, b| a.position.cmp(&b.position).then(a.kind.cmp(&b.kind)));
        }

        log::debug!(
            "CitationDetector: {} matches (mla={}, apa={}, chicago={})",
            detection.total(),
            detection.counts.mla,
            detection.counts.apa,
            detection.counts.chicago
        );

        detection
    }

    fn scan_sentence(&self, text: &str, sentence: &Sentence<'_>) -> Vec<Citation> {
        self.catalog
            .patterns()
            .iter()
            .flat_map(|pattern| self.scan_pattern(text, sentence, pattern))
            .collect()
    }

    fn scan_pattern(
        &self,
        text: &str,
        sentence: &Sentence<'_>,
        pattern: &CitationPattern,
    ) -> Vec<Citation> {
        pattern
            .find_all(sentence.text)
            .into_iter()
            .map(|(start, matched, groups)| {
                let position = sentence.offset + start;
                let context = if self.context_chars > 0 {
                    context_window(text, position, position + matched.len(), self.context_chars)
                } else {
                    String::new()
                };
                Citation {
                    text: matched.to_string(),
                    style: pattern.style,
                    kind: pattern.kind,
                    sentence: sentence.text.to_string(),
                    position,
                    groups,
                    context,
                }
            })
            .collect()
    }
}

impl Default for CitationDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CitationDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CitationDetector")
            .field("patterns", &self.catalog.patterns().len())
            .field("parallel", &self.parallel)
            .field("context_chars", &self.context_chars)
            .finish()
    }
}

/// Text from `chars` characters before `start` to `chars` characters after `end`.
fn context_window(text: &str, start: usize, end: usize, chars: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(chars.saturating_sub(1))
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(i, _)| end + i);
    text[from..to].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CitationKind;

    #[test]
    fn test_detect_mla_parenthetical() {
        let detection = CitationDetector::new().detect("The claim holds (Smith 45).");
        let mla = detection.for_style(Style::Mla);

        let paren = mla
            .iter()
            .find(|c| c.kind == CitationKind::Parenthetical)
            .unwrap();
        assert_eq!(paren.text, "(Smith 45)");
        assert_eq!(paren.position, 16);
        assert_eq!(
            paren.groups,
            vec![Some("Smith".to_string()), Some("45".to_string())]
        );
        assert_eq!(paren.sentence, "The claim holds (Smith 45).");
    }

    #[test]
    fn test_positions_are_document_offsets() {
        let text = "Intro sentence here. Later on (Jones, 2001) says so.";
        let detection = CitationDetector::new().detect(text);
        let apa = detection.for_style(Style::Apa);
        assert_eq!(apa.len(), 1);
        let c = &apa[0];
        assert_eq!(&text[c.position..c.end()], "(Jones, 2001)");
    }

    #[test]
    fn test_counts_one_per_match() {
        let text = "One (Smith 4). Two (Smith 5) and (Lee 6).";
        let detection = CitationDetector::new().with_parallel(false).detect(text);
        // each MLA match is registered under both MLA kinds
        assert_eq!(detection.counts.mla, 6);
        assert_eq!(detection.for_style(Style::Mla).len(), 6);
        assert_eq!(detection.counts.apa, 0);
    }

    #[test]
    fn test_overlapping_styles_are_kept() {
        let detection = CitationDetector::new().detect("Smith (2020) argued otherwise.");
        assert_eq!(detection.counts.apa, 1);
        assert_eq!(detection.counts.chicago, 1);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let detection = CitationDetector::new().detect("Nothing to see here.");
        assert!(detection.is_empty());
        assert_eq!(detection.citations.len(), 3);
        assert!(detection.for_style(Style::Chicago).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let text = (0..200)
            .map(|i| format!("Point {} is made (Author {}). Brown ({}) agrees.", i, i + 1, 1900 + i))
            .collect::<Vec<_>>()
            .join(" ");

        let parallel = CitationDetector::new().with_parallel(true).detect(&text);
        let sequential = CitationDetector::new().with_parallel(false).detect(&text);
        assert_eq!(parallel, sequential);

        let positions: Vec<usize> = parallel
            .for_style(Style::Apa)
            .iter()
            .map(|c| c.position)
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_context_window_is_char_safe() {
        let text = "ééééé (Smith 45) ààààà";
        let start = text.find('(').unwrap();
        let end = start + "(Smith 45)".len();
        let ctx = context_window(text, start, end, 2);
        assert_eq!(ctx, "é (Smith 45) à");
    }
}
