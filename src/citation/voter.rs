//! Dominant-style voting.

use crate::diagnostics::Diagnostics;
use crate::model::{Style, StyleCounts};

/// Pick the style with the most matches.
///
/// Ties go to the style that comes first in [`Style::ALL`] (MLA, then APA,
/// then Chicago). Returns `None` when nothing matched at all.
pub fn vote(counts: &StyleCounts) -> Option<Style> {
    let mut best: Option<(Style, usize)> = None;
    for (style, count) in counts.iter() {
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((style, count));
        }
    }
    best.filter(|(_, max)| *max > 0).map(|(style, _)| style)
}

/// Styles sharing the maximum count, in priority order.
///
/// Empty when every count is zero.
pub fn tied_styles(counts: &StyleCounts) -> Vec<Style> {
    let max = counts.iter().map(|(_, c)| c).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .filter(|(_, c)| *c == max)
        .map(|(s, _)| s)
        .collect()
}

/// Vote and record how the decision was reached.
pub fn vote_with_diagnostics(counts: &StyleCounts, diagnostics: &mut Diagnostics) -> Option<Style> {
    let dominant = vote(counts);
    match dominant {
        None => diagnostics.warn("no citations detected; citation style unknown"),
        Some(style) => {
            let tied = tied_styles(counts);
            if tied.len() > 1 {
                let names: Vec<&str> = tied.iter().map(Style::display_name).collect();
                diagnostics.info(format!(
                    "citation styles tied at {} matches ({}); chose {} by priority",
                    counts.get(style),
                    names.join(", "),
                    style
                ));
            } else {
                diagnostics.info(format!(
                    "dominant citation style is {} ({} of {} matches)",
                    style,
                    counts.get(style),
                    counts.total()
                ));
            }
        }
    }
    dominant
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(mla: usize, apa: usize, chicago: usize) -> StyleCounts {
        StyleCounts { mla, apa, chicago }
    }

    #[test]
    fn test_vote_picks_maximum() {
        assert_eq!(vote(&counts(1, 5, 2)), Some(Style::Apa));
        assert_eq!(vote(&counts(0, 0, 3)), Some(Style::Chicago));
    }

    #[test]
    fn test_vote_tie_break_priority() {
        assert_eq!(vote(&counts(2, 2, 0)), Some(Style::Mla));
        assert_eq!(vote(&counts(0, 4, 4)), Some(Style::Apa));
        assert_eq!(vote(&counts(3, 3, 3)), Some(Style::Mla));
    }

    #[test]
    fn test_vote_all_zero_is_unknown() {
        assert_eq!(vote(&counts(0, 0, 0)), None);
        assert!(tied_styles(&counts(0, 0, 0)).is_empty());
    }

    #[test]
    fn test_tied_styles() {
        assert_eq!(tied_styles(&counts(2, 2, 0)), vec![Style::Mla, Style::Apa]);
        assert_eq!(tied_styles(&counts(1, 2, 0)), vec![Style::Apa]);
    }

    #[test]
    fn test_vote_with_diagnostics() {
        let mut diags = Diagnostics::new();
        assert_eq!(vote_with_diagnostics(&counts(2, 2, 0), &mut diags), Some(Style::Mla));
        assert!(diags.find("tied").is_some());

        let mut diags = Diagnostics::new();
        assert_eq!(vote_with_diagnostics(&counts(0, 0, 0), &mut diags), None);
        assert!(diags.has_warnings());
    }
}
