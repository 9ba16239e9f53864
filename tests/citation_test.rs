//! Integration tests for citation detection, voting and conversion.

use citeform::citation::{convert_str, tied_styles};
use citeform::{
    convert_citation, detect_citations, dominant_style, vote, Citation, CitationDetector,
    CitationKind, Conversion, Error, Style, StyleCounts, UNSUPPORTED_FOOTNOTE,
};

fn counts(mla: usize, apa: usize, chicago: usize) -> StyleCounts {
    StyleCounts { mla, apa, chicago }
}

#[test]
fn test_mla_parenthetical_detected() {
    let detection = detect_citations("As argued before (Smith 45).");
    let mla = detection.for_style(Style::Mla);

    let parenthetical = mla
        .iter()
        .find(|c| c.kind == CitationKind::Parenthetical)
        .expect("parenthetical MLA citation");
    assert_eq!(parenthetical.style, Style::Mla);
    assert_eq!(parenthetical.text, "(Smith 45)");
    assert_eq!(parenthetical.group(0), Some("Smith"));
    assert_eq!(parenthetical.group(1), Some("45"));
}

#[test]
fn test_counts_have_every_style() {
    let detection = detect_citations("Nothing cited here.");
    assert!(detection.is_empty());
    for style in Style::ALL {
        assert!(detection.citations.contains_key(&style));
        assert_eq!(detection.counts.get(style), 0);
    }
}

#[test]
fn test_positions_ascending() {
    let text = "First (Smith 45). Then (Jones, 2019). Later Brown (2001, 33). \
                Finally (Lee 7) and (Kim, 2020, p. 4).";
    let detection = detect_citations(text);

    for style in Style::ALL {
        let positions: Vec<usize> = detection.for_style(style).iter().map(|c| c.position).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
    for citation in detection.all() {
        assert_eq!(&text[citation.position..citation.end()], citation.text);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let text = "One (Smith 1). Two (Jones 2). Three Brown (2003). Four (Lee, 2004). \
                Five (Kim 5). Six Park (2006, 12).";
    let parallel = CitationDetector::new().with_parallel(true).detect(text);
    let sequential = CitationDetector::new().with_parallel(false).detect(text);
    assert_eq!(parallel, sequential);
}

#[test]
fn test_chicago_footnote_detected() {
    let detection = detect_citations("Notes\n\n12. Smith, The Long Title, 45");
    let footnotes: Vec<&Citation> = detection
        .for_style(Style::Chicago)
        .iter()
        .filter(|c| c.kind == CitationKind::Footnote)
        .collect();
    assert_eq!(footnotes.len(), 1);
    assert_eq!(footnotes[0].group(0), Some("12"));
    assert_eq!(footnotes[0].group(1), Some("Smith"));
    assert_eq!(footnotes[0].group(2), Some("45"));
}

#[test]
fn test_vote_tie_break() {
    assert_eq!(vote(&counts(2, 2, 0)), Some(Style::Mla));
    assert_eq!(vote(&counts(0, 3, 3)), Some(Style::Apa));
    assert_eq!(tied_styles(&counts(2, 2, 0)), vec![Style::Mla, Style::Apa]);
}

#[test]
fn test_vote_all_zero_is_unknown() {
    assert_eq!(vote(&counts(0, 0, 0)), None);
    assert_eq!(dominant_style(""), None);
}

#[test]
fn test_vote_clear_winner() {
    assert_eq!(vote(&counts(1, 0, 4)), Some(Style::Chicago));
}

#[test]
fn test_convert_mla_to_apa_without_year() {
    let citation = Citation::new(
        "(Smith 45)",
        Style::Mla,
        CitationKind::Parenthetical,
        0,
        vec![Some("Smith".to_string()), Some("45".to_string())],
    );
    let converted = convert_citation(&citation, Style::Mla, Style::Apa);
    assert_eq!(converted, Conversion::Converted {
        text: "(Smith, n.d.)".to_string()
    });
}

#[test]
fn test_convert_to_chicago_footnote_is_unsupported() {
    let citation = Citation::new(
        "(Smith, 2020)",
        Style::Apa,
        CitationKind::Parenthetical,
        0,
        vec![Some("Smith".to_string()), Some("2020".to_string())],
    );
    let converted = convert_citation(&citation, Style::Apa, Style::Chicago);
    assert!(!converted.is_supported());
    assert_eq!(converted.as_str(), UNSUPPORTED_FOOTNOTE);
}

#[test]
fn test_convert_detected_citations() {
    let detection = detect_citations("As shown by Smith (2020, p. 14).");
    let apa = detection.for_style(Style::Apa);
    assert_eq!(apa.len(), 1);

    let converted = convert_citation(&apa[0], Style::Apa, Style::Mla);
    assert_eq!(converted.as_str(), "(Smith 14)");
}

#[test]
fn test_convert_str_rejects_unknown_style() {
    let citation = Citation::new("(Smith 45)", Style::Mla, CitationKind::InText, 0, vec![]);
    assert!(matches!(
        convert_str(&citation, "mla", "harvard"),
        Err(Error::InvalidStyle(_))
    ));
}
