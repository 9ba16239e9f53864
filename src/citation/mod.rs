//! Citation detection, style voting and cross-style conversion.

mod catalog;
pub mod convert;
mod detector;
mod segment;
mod voter;

pub use catalog::{CitationPattern, PatternCatalog};
pub use convert::{
    convert, convert_str, extract, render, CitationParts, Conversion, NO_DATE, UNSUPPORTED_FOOTNOTE,
};
pub use detector::{CitationDetector, Detection};
pub use segment::{RuleSegmenter, Sentence, SentenceSegmenter};
pub use voter::{tied_styles, vote, vote_with_diagnostics};
