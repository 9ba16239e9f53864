//! Data model for citation analysis.
//!
//! These are plain value records: detectors and parsers produce them, and
//! converters, formatters and renderers consume them. None of them hold any
//! reference back to the text they came from.

mod bibliography;
mod citation;
mod document;

pub use bibliography::{BibliographyEntry, EntryKind};
pub use citation::{Citation, CitationKind, Style, StyleCounts};
pub use document::{ElementKind, Metadata, Section, StructureElement};
