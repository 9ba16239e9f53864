//! Reference-list parsing and formatting.

mod format;
mod parser;

pub use format::{
    format_entries, format_entry, format_entry_str, NO_DATE, UNKNOWN_AUTHOR, UNTITLED,
};
pub use parser::{
    parse_bibliography, parse_entry, split_entries, BibliographyParser, BibliographySection,
    SectionSource, SECTION_TITLES,
};
