//! Bibliography entry types.

use serde::{Deserialize, Serialize};

/// A single reference-list entry.
///
/// Every field except `raw` is optional; entries parsed from free text are
/// often partial. Fallback literals are applied only when formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibliographyEntry {
    /// Author name(s)
    pub author: Option<String>,
    /// Work title
    pub title: Option<String>,
    /// Publication year
    pub year: Option<String>,
    /// Journal name (journal articles)
    pub journal: Option<String>,
    /// Journal volume
    pub volume: Option<String>,
    /// Journal issue
    pub issue: Option<String>,
    /// Page range
    pub pages: Option<String>,
    /// Publisher or site name
    pub publisher: Option<String>,
    /// Place of publication
    pub location: Option<String>,
    /// Web address
    pub url: Option<String>,
    /// The untouched source text of the entry
    pub raw: String,
}

impl BibliographyEntry {
    /// Create an entry holding only its raw text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Default::default()
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the year.
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Set journal, volume, issue and pages in one go.
    pub fn with_journal(
        mut self,
        journal: impl Into<String>,
        volume: impl Into<String>,
        issue: impl Into<String>,
        pages: impl Into<String>,
    ) -> Self {
        self.journal = Some(journal.into());
        self.volume = Some(volume.into());
        self.issue = Some(issue.into());
        self.pages = Some(pages.into());
        self
    }

    /// Set the publisher.
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    /// Set the place of publication.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Infer the kind of work from which fields are present.
    pub fn kind(&self) -> EntryKind {
        if is_present(&self.journal) {
            EntryKind::Journal
        } else if is_present(&self.url) {
            EntryKind::Web
        } else {
            EntryKind::Book
        }
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Kind of cited work, which selects the formatting template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Journal article
    Journal,
    /// Web page
    Web,
    /// Book (the default)
    Book,
}
