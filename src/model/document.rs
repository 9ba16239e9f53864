//! Document-level analysis types.

use serde::{Deserialize, Serialize};

/// Document metadata recovered from the manuscript text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document date
    pub date: Option<String>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Check if nothing was recovered.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.date.is_none()
    }
}

/// Role of a paragraph within the manuscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Section heading
    Heading,
    /// Short opening paragraph
    Abstract,
    /// Paragraph belonging to the reference list
    Bibliography,
    /// Body text
    Paragraph,
}

/// A classified paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureElement {
    /// Paragraph role
    pub kind: ElementKind,
    /// Paragraph text (trimmed)
    pub content: String,
    /// Paragraph index (0-based)
    pub position: usize,
}

/// A section heading detected in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text
    pub heading: String,
    /// Byte offset of the heading line
    pub position: usize,
    /// Heading level (1 = top level)
    pub level: u8,
}

impl Section {
    /// Create a top-level section.
    pub fn new(heading: impl Into<String>, position: usize) -> Self {
        Self {
            heading: heading.into(),
            position,
            level: 1,
        }
    }
}
