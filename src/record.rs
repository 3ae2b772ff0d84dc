//! Page record definitions
//!
//! A [`PageRecord`] is the structured content of one scraped page. Its serde
//! representation is the persistence and transport format:
//!
//! ```json
//! {
//!   "url": "https://example.com/",
//!   "title": "Example",
//!   "headings": [{ "level": 1, "tag": "h1", "text": "Hi", "attributes": {} }],
//!   "paragraphs": [{ "text": "Body", "attributes": { "class": "lead" } }],
//!   "tables": [{ "attributes": {}, "headers": ["A"], "rows": [["A"], ["1"]] }]
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Element attributes in source order (name → value)
pub type Attributes = IndexMap<String, String>;

/// Structured content extracted from a single page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// The URL that was requested
    #[serde(rename = "url")]
    pub source_url: String,

    /// Text of the first `<title>` element, empty if there is none
    pub title: String,

    /// Headings grouped by level (all h1, then all h2, ...), document order within a level
    pub headings: Vec<HeadingEntry>,

    /// Non-empty paragraphs in document order
    pub paragraphs: Vec<ParagraphEntry>,

    /// Tables in document order, nested tables included as their own entries
    pub tables: Vec<TableEntry>,
}

impl PageRecord {
    /// Creates an empty record for the given URL
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Default::default()
        }
    }

    /// Returns true if no headings, paragraphs, or tables were found
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty() && self.paragraphs.is_empty() && self.tables.is_empty()
    }
}

/// A heading element (`h1` through `h6`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    pub level: u8,
    pub tag: String,
    pub text: String,
    pub attributes: Attributes,
}

impl HeadingEntry {
    /// Creates a heading entry, deriving the tag name from the level
    pub fn new(level: u8, text: String, attributes: Attributes) -> Self {
        Self {
            level,
            tag: format!("h{}", level),
            text,
            attributes,
        }
    }
}

/// A paragraph element with non-empty text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphEntry {
    pub text: String,
    pub attributes: Attributes,
}

/// A table element with its header cells and rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub attributes: Attributes,

    /// Text of every `th` in the table, regardless of row
    pub headers: Vec<String>,

    /// Cell text per row; `th` cells count as row cells too
    pub rows: Vec<Vec<String>>,
}
