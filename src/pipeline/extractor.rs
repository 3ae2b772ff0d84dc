//! Structured content extraction
//!
//! A single depth-first walk over the document dispatches on tag name and
//! fills the [`PageRecord`]. Two behaviours are deliberate and observable:
//!
//! - **Level-major headings.** All `h1` entries come first, then all `h2`,
//!   and so on; document order only applies within a level.
//! - **Nested tables.** Every `table` element gets its own entry, and the
//!   rows and header cells of a nested table also appear in the entry of the
//!   table that contains it.

use crate::pipeline::parser::{element_attributes, element_text, DocumentTree};
use crate::record::{HeadingEntry, PageRecord, ParagraphEntry, TableEntry};
use scraper::ElementRef;

const HEADING_LEVELS: usize = 6;

/// Extracts the structured record from a parsed document
///
/// Extraction is pure and cannot fail: missing elements produce empty
/// sequences and a missing title produces an empty string. Running it twice
/// on the same tree yields identical records.
///
/// # Arguments
///
/// * `tree` - The parsed document
/// * `source_url` - The URL reported in the record
///
/// # Example
///
/// ```
/// use page_scraper::pipeline::{extract, parse_html};
///
/// let tree = parse_html(
///     "<html><head><title>T</title></head><body><h1>Hi</h1></body></html>",
///     "https://example.com/",
/// );
/// let record = extract(&tree, "https://example.com/");
/// assert_eq!(record.title, "T");
/// assert_eq!(record.headings[0].tag, "h1");
/// ```
pub fn extract(tree: &DocumentTree, source_url: &str) -> PageRecord {
    let mut title = None;
    let mut headings_by_level: [Vec<HeadingEntry>; HEADING_LEVELS] = Default::default();
    let mut paragraphs = Vec::new();
    let mut tables = Vec::new();

    for element in tree.elements() {
        match element.value().name() {
            "title" if title.is_none() => title = Some(element_text(element)),
            "p" => paragraphs.extend(paragraph_entry(element)),
            "table" => tables.push(table_entry(element)),
            name => {
                if let Some(level) = heading_level(name) {
                    headings_by_level[usize::from(level) - 1].push(HeadingEntry::new(
                        level,
                        element_text(element),
                        element_attributes(element),
                    ));
                }
            }
        }
    }

    let record = PageRecord {
        source_url: source_url.to_string(),
        title: title.unwrap_or_default(),
        headings: headings_by_level.into_iter().flatten().collect(),
        paragraphs,
        tables,
    };

    tracing::debug!(
        "Extracted {} headings, {} paragraphs, {} tables from {}",
        record.headings.len(),
        record.paragraphs.len(),
        record.tables.len(),
        source_url
    );

    record
}

/// Maps `h1`..`h6` to their level
fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

/// Builds a paragraph entry, or `None` when the paragraph has no text
fn paragraph_entry(element: ElementRef<'_>) -> Option<ParagraphEntry> {
    let text = element_text(element);
    if text.is_empty() {
        return None;
    }

    Some(ParagraphEntry {
        text,
        attributes: element_attributes(element),
    })
}

/// Builds a table entry from every `th` and `tr` beneath the table
fn table_entry(table: ElementRef<'_>) -> TableEntry {
    let mut entry = TableEntry {
        attributes: element_attributes(table),
        ..Default::default()
    };

    for element in table.descendants().filter_map(ElementRef::wrap) {
        match element.value().name() {
            "th" => entry.headers.push(element_text(element)),
            "tr" => {
                let cells = row_cells(element);
                if !cells.is_empty() {
                    entry.rows.push(cells);
                }
            }
            _ => {}
        }
    }

    entry
}

/// Text of every `td` and `th` beneath a row
fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(element_text)
        .collect()
}
