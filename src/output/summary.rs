//! Console summaries of scraped records

use crate::record::PageRecord;
use std::fmt::Write;

/// Number of headings and paragraphs previewed in a summary
const PREVIEW_ITEMS: usize = 3;

/// Maximum characters shown per previewed paragraph
const PREVIEW_CHARS: usize = 100;

/// Formats a human-readable summary of a record
///
/// The summary lists the title, the number of each element kind, and a
/// preview of the first headings and paragraphs.
pub fn format_record_summary(record: &PageRecord) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "URL: {}", record.source_url);
    let _ = writeln!(out, "Title: {}", record.title);
    let _ = writeln!(out, "Headings found: {}", record.headings.len());
    let _ = writeln!(out, "Paragraphs found: {}", record.paragraphs.len());
    let _ = writeln!(out, "Tables found: {}", record.tables.len());

    if !record.headings.is_empty() {
        let _ = writeln!(out, "\n--- First {} headings ---", PREVIEW_ITEMS);
        for heading in record.headings.iter().take(PREVIEW_ITEMS) {
            let _ = writeln!(out, "{}: {}", heading.tag, heading.text);
        }
    }

    if !record.paragraphs.is_empty() {
        let _ = writeln!(out, "\n--- First {} paragraphs ---", PREVIEW_ITEMS);
        for (i, paragraph) in record.paragraphs.iter().take(PREVIEW_ITEMS).enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, preview(&paragraph.text));
        }
    }

    out
}

/// Prints a record summary to stdout
pub fn print_record_summary(record: &PageRecord) {
    print!("{}", format_record_summary(record));
}

/// First characters of a paragraph, always followed by an ellipsis
fn preview(text: &str) -> String {
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", cut)
}
