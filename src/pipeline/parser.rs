//! HTML parsing and tree navigation
//!
//! This module turns fetched bytes into a navigable document tree and
//! provides the text and attribute helpers the extractor works with:
//! - Rejecting payloads that are not markup at all
//! - Decoding the body in its declared character encoding
//! - Error-tolerant parsing of whatever markup remains
//! - Visible-text extraction (skipping `script`/`style`/`noscript` content)
//! - Whitespace normalization

use crate::pipeline::fetcher::RawDocument;
use crate::record::Attributes;
use crate::ParseError;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use scraper::{ElementRef, Html, Node};

/// Number of leading bytes inspected for binary content
const SNIFF_LEN: usize = 1024;

/// Elements whose text content is code or raw markup, not prose
///
/// With scripting enabled, html5ever keeps `noscript` content as raw text.
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// A parsed HTML document together with the URL it was fetched from
#[derive(Debug)]
pub struct DocumentTree {
    url: String,
    html: Html,
}

impl DocumentTree {
    /// URL of the document (the final URL after redirects when fetched)
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The underlying parsed document
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Iterates over every element in depth-first, left-to-right order
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.html.tree.root().descendants().filter_map(ElementRef::wrap)
    }
}

/// Parses a fetched payload into a document tree
///
/// Malformed markup never fails: the html5ever tree builder recovers from
/// missing end tags, unknown elements, and broken attributes the way a
/// browser does. Only payloads that are not text at all are rejected.
///
/// # Arguments
///
/// * `raw` - The fetched document
///
/// # Returns
///
/// * `Ok(DocumentTree)` - The parsed document
/// * `Err(ParseError)` - The payload is binary or declared as a non-markup type
pub fn parse(raw: &RawDocument) -> Result<DocumentTree, ParseError> {
    if let Some(content_type) = raw.content_type.as_deref() {
        if !is_markup_content_type(content_type) {
            return Err(ParseError::UnsupportedContentType {
                url: raw.final_url.clone(),
                content_type: content_type.to_string(),
            });
        }
    }

    let encoding = resolve_encoding(raw);

    // UTF-16 markup is full of NUL bytes
    if encoding != UTF_16LE
        && encoding != UTF_16BE
        && raw.body.iter().take(SNIFF_LEN).any(|&b| b == 0)
    {
        return Err(ParseError::Binary {
            url: raw.final_url.clone(),
        });
    }

    // Malformed sequences become U+FFFD, as a browser would render them
    let (text, _, had_errors) = encoding.decode(&raw.body);
    if had_errors {
        tracing::debug!(
            "Malformed {} sequences in {}",
            encoding.name(),
            raw.final_url
        );
    }

    Ok(parse_html(&text, &raw.final_url))
}

/// Picks the character encoding of a fetched body
///
/// Precedence: byte order mark, `charset` parameter of the Content-Type
/// header, `<meta charset>` / `<meta http-equiv>` in the leading bytes,
/// then UTF-8. Unknown labels are skipped.
pub fn resolve_encoding(raw: &RawDocument) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(&raw.body) {
        return encoding;
    }

    raw.content_type
        .as_deref()
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| meta_charset(&raw.body))
        .unwrap_or(UTF_8)
}

/// Extracts the `charset` parameter from a Content-Type value
fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string())
        } else {
            None
        }
    })
}

/// Looks for a `charset=` declaration in the leading bytes of the body
fn meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(|c: char| c == '"' || c == '\'')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();

    let encoding = Encoding::for_label(label.as_bytes())?;
    // A document that declares UTF-16 in ASCII-compatible bytes is not UTF-16
    if encoding == UTF_16LE || encoding == UTF_16BE {
        Some(UTF_8)
    } else {
        Some(encoding)
    }
}

/// Parses markup that is already in memory
///
/// # Example
///
/// ```
/// use page_scraper::pipeline::parse_html;
///
/// let tree = parse_html("<title>Test</title><p>Hello", "https://example.com/");
/// assert_eq!(tree.elements().filter(|e| e.value().name() == "p").count(), 1);
/// ```
pub fn parse_html(html: &str, url: &str) -> DocumentTree {
    DocumentTree {
        url: url.to_string(),
        html: Html::parse_document(html),
    }
}

/// Returns true for content types the parser accepts
///
/// Any `text/*` type and XML flavours (XHTML included) are accepted;
/// parameters such as `charset` are ignored.
fn is_markup_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    mime.is_empty()
        || mime.starts_with("text/")
        || mime == "application/xml"
        || mime.ends_with("+xml")
}

/// Collects the visible text of an element, normalized
///
/// Text nodes are concatenated in document order, skipping anything nested
/// inside `script`, `style`, or `noscript`, then passed through
/// [`normalize_whitespace`].
pub fn element_text(element: ElementRef<'_>) -> String {
    let root = element.id();
    let mut raw = String::new();

    for node in element.descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node
                .ancestors()
                .take_while(|ancestor| ancestor.id() != root)
                .any(|ancestor| is_hidden_text_element(ancestor.value()));
            if !hidden {
                raw.push_str(text);
            }
        }
    }

    normalize_whitespace(&raw)
}

fn is_hidden_text_element(node: &Node) -> bool {
    match node {
        Node::Element(element) => HIDDEN_TEXT_ELEMENTS.contains(&element.name()),
        _ => false,
    }
}

/// Copies an element's attributes in source order
pub fn element_attributes(element: ElementRef<'_>) -> Attributes {
    element
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// Trims text and collapses every internal whitespace run to one space
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
