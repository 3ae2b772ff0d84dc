//! Documentation generation helpers
//!
//! Scraped records are handed to an external generator (see
//! [`DocsGenerator`]) that answers with an OpenAPI document in YAML. This
//! module builds the prompt for such a generator and cleans its answer.

use crate::output::traits::{DocsGenerator, OutputResult};
use crate::record::PageRecord;

const PROMPT_PREAMBLE: &str = "\
You are an automatic generator of OpenAPI 3.0 (Swagger) documents. From the \
JSON below, produce only a valid YAML file: no explanations, no comments, and \
no introductory sentences. Anything other than YAML counts as an error.";

/// Builds the generation prompt embedding the record as pretty JSON
pub fn build_docs_prompt(record: &PageRecord) -> OutputResult<String> {
    let json = serde_json::to_string_pretty(record)?;
    Ok(format!("{}\n\nJSON:\n{}\n", PROMPT_PREAMBLE, json))
}

/// Removes a surrounding Markdown code fence from generated YAML
///
/// A leading ```` ```yaml ```` (or bare ```` ``` ````) line and a trailing
/// ```` ``` ```` line are dropped. Text without a fence is only trimmed.
pub fn strip_yaml_fence(text: &str) -> String {
    let text = text.trim();
    let mut lines: Vec<&str> = text.lines().collect();

    let opens_fence = lines
        .first()
        .map(|line| matches!(line.trim(), "```yaml" | "```yml" | "```"))
        .unwrap_or(false);
    if !opens_fence {
        return text.to_string();
    }
    lines.remove(0);

    if lines.last().map(|line| line.trim() == "```").unwrap_or(false) {
        lines.pop();
    }

    lines.join("\n")
}

/// Runs a generator on a record and returns its answer without code fences
pub async fn generate_docs_yaml<G>(generator: &G, record: &PageRecord) -> OutputResult<String>
where
    G: DocsGenerator + ?Sized,
{
    let raw = generator.generate_docs(record).await?;
    tracing::debug!("Generator returned {} bytes for {}", raw.len(), record.source_url);
    Ok(strip_yaml_fence(&raw))
}
