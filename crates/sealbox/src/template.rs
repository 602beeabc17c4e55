//! Front-matter templating: metadata extraction plus placeholder substitution.
//!
//! A template is an optional YAML metadata block, terminated by a line of
//! three or more dashes, followed by arbitrary text content:
//!
//! ```text
//! greeting:
//!   default: Hello
//!   required: true
//! ---
//! {{ greeting }}, world.
//! ```
//!
//! Rendering replaces each `{{ key }}` placeholder with the caller-supplied
//! value for that key, falling back to the metadata default. Whitespace
//! around the key is required (`{{key}}` is left alone), and keys not
//! declared in the metadata block are never substituted.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors produced by template parsing.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The metadata block is not valid YAML of the expected shape.
    #[error("invalid template metadata")]
    Metadata(#[from] serde_yaml::Error),
}

/// Declared metadata for a single placeholder key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldMeta {
    /// Value substituted when the caller supplies none.
    #[serde(default)]
    pub default: String,
    /// Whether the embedding application must supply a value. Recorded for
    /// callers; rendering itself does not enforce it.
    #[serde(default)]
    pub required: bool,
}

/// A parsed template: body content plus per-key metadata.
#[derive(Debug, Clone, Default)]
pub struct Template {
    /// Template body with the metadata block stripped.
    pub content: String,
    /// Placeholder metadata keyed by placeholder name.
    pub metadata: HashMap<String, FieldMeta>,
}

/// Parse `input` into a [`Template`].
///
/// Without a separator line the whole input is content and the metadata map
/// is empty.
///
/// # Errors
///
/// Returns [`TemplateError::Metadata`] if a front block is present but is not
/// valid YAML of the `key -> { default, required }` shape.
pub fn parse(input: &str) -> Result<Template, TemplateError> {
    let Some((front, body)) = split_front_matter(input) else {
        return Ok(Template {
            content: input.to_owned(),
            metadata: HashMap::new(),
        });
    };

    let metadata = if front.trim().is_empty() {
        HashMap::new()
    } else {
        serde_yaml::from_str(front)?
    };

    Ok(Template {
        content: body.trim().to_owned(),
        metadata,
    })
}

/// Parse `input` and substitute every declared placeholder.
///
/// For each metadata key the replacement value is the caller-supplied entry
/// in `variables` when present, the metadata default otherwise. Entries in
/// `variables` without a matching metadata key are ignored.
///
/// # Errors
///
/// Propagates [`TemplateError::Metadata`] from [`parse`].
pub fn render(
    input: &str,
    variables: &HashMap<String, String>,
) -> Result<Template, TemplateError> {
    let mut template = parse(input)?;

    for (key, meta) in &template.metadata {
        let value = variables.get(key).unwrap_or(&meta.default);
        template.content = substitute(&template.content, key, value);
    }
    debug!(keys = template.metadata.len(), "template rendered");

    Ok(template)
}

/// Split at the first line consisting of three or more dashes.
///
/// Returns `(front, body)` exclusive of the separator line, or `None` when no
/// separator exists.
fn split_front_matter(input: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in input.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.len() >= 3 && trimmed.bytes().all(|b| b == b'-') {
            return Some((&input[..offset], &input[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Replace every `{{ key }}` occurrence (whitespace required around the key)
/// with `value`.
fn substitute(content: &str, key: &str, value: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else { break };
        let inner = &after[..end];
        let delimited = inner.starts_with(|c: char| c.is_whitespace())
            && inner.ends_with(|c: char| c.is_whitespace());
        if delimited && inner.trim() == key {
            out.push_str(&rest[..start]);
            out.push_str(value);
            rest = &after[end + 2..];
        } else {
            // Not this key's placeholder; keep the braces and keep scanning.
            out.push_str(&rest[..start + 2]);
            rest = &rest[start + 2..];
        }
    }
    out.push_str(rest);
    out
}
