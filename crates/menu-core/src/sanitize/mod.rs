//! Field-level sanitizers
//!
//! Every function here is idempotent: feeding its output back in returns the
//! same string. The validator relies on that to make whole-item sanitization
//! idempotent.

mod escape;
mod keys;
mod markup;
mod url;

use regex::Regex;

use crate::error::DomainError;

pub use escape::{escape_html, sanitize_html_class};
pub use keys::{sanitize_key, sanitize_slug};
pub use url::{sanitize_url, ALLOWED_URL_SCHEMES};

/// Holds the compiled patterns used by the text and markup filters.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    any_tag: Regex,
    markup_tag: Regex,
    attribute: Regex,
    script_block: Regex,
    style_block: Regex,
    comment: Regex,
}

impl Sanitizer {
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self {
            any_tag: compile(r"<[^>]*>")?,
            markup_tag: compile(r"<(/?)([A-Za-z][A-Za-z0-9]*)([^>]*)>")?,
            attribute: compile(
                r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#,
            )?,
            script_block: compile(r"(?is)<script\b.*?</script\s*>")?,
            style_block: compile(r"(?is)<style\b.*?</style\s*>")?,
            comment: compile(r"(?s)<!--.*?-->")?,
        })
    }

    /// Plain single-line text: tags stripped, control characters and
    /// whitespace runs collapsed to one space, ends trimmed.
    pub fn text(&self, raw: &str) -> String {
        let stripped = self.any_tag.replace_all(raw, "");
        let mut out = String::with_capacity(stripped.len());
        let mut pending_space = false;

        for ch in stripped.chars() {
            if ch.is_whitespace() || ch.is_control() {
                pending_space = !out.is_empty();
                continue;
            }
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }

        out
    }
}

fn compile(pattern: &str) -> Result<Regex, DomainError> {
    Regex::new(pattern)
        .map_err(|e| DomainError::InternalError(format!("Invalid sanitizer pattern: {}", e)))
}
