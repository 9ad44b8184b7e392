//! Safe-markup filter for endpoint page content
//!
//! Allowed elements are re-emitted in a canonical form with a filtered
//! attribute list; everything else loses its markup but keeps its text.
//! Square-bracket macro placeholders are plain text to this filter and pass
//! through untouched for the host to expand.

use std::collections::HashSet;

use regex::Captures;

use super::url::sanitize_url;
use super::Sanitizer;

const GLOBAL_ATTRIBUTES: &[&str] = &["class", "id", "title", "dir", "lang"];
const URL_ATTRIBUTES: &[&str] = &["href", "src"];
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

/// Element-specific attributes, or `None` when the element is not allowed.
fn element_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "target", "rel", "name"],
        "img" => &["src", "alt", "width", "height", "loading"],
        "ol" => &["start", "type"],
        "td" | "th" => &["colspan", "rowspan", "scope"],
        "p" | "div" | "span" | "blockquote" | "code" | "pre" | "strong" | "em" | "b" | "i"
        | "u" | "s" | "small" | "sub" | "sup" | "mark" | "abbr" | "ul" | "li" | "dl" | "dt"
        | "dd" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "br" | "hr" | "table" | "thead"
        | "tbody" | "tfoot" | "tr" | "caption" | "figure" | "figcaption" => &[],
        _ => return None,
    };
    Some(attrs)
}

impl Sanitizer {
    /// Filters rich content down to the safe element subset.
    pub fn markup(&self, raw: &str) -> String {
        let mut current = raw.to_string();
        // Removing one block can splice the remains into a new one.
        loop {
            let next = self.script_block.replace_all(&current, "");
            let next = self.style_block.replace_all(&next, "");
            let next = self.comment.replace_all(&next, "").into_owned();
            if next == current {
                break;
            }
            current = next;
        }

        let mut out = String::with_capacity(current.len());
        let mut last = 0;
        for caps in self.markup_tag.captures_iter(&current) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            push_text(&mut out, &current[last..whole.start()]);
            last = whole.end();
            if let Some(tag) = self.rebuild_tag(&caps) {
                out.push_str(&tag);
            }
        }
        push_text(&mut out, &current[last..]);

        out
    }

    fn rebuild_tag(&self, caps: &Captures<'_>) -> Option<String> {
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let name = caps.get(2)?.as_str().to_ascii_lowercase();
        let rest = caps.get(3).map_or("", |m| m.as_str());
        let allowed = element_attributes(&name)?;
        let is_void = VOID_ELEMENTS.contains(&name.as_str());

        if closing {
            return (!is_void).then(|| format!("</{}>", name));
        }

        let mut tag = format!("<{}", name);
        let mut seen = HashSet::new();
        for attr in self.attribute.captures_iter(rest) {
            let Some(attr_name) = attr.get(1).map(|m| m.as_str().to_ascii_lowercase()) else {
                continue;
            };
            let value = attr.get(2).or_else(|| attr.get(3)).or_else(|| attr.get(4));
            let Some(value) = value.map(|m| m.as_str()) else {
                continue;
            };
            if !allowed.contains(&attr_name.as_str()) && !GLOBAL_ATTRIBUTES.contains(&attr_name.as_str()) {
                continue;
            }
            if !seen.insert(attr_name.clone()) {
                continue;
            }

            let value = if URL_ATTRIBUTES.contains(&attr_name.as_str()) {
                let url = sanitize_url(value);
                if url.is_empty() {
                    continue;
                }
                url
            } else {
                value.to_string()
            };

            tag.push(' ');
            tag.push_str(&attr_name);
            tag.push_str("=\"");
            push_attribute_value(&mut tag, &value);
            tag.push('"');
        }

        tag.push_str(if is_void { " />" } else { ">" });
        Some(tag)
    }
}

/// Text between tags. A `<` here never starts a tag, so it is escaped.
fn push_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch == '<' {
            out.push_str("&lt;");
        } else {
            out.push(ch);
        }
    }
}

/// Ampersands are left alone so already-encoded entities stay stable.
fn push_attribute_value(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
