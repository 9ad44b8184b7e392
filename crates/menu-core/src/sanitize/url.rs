//! URL sanitization

use url::Url;

/// Schemes a link may use. Anything else (`javascript:`, `data:`, ...) is
/// dropped.
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel", "ftp", "ftps", "sms"];

/// Returns a safe absolute URL, a site-relative reference, or an empty string.
///
/// Whitespace, control characters, quotes, backticks, backslashes and angle
/// brackets are removed first. References starting with `/`, `#` or `?` are
/// kept as relative. A reference without a scheme is treated as a host name
/// and gets `http://` prepended.
pub fn sanitize_url(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| {
            !c.is_whitespace()
                && !c.is_control()
                && !matches!(c, '<' | '>' | '"' | '\'' | '`' | '\\')
        })
        .collect();

    if cleaned.is_empty() {
        return String::new();
    }

    if cleaned.starts_with('/') || cleaned.starts_with('#') || cleaned.starts_with('?') {
        return cleaned;
    }

    let candidate = if scheme_of(&cleaned).is_some() {
        cleaned
    } else {
        format!("http://{}", cleaned)
    };

    match Url::parse(&candidate) {
        Ok(url) if ALLOWED_URL_SCHEMES.contains(&url.scheme()) => url.to_string(),
        _ => String::new(),
    }
}

/// Scheme prefix if the reference starts with `scheme:`. Dots are not
/// accepted so `example.com:8080` reads as a host, and an unknown scheme
/// followed by a port number (`localhost:3000`) reads as `host:port`.
fn scheme_of(s: &str) -> Option<&str> {
    let (scheme, rest) = s.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() || !chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-') {
        return None;
    }
    let port = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let looks_like_port = !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit());
    if looks_like_port && !ALLOWED_URL_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
        return None;
    }
    Some(scheme)
}
