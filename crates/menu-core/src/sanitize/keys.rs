//! Identifier and slug normalisation

/// Lowercase key restricted to `[a-z0-9_-]`. Hyphen runs collapse to one
/// hyphen, so a key never contains `--`.
pub fn sanitize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        let c = ch.to_ascii_lowercase();
        match c {
            'a'..='z' | '0'..='9' | '_' => out.push(c),
            '-' if !out.ends_with('-') => out.push(c),
            _ => {}
        }
    }
    out
}

/// URL-safe route token: lowercase `[a-z0-9-]`, separators folded into
/// single hyphens, no leading or trailing hyphen.
pub fn sanitize_slug(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        let c = ch.to_ascii_lowercase();
        match c {
            'a'..='z' | '0'..='9' => out.push(c),
            '-' | '_' | '.' => push_hyphen(&mut out),
            c if c.is_whitespace() => push_hyphen(&mut out),
            _ => {}
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn push_hyphen(out: &mut String) {
    if !out.is_empty() && !out.ends_with('-') {
        out.push('-');
    }
}
