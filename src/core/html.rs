// src/core/html.rs
// Tag-aware string helpers for inner-HTML fragments. Tolerant of case and of
// `<br>` / `<br/>` / `<br />` spellings; no DOM needed.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Byte range `(start, end)` of the next tag named `name` at or after `from`.
/// `end` is one past the closing `>`.
///
/// `lc` must already be lowercased with [`to_lower`]; it only folds ASCII, so
/// the returned offsets are valid in the original text too.
pub fn next_tag_ci(lc: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let open = format!("<{}", to_lower(name));
    let mut pos = from;
    loop {
        let start = lc.get(pos..)?.find(&open)? + pos;
        let after_name = start + open.len();
        // `<br` must not match `<brand>`
        let boundary = lc[after_name..].chars().next();
        if matches!(boundary, Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace()) {
            let end = lc[after_name..].find('>')? + after_name + 1;
            return Some((start, end));
        }
        pos = after_name;
    }
}

/// Split on line-break tags. Trailing blank pieces are dropped.
pub fn split_on_breaks(s: &str) -> Vec<&str> {
    let lc = to_lower(s);
    let mut pieces = Vec::new();
    let mut pos = 0usize;
    while let Some((start, end)) = next_tag_ci(&lc, "br", pos) {
        pieces.push(&s[pos..start]);
        pos = end;
    }
    pieces.push(&s[pos..]);

    while pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }
    pieces
}

/// Drop every `<...>` tag; text between tags is kept verbatim.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}
