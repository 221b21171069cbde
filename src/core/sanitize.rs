// src/core/sanitize.rs

/// Decode the entities an HTML serializer writes back into text:
/// `&nbsp;` `&amp;` `&lt;` `&gt;` `&quot;` `&apos;` and numeric references.
/// Unknown or unterminated `&...` sequences are kept as-is. Single pass, so
/// `&amp;lt;` becomes `&lt;`, not `<`.
pub fn normalize_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        match decode_entity(rest) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// `s` starts with `&`. Returns the decoded char and the entity's byte length.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    // longest name we decode is `#x10FFFF`
    let semi = s.get(1..)?.char_indices().take(9).find(|&(_, c)| c == ';')?.0 + 1;
    let name = &s[1..semi];
    let ch = match name {
        "nbsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)?
        }
    };
    Some((ch, semi + 1))
}

/// Collapse whitespace runs (line breaks included) to one space, and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

pub fn strip_chars(s: &str, drop: &[char]) -> String {
    s.chars().filter(|c| !drop.contains(c)).collect()
}

/// Output-safe field text: entities decoded, commas removed (not escaped),
/// whitespace normalized.
pub fn clean_field(s: &str) -> String {
    normalize_ws(&strip_chars(&normalize_entities(s), &[',']))
}
