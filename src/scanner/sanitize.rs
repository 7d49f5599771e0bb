//! HTML/JS sanitization helpers backing the scanner (spec §4.1: comment and
//! string-literal stripping before pattern matching, so a banned substring
//! quoted in a string or written in a comment doesn't false-positive).

/// Strip HTML comments (`<!-- ... -->`) and JS/CSS string literals
/// (single, double, and backtick-quoted, with backslash-escape awareness)
/// from `html`, replacing stripped spans with spaces so byte offsets of the
/// surrounding code are preserved for snippet extraction.
pub fn strip_comments_and_strings(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = vec![b' '; bytes.len()];
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i..].starts_with(b"<!--") {
            let end = find_bytes(bytes, b"-->", i + 4).map(|p| p + 3).unwrap_or(bytes.len());
            i = end;
            continue;
        }
        match bytes[i] {
            b'"' | b'\'' | b'`' => {
                let quote = bytes[i];
                out[i] = b' ';
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == b'\\' && i + 1 < bytes.len() {
                        i += 2;
                        continue;
                    }
                    if bytes[i] == quote {
                        i += 1;
                        break;
                    }
                    i += 1;
                }
            }
            c => {
                out[i] = c;
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// All byte offsets where `needle` occurs in `text`, non-overlapping.
pub fn find_all(text: &str, needle: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let mut start = 0;
    while let Some(pos) = text[start..].find(needle) {
        out.push(start + pos);
        start += pos + needle.len();
    }
    out
}

/// True if `haystack` contains `<tag` (case-insensitive, tag-boundary
/// aware: the next char after the name must be whitespace, `>`, or `/`).
pub fn contains_tag(haystack: &str, tag: &str) -> bool {
    let lower = haystack.to_ascii_lowercase();
    let needle = format!("<{}", tag.to_ascii_lowercase());
    let mut start = 0;
    while let Some(pos) = lower[start..].find(&needle) {
        let abs = start + pos;
        let after = abs + needle.len();
        match lower.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return true,
            None => return true,
            _ => {}
        }
        start = abs + needle.len();
    }
    false
}

/// True if `haystack` contains `attr=` as an HTML attribute (case
/// insensitive), used for inline event-handler detection.
pub fn contains_attribute(haystack: &str, attr: &str) -> bool {
    let lower = haystack.to_ascii_lowercase();
    let needle = format!("{}=", attr.to_ascii_lowercase());
    lower
        .as_bytes()
        .windows(needle.len())
        .enumerate()
        .any(|(i, w)| {
            w == needle.as_bytes()
                && lower.as_bytes().get(i.wrapping_sub(1)).is_none_or(|b| b.is_ascii_whitespace())
        })
}

/// True when the call at byte offset `pos` in `stripped` (a
/// comment/string-stripped document) has an empty first argument, i.e.
/// `name("")`, `name('')`, or `name()` once the stripping pass has blanked
/// out the string body — detected by checking that the parenthesis
/// immediately following `pos` is closed with only whitespace in between
/// in the ORIGINAL text region corresponding to the stripped string.
pub fn is_empty_url_call(stripped: &str, pos: usize) -> bool {
    let after = &stripped[pos..];
    match after.find('(') {
        Some(paren) => {
            let rest = &after[paren + 1..];
            let arg_end = rest.find(')').unwrap_or(rest.len());
            rest[..arg_end].trim().is_empty()
        }
        None => false,
    }
}

/// `n` characters of context around `pos`, for finding snippets.
pub fn context_snippet(text: &str, pos: usize, n: usize) -> String {
    let start = pos.saturating_sub(n);
    let end = (pos + n).min(text.len());
    text.get(start..end).unwrap_or("").trim().to_string()
}

pub fn has_doctype(html: &str) -> bool {
    html.trim_start().to_ascii_lowercase().starts_with("<!doctype")
}

pub fn has_html_root(html: &str) -> bool {
    contains_tag(html, "html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_html_comment() {
        let out = strip_comments_and_strings("<p><!-- eval( --></p>");
        assert!(!out.contains("eval("));
    }

    #[test]
    fn strips_double_quoted_string() {
        let out = strip_comments_and_strings(r#"const s = "eval(bad)";"#);
        assert!(!out.contains("eval("));
    }

    #[test]
    fn respects_backslash_escape_inside_string() {
        let out = strip_comments_and_strings(r#"const s = "a\"eval(bad)\"b"; eval(real);"#);
        assert!(out.contains("eval(real)"));
        assert!(!out.contains("eval(bad)"));
    }

    #[test]
    fn contains_tag_matches_on_boundary_only() {
        assert!(contains_tag("<iframe src=x>", "iframe"));
        assert!(!contains_tag("<iframesomething>", "iframe"));
    }
}
