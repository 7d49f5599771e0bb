//! Response Normalizer (spec §4.2): model responses arrive as whatever
//! prose/fencing the model felt like wrapping its answer in. These
//! functions pull out the HTML document or JSON object a caller actually
//! asked for, trying progressively looser extraction strategies.

/// Extract an HTML document from a raw model response, trying in order:
/// 1. the whole response, if it already starts with `<!DOCTYPE` or `<html`
/// 2. the contents of a fenced ```html ... ``` block
/// 3. the contents of any fenced ``` ... ``` block that looks like HTML
/// 4. the substring from the first `<html` to the last `</html>`
pub fn extract_html(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("<!doctype") || lower.starts_with("<html") {
        return Some(trimmed.to_string());
    }

    if let Some(block) = fenced_block(raw, Some("html")) {
        return Some(block);
    }

    if let Some(block) = fenced_block(raw, None) {
        let block_lower = block.to_ascii_lowercase();
        if block_lower.contains("<html") {
            return Some(block);
        }
    }

    let lower_full = raw.to_ascii_lowercase();
    if let (Some(start), Some(end)) = (lower_full.find("<html"), lower_full.rfind("</html>")) {
        if end > start {
            return Some(raw[start..end + "</html>".len()].to_string());
        }
    }

    None
}

/// Extract a JSON value from a raw model response, trying in order: the
/// whole trimmed response parsed directly, a fenced ```json block, the
/// first `{` to last `}` substring, and finally a lightweight repair pass
/// (strip trailing commas and trailing prose after the last closing
/// brace) before giving up.
pub fn extract_json(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return Some(trimmed.to_string());
    }

    if let Some(block) = fenced_block(raw, Some("json")) {
        if serde_json::from_str::<serde_json::Value>(&block).is_ok() {
            return Some(block);
        }
    }

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if end > start {
            let candidate = &raw[start..=end];
            if serde_json::from_str::<serde_json::Value>(candidate).is_ok() {
                return Some(candidate.to_string());
            }
            let repaired = repair_json(candidate);
            if serde_json::from_str::<serde_json::Value>(&repaired).is_ok() {
                return Some(repaired);
            }
        }
    }

    None
}

/// Drop trailing commas before `}`/`]`, the most common reason an
/// otherwise-valid-looking JSON blob fails to parse.
fn repair_json(candidate: &str) -> String {
    let mut out = String::with_capacity(candidate.len());
    let chars: Vec<char> = candidate.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == ',' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && (chars[j] == '}' || chars[j] == ']') {
                i += 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Pull the body out of the first matching fenced code block. If `lang`
/// is `Some`, only a block tagged with that language matches; if `None`,
/// any fenced block matches.
fn fenced_block(raw: &str, lang: Option<&str>) -> Option<String> {
    let fence = "```";
    let start_fence = raw.find(fence)?;
    let after_fence = start_fence + fence.len();
    let line_end = raw[after_fence..].find('\n').map(|p| after_fence + p)?;
    let tag = raw[after_fence..line_end].trim();

    if let Some(expected) = lang {
        if !tag.eq_ignore_ascii_case(expected) {
            return None;
        }
    }

    let body_start = line_end + 1;
    let end_fence = raw[body_start..].find(fence).map(|p| body_start + p)?;
    Some(raw[body_start..end_fence].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_html_document() {
        let raw = "<!DOCTYPE html><html><body>hi</body></html>";
        assert_eq!(extract_html(raw).unwrap(), raw);
    }

    #[test]
    fn extracts_html_from_fenced_block() {
        let raw = "Here's the app:\n```html\n<!DOCTYPE html><html><body>hi</body></html>\n```\nLet me know!";
        let extracted = extract_html(raw).unwrap();
        assert!(extracted.starts_with("<!DOCTYPE"));
    }

    #[test]
    fn extracts_html_via_tag_boundaries_as_last_resort() {
        let raw = "preamble text <html><body>hi</body></html> trailing notes";
        let extracted = extract_html(raw).unwrap();
        assert!(extracted.starts_with("<html"));
    }

    #[test]
    fn extracts_plain_json() {
        let raw = r#"{"approved": true, "issues": []}"#;
        assert_eq!(extract_json(raw).unwrap(), raw);
    }

    #[test]
    fn extracts_json_from_fenced_block() {
        let raw = "```json\n{\"approved\": false}\n```";
        let extracted = extract_json(raw).unwrap();
        assert!(extracted.contains("approved"));
    }

    #[test]
    fn extracts_json_via_brace_substring_with_surrounding_prose() {
        let raw = "Sure, here is the plan: {\"title\": \"App\", \"pages\": []} Hope that helps!";
        let extracted = extract_json(raw).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&extracted).is_ok());
    }

    #[test]
    fn repairs_trailing_comma() {
        let raw = r#"{"a": 1, "b": 2,}"#;
        let extracted = extract_json(raw).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&extracted).is_ok());
    }

    #[test]
    fn returns_none_for_unrecoverable_garbage() {
        assert!(extract_json("not json at all, no braces").is_none());
        assert!(extract_html("no html tags here").is_none());
    }
}
