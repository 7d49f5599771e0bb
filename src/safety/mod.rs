//! Safety Transformer (spec §4.3): idempotently injects a CSP meta tag and
//! the runtime-bridge script into generated HTML before it's ever shown to
//! the Security Scanner or the smoke harness. Both injections are keyed by
//! a stable marker id comment, so re-running the transform on already
//! transformed output is a no-op rather than double-injecting.

pub mod bridge;
pub mod csp;

const CSP_MARKER: &str = "<!-- dsstar:csp -->";
const BRIDGE_MARKER: &str = "<!-- dsstar:bridge -->";

/// Apply both injections to `html`, returning the transformed document.
/// Safe to call more than once on the same document.
pub fn apply(html: &str) -> String {
    let with_csp = inject_csp(html);
    inject_bridge(&with_csp)
}

fn inject_csp(html: &str) -> String {
    if html.contains(CSP_MARKER) {
        return html.to_string();
    }
    let tag = format!("{CSP_MARKER}\n{}", csp::meta_tag());
    insert_after_head_open(html, &tag)
}

fn inject_bridge(html: &str) -> String {
    if html.contains(BRIDGE_MARKER) {
        return html.to_string();
    }
    let script = format!("{BRIDGE_MARKER}\n{}", bridge::script_tag());
    insert_before_body_close(html, &script)
}

fn insert_after_head_open(html: &str, fragment: &str) -> String {
    if let Some(pos) = find_tag_end(html, "<head") {
        let mut out = String::with_capacity(html.len() + fragment.len());
        out.push_str(&html[..pos]);
        out.push('\n');
        out.push_str(fragment);
        out.push_str(&html[pos..]);
        return out;
    }
    // No <head> at all: fall back to right after <html ...>.
    if let Some(pos) = find_tag_end(html, "<html") {
        let mut out = String::with_capacity(html.len() + fragment.len());
        out.push_str(&html[..pos]);
        out.push('\n');
        out.push_str(fragment);
        out.push_str(&html[pos..]);
        return out;
    }
    format!("{fragment}\n{html}")
}

fn insert_before_body_close(html: &str, fragment: &str) -> String {
    let lower = html.to_ascii_lowercase();
    if let Some(pos) = lower.rfind("</body>") {
        let mut out = String::with_capacity(html.len() + fragment.len());
        out.push_str(&html[..pos]);
        out.push_str(fragment);
        out.push('\n');
        out.push_str(&html[pos..]);
        return out;
    }
    if let Some(pos) = lower.rfind("</html>") {
        let mut out = String::with_capacity(html.len() + fragment.len());
        out.push_str(&html[..pos]);
        out.push_str(fragment);
        out.push('\n');
        out.push_str(&html[pos..]);
        return out;
    }
    format!("{html}\n{fragment}")
}

/// Byte offset of the first `>` after the given lowercase tag name, i.e.
/// the position right after the opening tag closes.
fn find_tag_end(html: &str, tag_lower: &str) -> Option<usize> {
    let lower = html.to_ascii_lowercase();
    let start = lower.find(tag_lower)?;
    let close = lower[start..].find('>')? + start;
    Some(close + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> &'static str {
        "<!DOCTYPE html><html><head><title>x</title></head><body><p>hi</p></body></html>"
    }

    #[test]
    fn injects_csp_and_bridge_once() {
        let transformed = apply(doc());
        assert_eq!(transformed.matches(CSP_MARKER).count(), 1);
        assert_eq!(transformed.matches(BRIDGE_MARKER).count(), 1);
    }

    #[test]
    fn is_idempotent() {
        let once = apply(doc());
        let twice = apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn csp_lands_in_head_bridge_lands_before_body_close() {
        let transformed = apply(doc());
        let head_idx = transformed.find("<head").unwrap();
        let csp_idx = transformed.find(CSP_MARKER).unwrap();
        let body_close_idx = transformed.to_ascii_lowercase().rfind("</body>").unwrap();
        let bridge_idx = transformed.find(BRIDGE_MARKER).unwrap();
        assert!(csp_idx > head_idx);
        assert!(bridge_idx < body_close_idx);
    }

    #[test]
    fn handles_missing_head_gracefully() {
        let html = "<!DOCTYPE html><html><body>hi</body></html>";
        let transformed = apply(html);
        assert!(transformed.contains(CSP_MARKER));
        assert!(transformed.contains(BRIDGE_MARKER));
    }
}
