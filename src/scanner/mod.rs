//! Security Scanner (spec §4.1).
//!
//! Deterministic, regex/pattern-based scan over generated HTML — no model
//! call, no network. Grounded on wg-bastion's `prompt/scanner.rs` and
//! `input/patterns.rs`: a banned-pattern table paired with a structural
//! sanitizer that strips comments and string literals before pattern
//! matching so banned substrings inside a quoted string or a comment don't
//! false-positive.

pub mod patterns;
pub mod sanitize;

use serde::{Deserialize, Serialize};

use crate::types::Severity;

/// One scanner finding.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityFinding {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// Outcome of scanning one HTML artifact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanResult {
    pub findings: Vec<SecurityFinding>,
}

impl ScanResult {
    pub fn clean() -> Self {
        Self { findings: Vec::new() }
    }

    /// A scan is "hard failed" when any finding is `Severity::Critical`
    /// (spec §4.1: critical findings force plan invalidation, not just a
    /// code-gen retry).
    pub fn is_hard_failure(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Critical)
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn messages(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.message.clone()).collect()
    }
}

/// Run the full scan pipeline over one HTML document: strip comments and
/// string literals, then match the banned-tag, banned-handler, and
/// banned-call-pattern tables against what's left.
pub fn scan(html: &str) -> ScanResult {
    let mut findings = Vec::new();

    for tag in patterns::BANNED_TAGS {
        if sanitize::contains_tag(html, tag) {
            findings.push(SecurityFinding {
                rule: format!("banned-tag:{tag}"),
                severity: Severity::Critical,
                message: format!("disallowed tag <{tag}> present"),
                snippet: None,
            });
        }
    }

    let stripped = sanitize::strip_comments_and_strings(html);

    for pattern in patterns::BANNED_CALL_PATTERNS {
        for m in sanitize::find_all(&stripped, pattern.needle) {
            if pattern.empty_url_lenient && sanitize::is_empty_url_call(&stripped, m) {
                continue;
            }
            findings.push(SecurityFinding {
                rule: format!("banned-call:{}", pattern.needle),
                severity: pattern.severity,
                message: pattern.message.to_string(),
                snippet: Some(sanitize::context_snippet(&stripped, m, 40)),
            });
        }
    }

    for handler in patterns::BANNED_INLINE_HANDLERS {
        if sanitize::contains_attribute(html, handler) {
            findings.push(SecurityFinding {
                rule: format!("banned-handler:{handler}"),
                severity: Severity::Critical,
                message: format!("inline event handler `{handler}` is disallowed"),
                snippet: None,
            });
        }
    }

    if !sanitize::has_doctype(html) {
        findings.push(SecurityFinding {
            rule: "structure:doctype".to_string(),
            severity: Severity::Low,
            message: "missing <!DOCTYPE html> declaration".to_string(),
            snippet: None,
        });
    }

    if !sanitize::has_html_root(html) {
        findings.push(SecurityFinding {
            rule: "structure:html-root".to_string(),
            severity: Severity::Medium,
            message: "missing <html> root element".to_string(),
            snippet: None,
        });
    }

    ScanResult { findings }
}

/// A human-readable remediation hint for a given rule id, used when
/// building the Coder's retry prompt (spec §4.1.1: the fix-hint table is
/// the single source of truth, shared between the scanner and the prompt
/// builder).
pub fn fix_hint(rule: &str) -> Option<&'static str> {
    patterns::fix_hint(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_document_has_no_findings() {
        let html = "<!DOCTYPE html><html><head></head><body><p>hi</p></body></html>";
        let result = scan(html);
        assert!(result.findings.is_empty());
        assert!(!result.is_hard_failure());
    }

    #[test]
    fn script_tag_is_not_flagged_by_itself() {
        let html = r#"<!DOCTYPE html><html><body><script>console.log("hi")</script></body></html>"#;
        let result = scan(html);
        assert!(!result.is_hard_failure());
    }

    #[test]
    fn iframe_tag_is_critical() {
        let html = r#"<!DOCTYPE html><html><body><iframe src="https://evil.example"></iframe></body></html>"#;
        let result = scan(html);
        assert!(result.is_hard_failure());
        assert!(result.findings.iter().any(|f| f.rule == "banned-tag:iframe"));
    }

    #[test]
    fn inline_onclick_handler_is_flagged() {
        let html = r#"<!DOCTYPE html><html><body><button onclick="doThing()">Go</button></body></html>"#;
        let result = scan(html);
        assert!(result.findings.iter().any(|f| f.rule == "banned-handler:onclick"));
    }

    #[test]
    fn banned_call_inside_string_literal_is_ignored() {
        let html = r#"<!DOCTYPE html><html><body><script>
            const msg = "please do not call eval(x) in user code";
        </script></body></html>"#;
        let result = scan(html);
        assert!(!result.findings.iter().any(|f| f.rule.starts_with("banned-call")));
    }

    #[test]
    fn eval_call_outside_string_is_flagged() {
        let html = r#"<!DOCTYPE html><html><body><script>
            eval(userInput);
        </script></body></html>"#;
        let result = scan(html);
        assert!(result.findings.iter().any(|f| f.rule == "banned-call:eval("));
    }

    #[test]
    fn empty_url_fetch_is_lenient() {
        let html = r#"<!DOCTYPE html><html><body><script>
            fetch("").then(r => r.json());
        </script></body></html>"#;
        let result = scan(html);
        assert!(!result.findings.iter().any(|f| f.rule == "banned-call:fetch("));
    }

    #[test]
    fn missing_doctype_is_low_severity_only() {
        let html = "<html><body>hi</body></html>";
        let result = scan(html);
        assert!(!result.is_hard_failure());
        assert!(result.findings.iter().any(|f| f.rule == "structure:doctype"));
    }
}
