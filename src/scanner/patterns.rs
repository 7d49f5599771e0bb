//! Banned-pattern tables for the Security Scanner (spec §4.1, §4.1.1).
//!
//! Single source of truth: both `scanner::scan` and the Coder retry-prompt
//! builder (`crate::prompts::coder`) read these tables, so a fix hint can
//! never drift out of sync with the rule that produced the finding.

use crate::types::Severity;

/// Tags that are never allowed in generated output, regardless of context.
pub const BANNED_TAGS: &[&str] = &["iframe", "object", "embed", "applet", "frame", "frameset"];

/// Inline event-handler attributes that are never allowed, since they run
/// as a direct DOM-attribute sink independent of any `<script>` content
/// policy.
pub const BANNED_INLINE_HANDLERS: &[&str] = &[
    "onclick", "onerror", "onload", "onmouseover", "onfocus", "onblur", "onsubmit", "onchange",
];

pub struct CallPattern {
    pub needle: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    /// If true, a match is suppressed when its argument is an empty string
    /// literal — e.g. `fetch("")` is a common harmless placeholder the
    /// Planner/Coder leaves mid-iteration and shouldn't hard-fail a scan.
    pub empty_url_lenient: bool,
}

pub const BANNED_CALL_PATTERNS: &[CallPattern] = &[
    CallPattern {
        needle: "eval(",
        severity: Severity::Critical,
        message: "`eval(...)` is disallowed",
        empty_url_lenient: false,
    },
    CallPattern {
        needle: "new Function(",
        severity: Severity::Critical,
        message: "`new Function(...)` is disallowed",
        empty_url_lenient: false,
    },
    CallPattern {
        needle: "document.write(",
        severity: Severity::Critical,
        message: "`document.write(...)` is disallowed",
        empty_url_lenient: false,
    },
    CallPattern {
        needle: "fetch(",
        severity: Severity::Medium,
        message: "network call via `fetch(...)` is disallowed in offline single-file output",
        empty_url_lenient: true,
    },
    CallPattern {
        needle: "XMLHttpRequest(",
        severity: Severity::Medium,
        message: "network call via `XMLHttpRequest` is disallowed in offline single-file output",
        empty_url_lenient: false,
    },
    CallPattern {
        needle: "WebSocket(",
        severity: Severity::Medium,
        message: "`WebSocket(...)` is disallowed in offline single-file output",
        empty_url_lenient: true,
    },
];

/// Remediation hint surfaced to the Coder on retry, keyed by the rule id
/// the scanner attached to the finding.
pub fn fix_hint(rule: &str) -> Option<&'static str> {
    match rule {
        "banned-tag:iframe" | "banned-tag:object" | "banned-tag:embed" | "banned-tag:applet"
        | "banned-tag:frame" | "banned-tag:frameset" => {
            Some("Remove the embedded-document tag entirely; render the content inline instead.")
        }
        "banned-call:eval(" => Some("Replace `eval` with direct logic — parse data with `JSON.parse` if needed."),
        "banned-call:new Function(" => Some("Replace dynamically constructed functions with statically written ones."),
        "banned-call:document.write(" => Some("Use DOM APIs (`createElement`/`textContent`) instead of `document.write`."),
        "banned-call:fetch(" | "banned-call:XMLHttpRequest(" | "banned-call:WebSocket(" => {
            Some("This app must run fully offline from a single file — keep all data in-memory or in localStorage.")
        }
        rule if rule.starts_with("banned-handler:") => {
            Some("Attach the listener with `addEventListener` in a `<script>` block instead of an inline attribute.")
        }
        "structure:doctype" => Some("Add `<!DOCTYPE html>` as the first line of the document."),
        "structure:html-root" => Some("Wrap the document in a single `<html>` root element."),
        _ => None,
    }
}
