//! Content-Security-Policy injection (spec §4.3).
//!
//! The generated app must run fully offline from a single file, so the
//! policy is deliberately restrictive: no external origins, no inline
//! `javascript:` navigation, `unsafe-inline` only where a single-file app
//! has no alternative (inline `<style>`/`<script>` blocks; there is no
//! second file to point a `src=` at).

/// The `<meta http-equiv="Content-Security-Policy" ...>` tag injected into
/// every generated document's `<head>`.
pub fn meta_tag() -> String {
    format!(r#"<meta http-equiv="Content-Security-Policy" content="{}">"#, policy())
}

fn policy() -> String {
    [
        "default-src 'self'",
        "script-src 'self' 'unsafe-inline'",
        "style-src 'self' 'unsafe-inline'",
        "img-src 'self' data:",
        "connect-src 'none'",
        "frame-src 'none'",
        "object-src 'none'",
        "base-uri 'none'",
        "form-action 'self'",
    ]
    .join("; ")
}
