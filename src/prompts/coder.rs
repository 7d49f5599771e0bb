//! Coder prompt (spec §4.4): turns an approved `Plan` into the single-file
//! HTML generation ask. On a retry after a security-scan failure, embeds
//! both the failure memory and the scanner's per-rule fix hints so the
//! retry prompt names the exact change needed rather than restating the
//! rule.

use crate::failure_memory::FailureMemory;
use crate::plan::Plan;
use crate::scanner::ScanResult;

use super::render_failure_memory;

pub fn build(plan: &Plan, memory: &FailureMemory, last_scan: Option<&ScanResult>) -> String {
    let plan_json = serde_json::to_string_pretty(plan).unwrap_or_default();
    let mut out = format!(
        "Build the single-page app described by this plan as one self-contained HTML file \
         with inline <style> and <script>, no external resources, and no network calls:\n\n\
         {plan_json}\n\n\
         Every name listed in `ui_components` must appear as a selectable element (an id, a \
         stable class, or a data-testid attribute) somewhere in the markup.\n\n\
         Respond with the HTML document only."
    );

    let memory_section = render_failure_memory(memory);
    if !memory_section.is_empty() {
        out.push_str("\n\n");
        out.push_str(&memory_section);
    }

    if let Some(scan) = last_scan {
        if scan.has_findings() {
            out.push_str("\n\nFix these specific issues from the last attempt:");
            for finding in &scan.findings {
                out.push_str("\n- ");
                out.push_str(&finding.message);
                if let Some(hint) = crate::scanner::fix_hint(&finding.rule) {
                    out.push_str(" (");
                    out.push_str(hint);
                    out.push(')');
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PageDescriptor;
    use crate::scanner;

    fn plan() -> Plan {
        Plan {
            title: "Notes".to_string(),
            pages: vec![PageDescriptor { name: "Home".to_string(), description: None }],
            ui_components: vec!["note-list".to_string()],
            description: None,
            state: None,
            interactions: Vec::new(),
            acceptance_criteria: Vec::new(),
            libraries: Vec::new(),
            data_bindings: Vec::new(),
            recommended_models: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn embeds_fix_hints_for_scan_findings() {
        let scan = scanner::scan("<html><body><script>eval(x)</script></body></html>");
        let prompt = build(&plan(), &FailureMemory::new(), Some(&scan));
        assert!(prompt.contains("eval"));
        assert!(prompt.contains("Replace `eval`"));
    }

    #[test]
    fn omits_fix_section_when_scan_is_clean() {
        let scan = scanner::ScanResult::clean();
        let prompt = build(&plan(), &FailureMemory::new(), Some(&scan));
        assert!(!prompt.contains("Fix these specific issues"));
    }
}
