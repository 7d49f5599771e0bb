//! Prompt Builders (spec §4.4): pure functions from domain state to a
//! prompt string. None of these touch a `ModelAdapter` — they're kept
//! separate from the calls that use them so prompt construction can be
//! unit tested without a model in the loop.

pub mod code_critic;
pub mod coder;
pub mod patch;
pub mod plan_critic;
pub mod planner;

use crate::failure_memory::FailureMemory;

/// Shared failure-memory rendering used by every retry-capable prompt
/// builder: a flat bulleted list per category, omitted entirely when
/// empty so a first-iteration prompt carries no noise.
pub(crate) fn render_failure_memory(memory: &FailureMemory) -> String {
    let mut sections = Vec::new();

    if !memory.security_errors.is_empty() {
        sections.push(render_section(
            "Security issues found in previous attempts (must not recur):",
            &memory.security_errors,
        ));
    }
    if !memory.plan_critique_issues.is_empty() {
        sections.push(render_section(
            "Plan critique issues from previous attempts:",
            &memory.plan_critique_issues,
        ));
    }
    if !memory.code_critique_issues.is_empty() {
        sections.push(render_section(
            "Code critique issues from previous attempts:",
            &memory.code_critique_issues,
        ));
    }

    sections.join("\n\n")
}

fn render_section(heading: &str, items: &[String]) -> String {
    let mut out = String::from(heading);
    for item in items {
        out.push_str("\n- ");
        out.push_str(item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_memory_renders_empty_string() {
        assert_eq!(render_failure_memory(&FailureMemory::new()), "");
    }

    #[test]
    fn populated_memory_renders_all_sections() {
        let mut memory = FailureMemory::new();
        memory.record_security_errors(["eval is banned".to_string()]);
        memory.record_code_critique_issues(["missing empty-state handling".to_string()]);
        let rendered = render_failure_memory(&memory);
        assert!(rendered.contains("Security issues"));
        assert!(rendered.contains("eval is banned"));
        assert!(rendered.contains("Code critique issues"));
    }
}
