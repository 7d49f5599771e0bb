//! Patch prompt (spec §4.4): a targeted retry ask for a smoke-test failure,
//! carrying the failing structured error rather than the full plan/code
//! round trip the Coder prompt builds from scratch.

use crate::smoke::structured_error::StructuredError;

pub fn build(html: &str, failures: &[StructuredError]) -> String {
    let mut out = String::from(
        "The previous version of this single-file HTML app failed its browser smoke test. \
         Here is the current HTML:\n\n",
    );
    out.push_str(html);
    out.push_str("\n\nFailures to fix:");
    for failure in failures {
        out.push_str("\n- ");
        out.push_str(&failure.describe());
    }
    out.push_str(
        "\n\nRespond with the complete, corrected HTML document only — do not describe the \
         change, just provide the full file.",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoke::structured_error::{ErrorClass, StructuredError};

    #[test]
    fn lists_every_failure() {
        let failures = vec![
            StructuredError {
                class: ErrorClass::MissingSelector,
                selector: Some("#add-item-button".to_string()),
                message: "selector not found in DOM".to_string(),
            },
            StructuredError {
                class: ErrorClass::ConsoleError,
                selector: None,
                message: "Uncaught TypeError: x is not a function".to_string(),
            },
        ];
        let prompt = build("<html></html>", &failures);
        assert!(prompt.contains("#add-item-button"));
        assert!(prompt.contains("Uncaught TypeError"));
    }
}
