//! Structured smoke-test failures (spec §4.6): the harness never hands the
//! orchestrator a raw console log line — every failure is classified so
//! the state machine can distinguish a fatal interaction failure from a
//! non-critical console warning.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// A selector derived from `plan.ui_components` was never found in
    /// the rendered DOM.
    MissingSelector,
    /// An interaction (click/type) against a found selector threw.
    InteractionFailure,
    /// An uncaught JS exception or `console.error` during the page's
    /// lifetime, not tied to a specific interaction.
    ConsoleError,
    /// A `console.warn` — recorded but never classified as critical.
    ConsoleWarning,
}

impl ErrorClass {
    /// Per spec §4.6: only missing selectors, interaction failures, and
    /// console errors are critical; warnings never are.
    pub fn is_critical(self) -> bool {
        !matches!(self, ErrorClass::ConsoleWarning)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StructuredError {
    pub class: ErrorClass,
    #[serde(default)]
    pub selector: Option<String>,
    pub message: String,
}

impl StructuredError {
    pub fn describe(&self) -> String {
        match &self.selector {
            Some(selector) => format!("[{:?}] {} ({})", self.class, self.message, selector),
            None => format!("[{:?}] {}", self.class, self.message),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.class.is_critical()
    }
}
