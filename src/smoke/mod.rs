//! Smoke Harness (spec §4.6): a headless-browser-driven check that the
//! generated HTML actually renders and responds to interaction, distinct
//! from (and running after) the static Security Scanner.

pub mod browser;
pub mod harness;
pub mod selectors;
pub mod structured_error;

use serde::{Deserialize, Serialize};

use structured_error::StructuredError;

/// Outcome of one smoke-test pass.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SmokeResult {
    pub failures: Vec<StructuredError>,
    pub interacted: u32,
}

impl SmokeResult {
    /// Per spec §4.6: pass/fail is decided by critical failures only —
    /// console warnings never fail a smoke test.
    pub fn is_clean(&self) -> bool {
        !self.failures.iter().any(|f| f.is_critical())
    }

    pub fn critical_failures(&self) -> Vec<&StructuredError> {
        self.failures.iter().filter(|f| f.is_critical()).collect()
    }
}
