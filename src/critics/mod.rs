//! Critics (spec §4.5): the Plan-Critic (blocking) and Code-Critic
//! (advisory-only) both run against the same adapter and JSON contract,
//! differing only in how the orchestrator's state machine treats their
//! verdict. Grounded on wg-bastion's `pipeline/stage.rs` `GuardrailStage`
//! trait: a critic is a stage that inspects upstream output and returns a
//! structured verdict rather than transforming the payload.

pub mod adapter;

use serde::{Deserialize, Serialize};

/// One issue raised by a critic.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CritiqueIssue {
    pub message: String,
    #[serde(default)]
    pub blocking: bool,
}

/// Parsed verdict from a critic call (spec §4.5: `{approved, issues}`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CritiqueResult {
    pub approved: bool,
    pub issues: Vec<CritiqueIssue>,
    /// Set when the critic model call failed and the orchestrator fell
    /// back to treating the critique as advisory-only rather than
    /// blocking (spec §4.5: "critic unavailable" fallback).
    #[serde(default)]
    pub unavailable: bool,
}

impl CritiqueResult {
    pub fn approved() -> Self {
        Self {
            approved: true,
            issues: Vec::new(),
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            approved: true,
            issues: Vec::new(),
            unavailable: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.message.clone()).collect()
    }
}

/// Which role a critic call is playing — determines whether the
/// orchestrator blocks the iteration on a rejection or merely records the
/// issues and proceeds (spec §4.5).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CriticRole {
    Plan,
    Code,
}

impl CriticRole {
    /// Plan critiques gate progression; code critiques never do.
    pub fn is_blocking(self) -> bool {
        matches!(self, CriticRole::Plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_role_blocks_code_role_does_not() {
        assert!(CriticRole::Plan.is_blocking());
        assert!(!CriticRole::Code.is_blocking());
    }

    #[test]
    fn unavailable_result_is_treated_as_approved() {
        let result = CritiqueResult::unavailable();
        assert!(result.approved);
        assert!(result.unavailable);
    }
}
