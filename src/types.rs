//! Core types shared across the orchestrator.
//!
//! - [`Phase`]: identifies which state-machine phase an iteration is in.
//! - [`Severity`]: shared severity ordering used by critics, the scanner,
//!   and the smoke harness's structured errors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One state in the per-iteration phase sequence (spec §4.8).
///
/// `Plan` and `PlanCritique` are skipped once a plan is already approved
/// (spec §3 invariants); `CodeGen` covers both fresh generation and patch
/// cycles, distinguished by [`crate::orchestrator::CodeGenMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Plan,
    PlanCritique,
    CodeGen,
    SecurityScan,
    CodeCritique,
    SmokeTest,
    IterationSeal,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Plan => "plan",
            Phase::PlanCritique => "plan_critique",
            Phase::CodeGen => "code",
            Phase::SecurityScan => "security_scan",
            Phase::CodeCritique => "code_critique",
            Phase::SmokeTest => "tests",
            Phase::IterationSeal => "iteration_seal",
        };
        write!(f, "{s}")
    }
}

/// Severity ordering shared by critics, the scanner's structure errors, and
/// the smoke harness's structured errors. `Ord` is derived so `severity >=
/// Severity::High` comparisons read naturally (mirrors the teacher corpus's
/// severity convention).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::Critical => "critical",
        };
        write!(f, "{s}")
    }
}
