//! Progress event schema (spec §6.3).
//!
//! `ProgressEvent` is the wire shape streamed to the caller-supplied
//! `onProgress` callback. Every variant carries the `models` block so a
//! consumer never has to join against the original `Request` to know which
//! model produced a given phase's output.

use serde::{Deserialize, Serialize};

use crate::failure_memory::RunSummary;

/// Model identifiers threaded through every progress event, echoing the
/// caller's role→model mapping from the `Request` (spec §6.1).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelRoles {
    pub planner: String,
    pub coder: String,
    pub critic: String,
    pub runtime: String,
}

/// The `phase` enumerant carried by `iteration` events. Distinct from
/// [`crate::types::Phase`]: this is the wire vocabulary from spec §6.3,
/// which additionally has a bare `start` value with no counterpart in the
/// internal per-iteration state machine.
///
/// Declaration order matches the temporal order phases actually occur in
/// (spec §5: security-scan strictly after code-gen, strictly before
/// smoke-test) so the derived `Ord` can be used directly for the
/// non-decreasing ordering check in invariant 8.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EventPhase {
    Start,
    Plan,
    PlanCritique,
    Code,
    SecurityScan,
    CodeCritique,
    Tests,
}

impl From<crate::types::Phase> for EventPhase {
    fn from(p: crate::types::Phase) -> Self {
        match p {
            crate::types::Phase::Plan => EventPhase::Plan,
            crate::types::Phase::PlanCritique => EventPhase::PlanCritique,
            crate::types::Phase::CodeGen => EventPhase::Code,
            crate::types::Phase::SecurityScan => EventPhase::SecurityScan,
            crate::types::Phase::CodeCritique => EventPhase::CodeCritique,
            crate::types::Phase::SmokeTest => EventPhase::Tests,
            crate::types::Phase::IterationSeal => EventPhase::Tests,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Working,
    Approved,
    Rejected,
    AdvisoryIssues,
    SecurityFailed,
    Failed,
    Passed,
}

/// One progress event in a run's ordered stream (spec §6.3, §5 ordering
/// guarantees).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    Start {
        models: ModelRoles,
        run_id: String,
        max_iters: u32,
    },
    Iteration {
        models: ModelRoles,
        iteration: u32,
        max_iters: u32,
        phase: EventPhase,
        status: EventStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        issues: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        missing: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        errors: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        violations: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fatal_error: Option<String>,
    },
    Success {
        models: ModelRoles,
        iteration: u32,
        #[serde(skip_serializing_if = "std::ops::Not::not", default)]
        fallback: bool,
    },
    Complete {
        models: ModelRoles,
        summary: RunSummary,
    },
    Error {
        models: ModelRoles,
        error: String,
    },
}

impl ProgressEvent {
    /// Stable discriminant used for log-line grouping and for the
    /// invariant-8 ordering check (`(iteration, phase)` pairs non-decreasing).
    pub fn type_name(&self) -> &'static str {
        match self {
            ProgressEvent::Start { .. } => "start",
            ProgressEvent::Iteration { .. } => "iteration",
            ProgressEvent::Success { .. } => "success",
            ProgressEvent::Complete { .. } => "complete",
            ProgressEvent::Error { .. } => "error",
        }
    }

    /// The `(iteration, phase)` key used to assert non-decreasing ordering
    /// within a run (spec §8 invariant 8). `None` for events that are not
    /// phase-scoped.
    pub fn ordering_key(&self) -> Option<(u32, EventPhase)> {
        match self {
            ProgressEvent::Iteration {
                iteration, phase, ..
            } => Some((*iteration, *phase)),
            _ => None,
        }
    }

    /// One-line human-readable summary, used by [`crate::telemetry`].
    pub fn summary(&self) -> String {
        match self {
            ProgressEvent::Start { run_id, max_iters, .. } => {
                format!("run {run_id} started (max_iters={max_iters})")
            }
            ProgressEvent::Iteration {
                iteration,
                phase,
                status,
                ..
            } => format!("iter {iteration} {phase:?} -> {status:?}"),
            ProgressEvent::Success { iteration, fallback, .. } => {
                if *fallback {
                    format!("success at iteration {iteration} (fallback)")
                } else {
                    format!("success at iteration {iteration}")
                }
            }
            ProgressEvent::Complete { summary, .. } => {
                format!("run complete: success={}", summary.success)
            }
            ProgressEvent::Error { error, .. } => format!("error: {error}"),
        }
    }
}
