//! Failure memory and run-level bookkeeping (spec §3, §4.8).
//!
//! `FailureMemory` is the append-only, de-duplicated record of everything
//! that has gone wrong so far in a run; it is embedded into every retry
//! prompt so the Planner/Coder/Critics never repeat a mistake they've
//! already been told about. `IterationRecord` and `RunSummary` are the
//! artifact-store/event-bus facing summaries built from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::critics::CritiqueResult;
use crate::scanner::ScanResult;
use crate::smoke::SmokeResult;
use crate::types::Phase;

/// Append-only, de-duplicated failure history for one run (spec §3).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FailureMemory {
    pub security_errors: Vec<String>,
    pub plan_critique_issues: Vec<String>,
    pub code_critique_issues: Vec<String>,
}

impl FailureMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_security_errors(&mut self, messages: impl IntoIterator<Item = String>) {
        push_dedup(&mut self.security_errors, messages);
    }

    pub fn record_plan_critique_issues(&mut self, messages: impl IntoIterator<Item = String>) {
        push_dedup(&mut self.plan_critique_issues, messages);
    }

    pub fn record_code_critique_issues(&mut self, messages: impl IntoIterator<Item = String>) {
        push_dedup(&mut self.code_critique_issues, messages);
    }

    pub fn is_empty(&self) -> bool {
        self.security_errors.is_empty()
            && self.plan_critique_issues.is_empty()
            && self.code_critique_issues.is_empty()
    }
}

fn push_dedup(target: &mut Vec<String>, messages: impl IntoIterator<Item = String>) {
    for msg in messages {
        if !target.contains(&msg) {
            target.push(msg);
        }
    }
}

/// Outcome of a single phase within one iteration, for the event log and
/// the artifact store's `iteration.json`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PhaseOutcome {
    pub phase: Phase,
    pub passed: bool,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Full record of one iteration through the state machine (spec §4.8).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct IterationRecord {
    pub iteration_index: u32,
    pub phase_outcomes: Vec<PhaseOutcome>,
    #[serde(default)]
    pub plan: Option<crate::plan::Plan>,
    #[serde(default)]
    pub html: Option<String>,
    pub security_scan: Option<ScanResult>,
    #[serde(default)]
    pub code_critique: Option<CritiqueResult>,
    #[serde(default)]
    pub smoke_result: Option<SmokeResult>,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    pub success: bool,
}

impl IterationRecord {
    pub fn started(iteration_index: u32, start_ts: DateTime<Utc>) -> Self {
        Self {
            iteration_index,
            phase_outcomes: Vec::new(),
            plan: None,
            html: None,
            security_scan: None,
            code_critique: None,
            smoke_result: None,
            start_ts,
            end_ts: start_ts,
            success: false,
        }
    }

    pub fn record_phase(&mut self, phase: Phase, passed: bool, detail: Option<String>) {
        self.phase_outcomes.push(PhaseOutcome { phase, passed, detail });
    }
}

/// Final per-run summary, streamed in the `complete` progress event and
/// written to the artifact store's `summary.json` (spec §6.3, §4.7).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub run_id: String,
    pub success: bool,
    pub total_iterations: u32,
    #[serde(default)]
    pub plan_approved_at: Option<u32>,
    #[serde(default)]
    pub code_approved_at: Option<u32>,
    #[serde(default)]
    pub tests_passed_at: Option<u32>,
    #[serde(default)]
    pub last_failure: Option<String>,
    pub accumulated_security_errors: Vec<String>,
    pub failure_reports: Vec<IterationRecord>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_security_errors_dedupes() {
        let mut mem = FailureMemory::new();
        mem.record_security_errors(["eval is banned".to_string()]);
        mem.record_security_errors(["eval is banned".to_string(), "iframe is banned".to_string()]);
        assert_eq!(mem.security_errors.len(), 2);
    }

    #[test]
    fn empty_memory_reports_empty() {
        assert!(FailureMemory::new().is_empty());
    }
}
