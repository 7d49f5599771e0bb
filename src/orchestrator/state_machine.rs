//! Per-iteration phase gating rules (spec §4.8).
//!
//! Pulled out of [`super::Orchestrator::run`] so the gating table itself —
//! which phase follows which outcome — can be unit tested without a model
//! adapter or artifact store in the loop. Grounded on the teacher's
//! `runtimes/runner.rs` step-decision pattern: a pure function from
//! "where are we, what just happened" to "what happens next".

use crate::types::Phase;

/// What the orchestrator should do after a phase completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextAction {
    /// Continue the pipeline with the next phase in sequence.
    Advance(Phase),
    /// Re-run code generation with the same approved plan (a patch
    /// cycle), without returning to planning.
    RetryCodeGen,
    /// A security-critical finding forces the plan itself to be
    /// invalidated; re-plan from scratch next iteration.
    InvalidatePlan,
    /// The iteration is done and the run succeeded.
    Succeed,
    /// The iteration failed outright (not recoverable by continuing
    /// within this iteration); move to the next iteration or give up.
    FailIteration,
}

/// Decide what happens after the Plan-Critique phase.
pub fn after_plan_critique(approved: bool) -> NextAction {
    if approved {
        NextAction::Advance(Phase::CodeGen)
    } else {
        NextAction::FailIteration
    }
}

/// Decide what happens after the Security Scan phase (spec §4.8: a
/// critical finding is a "security-hard failure" that forces plan
/// invalidation rather than just another code-gen retry).
pub fn after_security_scan(hard_failure: bool, has_findings: bool) -> NextAction {
    if hard_failure {
        NextAction::InvalidatePlan
    } else if has_findings {
        NextAction::RetryCodeGen
    } else {
        NextAction::Advance(Phase::CodeCritique)
    }
}

/// Decide what happens after the (advisory-only) Code-Critique phase: it
/// never blocks, so the pipeline always advances to the smoke test,
/// regardless of its verdict.
pub fn after_code_critique() -> NextAction {
    NextAction::Advance(Phase::SmokeTest)
}

/// Decide what happens after the Smoke Test phase.
pub fn after_smoke_test(clean: bool) -> NextAction {
    if clean {
        NextAction::Succeed
    } else {
        NextAction::RetryCodeGen
    }
}

/// Whether a run at `iteration_index` (0-based) that has not yet succeeded
/// should be accepted as a fallback success (spec §4.8: fallback success
/// condition at ≥0.75·maxIters, i.e. the caller gets the best attempt so
/// far instead of an unconditional failure near the iteration budget).
pub fn is_fallback_eligible(iteration_index: u32, fallback_threshold: u32) -> bool {
    iteration_index + 1 >= fallback_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_critique_rejection_fails_the_iteration() {
        assert_eq!(after_plan_critique(false), NextAction::FailIteration);
    }

    #[test]
    fn plan_critique_approval_advances_to_codegen() {
        assert_eq!(after_plan_critique(true), NextAction::Advance(Phase::CodeGen));
    }

    #[test]
    fn critical_security_finding_invalidates_the_plan() {
        assert_eq!(after_security_scan(true, true), NextAction::InvalidatePlan);
    }

    #[test]
    fn non_critical_security_finding_retries_codegen() {
        assert_eq!(after_security_scan(false, true), NextAction::RetryCodeGen);
    }

    #[test]
    fn clean_scan_advances_to_code_critique() {
        assert_eq!(after_security_scan(false, false), NextAction::Advance(Phase::CodeCritique));
    }

    #[test]
    fn code_critique_always_advances_to_smoke_test() {
        assert_eq!(after_code_critique(), NextAction::Advance(Phase::SmokeTest));
    }

    #[test]
    fn clean_smoke_test_succeeds() {
        assert_eq!(after_smoke_test(true), NextAction::Succeed);
    }

    #[test]
    fn failed_smoke_test_retries_codegen() {
        assert_eq!(after_smoke_test(false), NextAction::RetryCodeGen);
    }

    #[test]
    fn fallback_eligibility_matches_threshold() {
        // max_iters = 5 -> threshold = 4 (ceil(5*0.75))
        assert!(!is_fallback_eligible(2, 4));
        assert!(is_fallback_eligible(3, 4));
        assert!(is_fallback_eligible(4, 4));
    }
}
