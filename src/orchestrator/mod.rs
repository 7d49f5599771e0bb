//! Orchestrator (spec §4.8): the per-run state machine driving Plan →
//! PlanCritique → CodeGen → SecurityScan → CodeCritique → SmokeTest →
//! IterationSeal, bounded by `max_iters`, accumulating failure memory
//! across iterations and emitting progress events as it goes.
//!
//! Grounded on the teacher's `runtimes/runner.rs` run-loop shape: a
//! bounded retry loop around a pluggable step function, with every step's
//! outcome folded into a running record rather than discarded. The gating
//! decisions themselves live in [`state_machine`] as pure functions.

pub mod state_machine;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::artifact_store::ArtifactStore;
use crate::config::{ModelConfig, RunConfig};
use crate::critics::{self, CriticRole, CritiqueResult};
use crate::error::{DsStarError, Result};
use crate::event_bus::{EventBus, EventPhase, EventStatus, ModelRoles, ProgressEvent};
use crate::failure_memory::{FailureMemory, IterationRecord, RunSummary};
use crate::model::{ModelAdapter, ModelRole};
use crate::normalizer;
use crate::plan::Plan;
use crate::prompts;
use crate::safety;
use crate::scanner::{self, ScanResult};
use crate::smoke::browser::BrowserDriver;
use crate::smoke::{self, SmokeResult};
use crate::types::Phase;
use crate::utils::id_generator;

/// One natural-language app request (spec §6.1).
#[derive(Clone, Debug)]
pub struct Request {
    pub prompt: String,
    pub models: ModelConfig,
    pub max_iters: u32,
}

impl Request {
    /// Boundary validation (spec §3.1 supplement): an empty prompt or an
    /// out-of-range `max_iters` is rejected outright rather than silently
    /// clamped.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(DsStarError::InvalidRequest { reason: "prompt must not be empty".to_string() });
        }
        if !(crate::config::MIN_MAX_ITERS..=crate::config::MAX_MAX_ITERS).contains(&self.max_iters) {
            return Err(DsStarError::InvalidRequest {
                reason: format!(
                    "max_iters must be between {} and {}, got {}",
                    crate::config::MIN_MAX_ITERS,
                    crate::config::MAX_MAX_ITERS,
                    self.max_iters
                ),
            });
        }
        Ok(())
    }

    fn roles(&self) -> ModelRoles {
        ModelRoles {
            planner: self.models.planner.clone(),
            coder: self.models.coder.clone(),
            critic: self.models.critic.clone(),
            runtime: self.models.runtime.clone(),
        }
    }
}

/// Produces a fresh [`BrowserDriver`] per smoke-test call, so the
/// orchestrator never has to know whether it's talking to a real headless
/// browser or a test double.
#[async_trait]
pub trait BrowserDriverFactory: Send + Sync {
    async fn create(&self) -> Result<Box<dyn BrowserDriver>>;
}

/// Drives one run end to end.
pub struct Orchestrator {
    model: Arc<dyn ModelAdapter>,
    browser_factory: Arc<dyn BrowserDriverFactory>,
    bus: EventBus,
    config: RunConfig,
}

impl Orchestrator {
    pub fn new(
        model: Arc<dyn ModelAdapter>,
        browser_factory: Arc<dyn BrowserDriverFactory>,
        bus: EventBus,
        config: RunConfig,
    ) -> Self {
        Self { model, browser_factory, bus, config }
    }

    pub async fn run(&self, request: Request) -> Result<RunSummary> {
        request.validate()?;
        self.config.validate()?;

        let run_id = id_generator::generate();
        let roles = request.roles();
        let artifact_root = self.artifact_root();
        let store = ArtifactStore::create(&artifact_root, &run_id).await?;

        self.bus.publish(&ProgressEvent::Start {
            models: roles.clone(),
            run_id: run_id.clone(),
            max_iters: self.config.max_iters,
        });

        let mut memory = FailureMemory::new();
        let mut records: Vec<IterationRecord> = Vec::new();
        let mut plan: Option<Plan> = None;
        let mut last_html: Option<String> = None;
        let mut last_scan: Option<ScanResult> = None;
        let mut plan_approved_at = None;
        let mut code_approved_at = None;
        let mut tests_passed_at = None;
        let mut last_failure: Option<String> = None;

        let fallback_threshold = self.config.fallback_threshold();
        let mut success = false;

        for iteration in 0..self.config.max_iters {
            let mut record = IterationRecord::started(iteration, Utc::now());

            // Plan / PlanCritique — skipped once a plan is already approved.
            if plan.is_none() {
                let planner_prompt = prompts::planner::build(&request.prompt, &memory);
                let planner_response =
                    self.model.complete(ModelRole::Planner, &roles.planner, &planner_prompt).await;

                let parsed_plan = match planner_response {
                    Ok(text) => normalizer::extract_json(&text)
                        .and_then(|json| serde_json::from_str::<Plan>(&json).ok()),
                    Err(_) => None,
                };

                let Some(candidate) = parsed_plan.filter(|p| p.validate().is_ok()) else {
                    record.record_phase(Phase::Plan, false, Some("planner response unusable".to_string()));
                    last_failure = Some("planner response could not be parsed into a valid plan".to_string());
                    self.emit_iteration(&roles, iteration, EventPhase::Plan, EventStatus::Failed, None);
                    records.push(self.finish(record, false, &store).await?);
                    continue;
                };

                let critique_prompt = prompts::plan_critic::build(&candidate);
                let critique =
                    critics::adapter::run_critic(self.model.as_ref(), &roles.critic, &critique_prompt).await;
                record.record_phase(Phase::PlanCritique, critique.approved, None);

                if !critique.approved {
                    memory.record_plan_critique_issues(critique.messages());
                    self.emit_iteration(
                        &roles,
                        iteration,
                        EventPhase::PlanCritique,
                        EventStatus::Rejected,
                        Some(critique.messages()),
                    );
                    last_failure = Some("plan critique rejected the plan".to_string());
                    records.push(self.finish(record, false, &store).await?);
                    continue;
                }

                self.emit_iteration(&roles, iteration, EventPhase::PlanCritique, EventStatus::Approved, None);
                plan_approved_at.get_or_insert(iteration);
                record.plan = Some(candidate.clone());
                plan = Some(candidate);
            }
            let current_plan = plan.clone().expect("plan is set by this point");

            // CodeGen
            let coder_prompt = prompts::coder::build(&current_plan, &memory, last_scan.as_ref());
            let coder_response = self.model.complete(ModelRole::Coder, &roles.coder, &coder_prompt).await;
            let html = match coder_response.ok().and_then(|t| normalizer::extract_html(&t)) {
                Some(html) => safety::apply(&html),
                None => {
                    record.record_phase(Phase::CodeGen, false, Some("coder response unusable".to_string()));
                    last_failure = Some("coder response could not be parsed into HTML".to_string());
                    self.emit_iteration(&roles, iteration, EventPhase::Code, EventStatus::Failed, None);
                    records.push(self.finish(record, false, &store).await?);
                    continue;
                }
            };
            record.html = Some(html.clone());
            last_html = Some(html.clone());
            self.emit_iteration(&roles, iteration, EventPhase::Code, EventStatus::Working, None);

            // SecurityScan
            let scan = scanner::scan(&html);
            record.security_scan = Some(scan.clone());
            let hard_failure = scan.is_hard_failure();
            if scan.has_findings() {
                memory.record_security_errors(scan.messages());
            }
            let scan_action = state_machine::after_security_scan(hard_failure, scan.has_findings());
            last_scan = Some(scan.clone());

            match scan_action {
                state_machine::NextAction::InvalidatePlan => {
                    self.emit_iteration(
                        &roles,
                        iteration,
                        EventPhase::SecurityScan,
                        EventStatus::SecurityFailed,
                        Some(scan.messages()),
                    );
                    last_failure = Some("security scan found a critical issue; plan invalidated".to_string());
                    plan = None;
                    record.record_phase(Phase::SecurityScan, false, Some("hard failure".to_string()));
                    records.push(self.finish(record, false, &store).await?);
                    continue;
                }
                state_machine::NextAction::RetryCodeGen => {
                    self.emit_iteration(
                        &roles,
                        iteration,
                        EventPhase::SecurityScan,
                        EventStatus::Failed,
                        Some(scan.messages()),
                    );
                    last_failure = Some("security scan found issues; retrying code generation".to_string());
                    record.record_phase(Phase::SecurityScan, false, None);
                    records.push(self.finish(record, false, &store).await?);
                    continue;
                }
                _ => {
                    self.emit_iteration(&roles, iteration, EventPhase::SecurityScan, EventStatus::Passed, None);
                    record.record_phase(Phase::SecurityScan, true, None);
                    code_approved_at.get_or_insert(iteration);
                }
            }

            // CodeCritique — advisory-only, never blocks.
            let critique_prompt = prompts::code_critic::build(&current_plan, &html);
            let code_critique: CritiqueResult =
                critics::adapter::run_critic(self.model.as_ref(), &roles.critic, &critique_prompt).await;
            record.code_critique = Some(code_critique.clone());
            if !code_critique.approved {
                memory.record_code_critique_issues(code_critique.messages());
            }
            self.emit_iteration(
                &roles,
                iteration,
                EventPhase::CodeCritique,
                if code_critique.approved { EventStatus::Approved } else { EventStatus::AdvisoryIssues },
                Some(code_critique.messages()),
            );
            debug_assert_eq!(
                state_machine::after_code_critique(),
                state_machine::NextAction::Advance(Phase::SmokeTest)
            );

            // SmokeTest
            let mut driver = self.browser_factory.create().await?;
            let smoke_result: SmokeResult =
                smoke::harness::run(driver.as_mut(), &html, &current_plan.ui_components).await;
            record.smoke_result = Some(smoke_result.clone());
            let clean = smoke_result.is_clean();

            if clean {
                self.emit_iteration(&roles, iteration, EventPhase::Tests, EventStatus::Passed, None);
                tests_passed_at.get_or_insert(iteration);
                record.record_phase(Phase::SmokeTest, true, None);
                record.success = true;
                success = true;
                records.push(self.finish(record, true, &store).await?);
                self.bus.publish(&ProgressEvent::Success {
                    models: roles.clone(),
                    iteration,
                    fallback: false,
                });
                break;
            }

            let messages: Vec<String> = smoke_result.critical_failures().iter().map(|f| f.describe()).collect();
            self.emit_iteration(&roles, iteration, EventPhase::Tests, EventStatus::Failed, Some(messages.clone()));
            last_failure = Some("smoke test failed".to_string());
            record.record_phase(Phase::SmokeTest, false, None);

            if state_machine::is_fallback_eligible(iteration, fallback_threshold) {
                records.push(self.finish(record, false, &store).await?);
                if iteration + 1 == self.config.max_iters {
                    self.bus.publish(&ProgressEvent::Success {
                        models: roles.clone(),
                        iteration,
                        fallback: true,
                    });
                    success = true;
                }
                continue;
            }

            records.push(self.finish(record, false, &store).await?);
        }

        store.write_final_html(last_html.as_deref().unwrap_or_default()).await?;

        let summary = RunSummary {
            run_id: run_id.clone(),
            success,
            total_iterations: records.len() as u32,
            plan_approved_at,
            code_approved_at,
            tests_passed_at,
            last_failure,
            accumulated_security_errors: memory.security_errors.clone(),
            failure_reports: records,
            timestamp: Utc::now(),
        };
        store.write_summary(&summary).await?;

        self.bus.publish(&ProgressEvent::Complete { models: roles, summary: summary.clone() });
        Ok(summary)
    }

    fn artifact_root(&self) -> PathBuf {
        self.config.artifact_root.clone()
    }

    fn emit_iteration(
        &self,
        roles: &ModelRoles,
        iteration: u32,
        phase: EventPhase,
        status: EventStatus,
        issues: Option<Vec<String>>,
    ) {
        self.bus.publish(&ProgressEvent::Iteration {
            models: roles.clone(),
            iteration,
            max_iters: self.config.max_iters,
            phase,
            status,
            issues,
            missing: None,
            errors: None,
            violations: None,
            fatal_error: None,
        });
    }

    async fn finish(
        &self,
        mut record: IterationRecord,
        success: bool,
        store: &ArtifactStore,
    ) -> Result<IterationRecord> {
        record.success = success;
        record.end_ts = Utc::now();
        store.write_iteration(&record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_rejects_empty_prompt() {
        let request = Request { prompt: "   ".to_string(), models: ModelConfig::default(), max_iters: 3 };
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_rejects_out_of_range_max_iters() {
        let request = Request { prompt: "build an app".to_string(), models: ModelConfig::default(), max_iters: 0 };
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_accepts_valid_input() {
        let request = Request { prompt: "build an app".to_string(), models: ModelConfig::default(), max_iters: 3 };
        assert!(request.validate().is_ok());
    }
}
