//! # DS-Star Orchestrator
//!
//! A bounded-fixpoint multi-agent pipeline that turns a natural-language
//! request into a statically vetted, smoke-tested single-file HTML app.
//!
//! ## Core Concepts
//!
//! - **Plan**: a structured description of the app to build (pages, UI
//!   components, interactions, acceptance criteria), produced by the
//!   Planner and gated by the (blocking) Plan-Critic.
//! - **Security Scanner**: a deterministic, model-free pass over
//!   generated HTML that rejects banned tags, inline handlers, and
//!   disallowed call patterns before anything reaches a browser.
//! - **Safety Transformer**: idempotently injects a restrictive CSP and a
//!   sandboxed runtime bridge into every generated document.
//! - **Critics**: the Plan-Critic blocks progression on rejection; the
//!   Code-Critic is advisory-only and never blocks.
//! - **Smoke Harness**: a headless-browser pass that derives CSS
//!   selectors from the plan's `ui_components`, clicks through them, and
//!   classifies whatever the console produced.
//! - **Artifact Store**: every iteration's plan/HTML/scan/critique/smoke
//!   output is written to disk as the run progresses; `final.html` is
//!   always written, even for a failed run.
//! - **Orchestrator**: the state machine driving one run through
//!   Plan → PlanCritique → CodeGen → SecurityScan → CodeCritique →
//!   SmokeTest → IterationSeal, bounded by `max_iters`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use dsstar::config::{ModelConfig, RunConfig};
//! use dsstar::event_bus::EventBus;
//! use dsstar::model::StubModelAdapter;
//! use dsstar::orchestrator::{Orchestrator, Request};
//!
//! # async fn example(browser_factory: Arc<dyn dsstar::orchestrator::BrowserDriverFactory>) -> dsstar::error::Result<()> {
//! let model = Arc::new(StubModelAdapter::new());
//! let bus = EventBus::new();
//! let config = RunConfig::default();
//!
//! let orchestrator = Orchestrator::new(model, browser_factory, bus, config);
//! let request = Request {
//!     prompt: "a single-page habit tracker".to_string(),
//!     models: ModelConfig::default(),
//!     max_iters: 5,
//! };
//! let summary = orchestrator.run(request).await?;
//! assert!(summary.total_iterations >= 1 || !summary.success);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Guide
//!
//! - [`plan`] - the `Plan` data model and its validation rules
//! - [`normalizer`] - HTML/JSON extraction from raw model text
//! - [`scanner`] - the deterministic Security Scanner
//! - [`safety`] - CSP and runtime-bridge injection
//! - [`prompts`] - pure prompt-construction functions per phase
//! - [`critics`] - Plan-Critic / Code-Critic verdict parsing
//! - [`smoke`] - the browser-driven Smoke Harness
//! - [`artifact_store`] - on-disk per-run artifact layout
//! - [`model`] - the pluggable `ModelAdapter` trait and implementations
//! - [`config`] - run configuration and ambient environment defaults
//! - [`orchestrator`] - the per-run state machine
//! - [`event_bus`] - progress-event publication
//! - [`channels`] - structured error records
//! - [`telemetry`] - human-readable rendering for events and errors
//! - [`failure_memory`] - cross-iteration failure accumulation and summaries
//! - [`error`] - crate-wide error taxonomy
//! - [`types`] - shared `Phase`/`Severity` vocabulary

pub mod artifact_store;
pub mod channels;
pub mod config;
pub mod critics;
pub mod error;
pub mod event_bus;
pub mod failure_memory;
pub mod model;
pub mod normalizer;
pub mod orchestrator;
pub mod plan;
pub mod prompts;
pub mod safety;
pub mod scanner;
pub mod smoke;
pub mod telemetry;
pub mod types;
pub mod utils;
