//! End-to-end orchestrator runs against stubbed model and browser
//! adapters — no real model or browser involved.

use std::sync::Arc;

use async_trait::async_trait;

use dsstar::config::{ModelConfig, RunConfig};
use dsstar::error::Result;
use dsstar::event_bus::{EventBus, MemorySink, ProgressEvent};
use dsstar::model::StubModelAdapter;
use dsstar::orchestrator::{BrowserDriverFactory, Orchestrator, Request};
use dsstar::smoke::browser::{BrowserDriver, Interaction};
use dsstar::smoke::structured_error::StructuredError;

const PLAN_JSON: &str = r#"{
    "title": "Tally Counter",
    "pages": [{"name": "Home", "description": "a counter"}],
    "ui_components": ["increment-button", "counter-display"],
    "interactions": ["click increment-button to increase the count"],
    "acceptance_criteria": ["counter starts at zero"]
}"#;

const APPROVED_CRITIQUE: &str = r#"{"approved": true, "issues": []}"#;

const CLEAN_HTML: &str = r#"<!DOCTYPE html>
<html><head><title>Tally Counter</title></head>
<body>
  <button id="increment-button">+1</button>
  <span id="counter-display">0</span>
</body></html>"#;

struct AllFoundDriver;

#[async_trait]
impl BrowserDriver for AllFoundDriver {
    async fn load(&mut self, _html: &str) -> std::result::Result<(), String> {
        Ok(())
    }
    async fn exists(&mut self, _selector: &str) -> std::result::Result<bool, String> {
        Ok(true)
    }
    async fn interact(&mut self, _selector: &str, _interaction: Interaction) -> std::result::Result<(), String> {
        Ok(())
    }
    async fn drain_console(&mut self) -> Vec<StructuredError> {
        Vec::new()
    }
}

struct AllFoundFactory;

#[async_trait]
impl BrowserDriverFactory for AllFoundFactory {
    async fn create(&self) -> Result<Box<dyn BrowserDriver>> {
        Ok(Box::new(AllFoundDriver))
    }
}

#[tokio::test]
async fn happy_path_run_succeeds_on_first_iteration() {
    let model = Arc::new(StubModelAdapter::new());
    model.queue("planner", PLAN_JSON);
    model.queue("critic", APPROVED_CRITIQUE);
    model.queue("coder", CLEAN_HTML);
    model.queue("critic", APPROVED_CRITIQUE);

    let sink = MemorySink::new();
    let bus = EventBus::with_sink(sink.clone());

    let mut config = RunConfig::default();
    config.models = ModelConfig {
        planner: "test-planner".to_string(),
        coder: "test-coder".to_string(),
        critic: "test-critic".to_string(),
        runtime: "test-runtime".to_string(),
    };
    config.artifact_root = std::env::temp_dir().join("dsstar-orchestrator-test");
    config.max_iters = 3;

    let orchestrator = Orchestrator::new(model, Arc::new(AllFoundFactory), bus, config);

    let request = Request {
        prompt: "a tally counter with an increment button".to_string(),
        models: ModelConfig {
            planner: "test-planner".to_string(),
            coder: "test-coder".to_string(),
            critic: "test-critic".to_string(),
            runtime: "test-runtime".to_string(),
        },
        max_iters: 3,
    };

    let summary = orchestrator.run(request).await.unwrap();
    assert!(summary.success);
    assert_eq!(summary.total_iterations, 1);

    let events = sink.snapshot();
    assert!(matches!(events.first(), Some(ProgressEvent::Start { .. })));
    assert!(matches!(events.last(), Some(ProgressEvent::Complete { .. })));
}

#[tokio::test]
async fn invalid_request_is_rejected_before_any_model_call() {
    let model = Arc::new(StubModelAdapter::new());
    let bus = EventBus::new();
    let mut config = RunConfig::default();
    config.artifact_root = std::env::temp_dir().join("dsstar-orchestrator-test-invalid");

    let orchestrator = Orchestrator::new(model, Arc::new(AllFoundFactory), bus, config);
    let request = Request {
        prompt: "".to_string(),
        models: ModelConfig::default(),
        max_iters: 3,
    };

    let result = orchestrator.run(request).await;
    assert!(result.is_err());
}
