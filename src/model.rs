//! Model adapter abstraction (spec §6.2).
//!
//! The orchestrator is generic over how a chat-completion call is actually
//! made; `ModelAdapter` is the seam. The default production implementation
//! (`ReqwestModelAdapter`, behind the `http-model` feature) is grounded on
//! the teacher's `runtimes/runtime_config.rs` HTTP-backed runner adapter
//! pattern: one trait method, role + model name in, raw text out, errors
//! surfaced through the crate's own error type rather than the transport's.

use async_trait::async_trait;

/// One role→model pairing from the caller's `Request` (spec §6.1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelRole {
    Planner,
    Coder,
    Critic,
}

/// Pluggable capability for invoking an LLM. Implementors receive the
/// fully-built prompt string and the role it's being invoked for, and
/// return the raw completion text — parsing/repair is the caller's job
/// (see [`crate::normalizer`]).
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    async fn complete(
        &self,
        role: ModelRole,
        model: &str,
        prompt: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Deterministic in-memory adapter for tests: returns canned responses
/// keyed by role, recording every call it received.
#[derive(Default)]
pub struct StubModelAdapter {
    pub responses: parking_lot::Mutex<std::collections::HashMap<&'static str, Vec<String>>>,
}

impl StubModelAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self, role: &'static str, response: impl Into<String>) {
        self.responses.lock().entry(role).or_default().push(response.into());
    }

    fn role_key(role: ModelRole) -> &'static str {
        match role {
            ModelRole::Planner => "planner",
            ModelRole::Coder => "coder",
            ModelRole::Critic => "critic",
        }
    }
}

#[async_trait]
impl ModelAdapter for StubModelAdapter {
    async fn complete(
        &self,
        role: ModelRole,
        _model: &str,
        _prompt: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let key = Self::role_key(role);
        let mut guard = self.responses.lock();
        let queue = guard.entry(key).or_default();
        if queue.is_empty() {
            return Err(format!("StubModelAdapter: no queued response for role {key}").into());
        }
        Ok(queue.remove(0))
    }
}

#[cfg(feature = "http-model")]
pub use http::ReqwestModelAdapter;

#[cfg(feature = "http-model")]
mod http {
    use async_trait::async_trait;
    use serde::Serialize;

    use super::{ModelAdapter, ModelRole};

    /// Minimal OpenAI-compatible chat-completions client used as the
    /// default production `ModelAdapter`.
    pub struct ReqwestModelAdapter {
        client: reqwest::Client,
        base_url: String,
        api_key: String,
    }

    impl ReqwestModelAdapter {
        pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
            Self {
                client: reqwest::Client::new(),
                base_url: base_url.into(),
                api_key: api_key.into(),
            }
        }
    }

    #[derive(Serialize)]
    struct ChatRequest<'a> {
        model: &'a str,
        messages: [ChatMessage<'a>; 1],
    }

    #[derive(Serialize)]
    struct ChatMessage<'a> {
        role: &'static str,
        content: &'a str,
    }

    #[async_trait]
    impl ModelAdapter for ReqwestModelAdapter {
        async fn complete(
            &self,
            _role: ModelRole,
            model: &str,
            prompt: &str,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            let body = ChatRequest {
                model,
                messages: [ChatMessage { role: "user", content: prompt }],
            };
            let response = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?
                .error_for_status()?;
            let value: serde_json::Value = response.json().await?;
            value
                .get("choices")
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("message"))
                .and_then(|m| m.get("content"))
                .and_then(|c| c.as_str())
                .map(|s| s.to_string())
                .ok_or_else(|| "malformed chat-completion response".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_adapter_returns_queued_response_in_order() {
        let adapter = StubModelAdapter::new();
        adapter.queue("planner", "first");
        adapter.queue("planner", "second");

        let first = adapter.complete(ModelRole::Planner, "gpt-test", "p").await.unwrap();
        let second = adapter.complete(ModelRole::Planner, "gpt-test", "p").await.unwrap();
        assert_eq!(first, "first");
        assert_eq!(second, "second");
    }

    #[tokio::test]
    async fn stub_adapter_errors_when_empty() {
        let adapter = StubModelAdapter::new();
        let result = adapter.complete(ModelRole::Coder, "gpt-test", "p").await;
        assert!(result.is_err());
    }
}
