//! Crate-wide error type for the DS-Star Orchestrator.
//!
//! Every variant carries enough context (phase, iteration) to be rendered
//! into an [`ErrorEvent`](crate::channels::errors::ErrorEvent) for the
//! iteration record, so a failed run is always inspectable from
//! `summary.json` without re-running the pipeline.

use thiserror::Error;

use crate::types::Phase;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DsStarError>;

/// Top-level error taxonomy (see spec §7).
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum DsStarError {
    /// The caller-supplied `Request` failed validation (empty prompt, or
    /// `max_iters` outside `1..=10`). This is a boundary error, not a
    /// recoverable orchestrator condition.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// A model call timed out or the transport failed. Recorded as the
    /// current phase's failure; the iteration advances.
    #[error("model call failed during {phase}: {source}")]
    ModelCall {
        phase: Phase,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The Planner returned text that could not be parsed into a `Plan`
    /// even after a repair pass.
    #[error("planner response could not be parsed as a plan")]
    PlanParse { raw: String },

    /// The smoke-test browser harness itself crashed (distinct from a
    /// behavioral smoke-test failure, which is not an error).
    #[error("smoke harness failure: {0}")]
    Harness(String),

    /// Writing an artifact to disk failed.
    #[error("artifact write failed for {path}: {source}")]
    ArtifactWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization of an artifact to JSON failed.
    #[error("artifact serialization failed: {0}")]
    ArtifactSerialize(#[from] serde_json::Error),
}

impl DsStarError {
    pub fn model_call(
        phase: Phase,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DsStarError::ModelCall {
            phase,
            source: Box::new(source),
        }
    }
}
