//! Ambient run configuration: model role→name mapping, iteration bounds,
//! and artifact-store root, assembled from the caller's `Request` plus
//! environment defaults (`dotenvy`-loaded) the way the teacher's
//! `runtimes/runtime_config.rs` builds a runner config from a mix of
//! explicit fields and environment fallbacks.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DsStarError, Result};

/// The caller-supplied role→model mapping (spec §6.1).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelConfig {
    pub planner: String,
    pub coder: String,
    pub critic: String,
    pub runtime: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            planner: default_model(),
            coder: default_model(),
            critic: default_model(),
            runtime: default_model(),
        }
    }
}

fn default_model() -> String {
    std::env::var("DSSTAR_DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string())
}

/// Bounds and destinations for one run (spec §3, §4.7).
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub models: ModelConfig,
    pub max_iters: u32,
    pub artifact_root: PathBuf,
}

pub const MIN_MAX_ITERS: u32 = 1;
pub const MAX_MAX_ITERS: u32 = 10;
pub const DEFAULT_MAX_ITERS: u32 = 5;

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            models: ModelConfig::default(),
            max_iters: DEFAULT_MAX_ITERS,
            artifact_root: artifact_root_from_env(),
        }
    }
}

fn artifact_root_from_env() -> PathBuf {
    std::env::var("DSSTAR_ARTIFACT_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./dsstar-runs"))
}

impl RunConfig {
    /// Validate `max_iters` falls within the spec's allowed range
    /// (§3: caller-supplied `max_iters` outside `1..=10` is a boundary
    /// error, not silently clamped).
    pub fn validate(&self) -> Result<()> {
        if !(MIN_MAX_ITERS..=MAX_MAX_ITERS).contains(&self.max_iters) {
            return Err(DsStarError::InvalidRequest {
                reason: format!(
                    "max_iters must be between {MIN_MAX_ITERS} and {MAX_MAX_ITERS}, got {}",
                    self.max_iters
                ),
            });
        }
        Ok(())
    }

    /// The iteration index (0-based) at which a fallback-success
    /// evaluation begins (spec §4.8: "fallback success condition at
    /// ≥0.75·maxIters").
    pub fn fallback_threshold(&self) -> u32 {
        ((self.max_iters as f64) * 0.75).ceil() as u32
    }
}

/// Load ambient defaults from a `.env` file if present; a no-op if none
/// exists. Call once at process start, before constructing any
/// `RunConfig`.
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_max_iters_out_of_range() {
        let mut config = RunConfig::default();
        config.max_iters = 0;
        assert!(config.validate().is_err());
        config.max_iters = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn accepts_max_iters_in_range() {
        let mut config = RunConfig::default();
        config.max_iters = 1;
        assert!(config.validate().is_ok());
        config.max_iters = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fallback_threshold_rounds_up() {
        let mut config = RunConfig::default();
        config.max_iters = 5;
        assert_eq!(config.fallback_threshold(), 4);
    }
}
