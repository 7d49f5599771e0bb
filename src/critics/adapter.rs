//! Shared critic invocation: call the model, parse its JSON verdict, retry
//! once on a parse failure, and fall back to an "unavailable" (non-blocking)
//! verdict if both attempts fail (spec §4.5).

use crate::model::{ModelAdapter, ModelRole};
use crate::normalizer::extract_json;

use super::{CritiqueIssue, CritiqueResult};

#[derive(serde::Deserialize)]
struct RawVerdict {
    approved: bool,
    #[serde(default)]
    issues: Vec<RawIssue>,
}

#[derive(serde::Deserialize)]
struct RawIssue {
    message: String,
    #[serde(default)]
    blocking: bool,
}

/// Invoke a critic prompt against `adapter`, parsing the response as a
/// `{approved, issues}` verdict. On a malformed first response, reissues
/// the same prompt once before giving up and returning
/// [`CritiqueResult::unavailable`].
pub async fn run_critic(
    adapter: &dyn ModelAdapter,
    model: &str,
    prompt: &str,
) -> CritiqueResult {
    for _ in 0..2 {
        let Ok(raw_text) = adapter.complete(ModelRole::Critic, model, prompt).await else {
            continue;
        };
        let Some(json_text) = extract_json(&raw_text) else {
            continue;
        };
        if let Ok(verdict) = serde_json::from_str::<RawVerdict>(&json_text) {
            return CritiqueResult {
                approved: verdict.approved,
                issues: verdict
                    .issues
                    .into_iter()
                    .map(|i| CritiqueIssue { message: i.message, blocking: i.blocking })
                    .collect(),
                unavailable: false,
            };
        }
    }
    CritiqueResult::unavailable()
}
