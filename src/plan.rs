//! The `Plan` data model (spec §3).
//!
//! Modeled as a tagged open record: a fixed set of required/known fields
//! plus an `extra` bag of arbitrary JSON for anything the Planner emitted
//! that this crate doesn't have a named field for. Unknown fields are
//! preserved verbatim and passed through to the Coder prompt untouched —
//! the orchestrator must never silently drop part of what the Planner
//! produced just because this crate doesn't model it yet.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single page descriptor within a `Plan`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Structured description of the app to build (spec §3).
///
/// Required fields are validated by [`Plan::validate`]; optional fields are
/// `None`/empty when the Planner omitted them. `extra` carries any JSON
/// object keys present in the Planner's response that aren't named fields
/// here, so a richer Planner response is never truncated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub title: String,
    pub pages: Vec<PageDescriptor>,
    pub ui_components: Vec<String>,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<Value>,
    #[serde(default)]
    pub interactions: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
    #[serde(default)]
    pub libraries: Vec<String>,
    #[serde(default)]
    pub data_bindings: Vec<String>,
    #[serde(default)]
    pub recommended_models: Vec<String>,

    /// Any JSON object keys from the Planner's response not named above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Reasons a `Plan` fails validation (spec §3: required fields are
/// `title` non-empty, `pages` non-empty, `ui_components` non-empty).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanValidationError {
    EmptyTitle,
    EmptyPages,
    EmptyUiComponents,
}

impl std::fmt::Display for PlanValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanValidationError::EmptyTitle => write!(f, "plan.title must be non-empty"),
            PlanValidationError::EmptyPages => write!(f, "plan.pages must be non-empty"),
            PlanValidationError::EmptyUiComponents => {
                write!(f, "plan.ui_components must be non-empty")
            }
        }
    }
}

impl std::error::Error for PlanValidationError {}

impl Plan {
    /// Validate the required-field subset. Unknown/optional fields are
    /// never validated — silence in the Planner's output for an optional
    /// field is not an error.
    pub fn validate(&self) -> Result<(), PlanValidationError> {
        if self.title.trim().is_empty() {
            return Err(PlanValidationError::EmptyTitle);
        }
        if self.pages.is_empty() {
            return Err(PlanValidationError::EmptyPages);
        }
        if self.ui_components.is_empty() {
            return Err(PlanValidationError::EmptyUiComponents);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_plan() -> Plan {
        Plan {
            title: "Inventory Tracker".to_string(),
            pages: vec![PageDescriptor {
                name: "Home".to_string(),
                description: None,
            }],
            ui_components: vec!["table".to_string(), "form".to_string(), "button".to_string()],
            description: None,
            state: None,
            interactions: Vec::new(),
            acceptance_criteria: Vec::new(),
            libraries: Vec::new(),
            data_bindings: Vec::new(),
            recommended_models: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn valid_plan_passes() {
        assert!(minimal_plan().validate().is_ok());
    }

    #[test]
    fn empty_title_rejected() {
        let mut plan = minimal_plan();
        plan.title = "   ".to_string();
        assert_eq!(plan.validate(), Err(PlanValidationError::EmptyTitle));
    }

    #[test]
    fn empty_pages_rejected() {
        let mut plan = minimal_plan();
        plan.pages.clear();
        assert_eq!(plan.validate(), Err(PlanValidationError::EmptyPages));
    }

    #[test]
    fn empty_ui_components_rejected() {
        let mut plan = minimal_plan();
        plan.ui_components.clear();
        assert_eq!(plan.validate(), Err(PlanValidationError::EmptyUiComponents));
    }

    #[test]
    fn unknown_fields_round_trip_through_extra() {
        let json = serde_json::json!({
            "title": "Widget",
            "pages": [{"name": "Home"}],
            "ui_components": ["button"],
            "theme": "dark",
            "targetAudience": "internal ops"
        });
        let plan: Plan = serde_json::from_value(json).unwrap();
        assert_eq!(plan.extra.get("theme").unwrap(), "dark");
        assert_eq!(plan.extra.get("targetAudience").unwrap(), "internal ops");
    }
}
