//! Plan-Critic prompt (spec §4.4, §4.5): a blocking review of a proposed
//! `Plan` against feasibility as a single-file offline app.

use crate::plan::Plan;

pub fn build(plan: &Plan) -> String {
    let plan_json = serde_json::to_string_pretty(plan).unwrap_or_default();
    format!(
        "Review this plan for a single-page app that must be built as one self-contained \
         HTML file with no network access:\n\n{plan_json}\n\n\
         Check specifically whether the plan is achievable within those constraints — e.g. \
         reject plans that require a backend, real-time multi-user sync, or external APIs with \
         no offline fallback.\n\n\
         Respond with a single JSON object:\n\
         {{\n  \"approved\": boolean,\n  \"issues\": [{{\"message\": string, \"blocking\": boolean}}]\n}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PageDescriptor;

    #[test]
    fn embeds_plan_json() {
        let plan = Plan {
            title: "Notes".to_string(),
            pages: vec![PageDescriptor { name: "Home".to_string(), description: None }],
            ui_components: vec!["note-list".to_string()],
            description: None,
            state: None,
            interactions: Vec::new(),
            acceptance_criteria: Vec::new(),
            libraries: Vec::new(),
            data_bindings: Vec::new(),
            recommended_models: Vec::new(),
            extra: serde_json::Map::new(),
        };
        let prompt = build(&plan);
        assert!(prompt.contains("Notes"));
        assert!(prompt.contains("note-list"));
    }
}
