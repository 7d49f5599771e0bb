//! Code-Critic prompt (spec §4.4, §4.5): an advisory-only review of the
//! generated HTML against the plan's acceptance criteria. Never blocking,
//! so this prompt never embeds the "must be fixed" framing the
//! Plan-Critic's does.

use crate::plan::Plan;

pub fn build(plan: &Plan, html: &str) -> String {
    let plan_json = serde_json::to_string_pretty(plan).unwrap_or_default();
    format!(
        "Review this generated app against its plan. This review is advisory only; it will \
         not block the run, but its issues will be handed to the next attempt if there is \
         one.\n\nPlan:\n{plan_json}\n\nGenerated HTML:\n{html}\n\n\
         Respond with a single JSON object:\n\
         {{\n  \"approved\": boolean,\n  \"issues\": [{{\"message\": string, \"blocking\": boolean}}]\n}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PageDescriptor;

    #[test]
    fn embeds_both_plan_and_html() {
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
        let prompt = build(&plan, "<html></html>");
        assert!(prompt.contains("Notes"));
        assert!(prompt.contains("<html></html>"));
        assert!(prompt.contains("advisory only"));
    }
}
