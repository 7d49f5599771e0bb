//! Planner prompt (spec §4.4): turns the caller's natural-language request
//! into the structured-JSON-plan ask, embedding any failure memory from a
//! prior rejected plan.

use crate::failure_memory::FailureMemory;

use super::render_failure_memory;

pub fn build(request_prompt: &str, memory: &FailureMemory) -> String {
    let mut out = String::new();
    out.push_str(
        "You are planning a single-page web app that will be built as one self-contained \
         HTML file with inline CSS and JavaScript, with no network access and no external \
         dependencies.\n\n",
    );
    out.push_str("Request:\n");
    out.push_str(request_prompt);
    out.push_str(
        "\n\nRespond with a single JSON object with this shape:\n\
         {\n  \"title\": string,\n  \"pages\": [{\"name\": string, \"description\": string}],\n  \
         \"ui_components\": [string, ...],\n  \"interactions\": [string, ...],\n  \
         \"acceptance_criteria\": [string, ...]\n}\n\n\
         `ui_components` must list every distinct interactive element the app will render \
         (e.g. \"add-item-button\", \"item-list\", \"filter-input\") — the smoke test will \
         derive CSS selectors directly from these names.",
    );

    let memory_section = render_failure_memory(memory);
    if !memory_section.is_empty() {
        out.push_str("\n\n");
        out.push_str(&memory_section);
        out.push_str("\n\nRevise the plan to avoid repeating these issues.");
    }

    out
}
