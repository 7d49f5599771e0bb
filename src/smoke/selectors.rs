//! Selector derivation (spec §4.6): turns a plan's `ui_components` names
//! into the set of CSS selectors the smoke harness will probe for, trying
//! the conventions a Coder prompt (see [`crate::prompts::coder`]) asks the
//! model to follow: id, then stable class, then `data-testid`.

/// The candidate selectors for one `ui_components` entry, tried in order
/// until one matches an element in the rendered DOM.
pub fn candidates_for(component_name: &str) -> Vec<String> {
    let slug = slugify(component_name);
    vec![
        format!("#{slug}"),
        format!(".{slug}"),
        format!("[data-testid=\"{slug}\"]"),
    ]
}

/// All candidate selector sets for a plan's full `ui_components` list.
pub fn candidates_for_plan(ui_components: &[String]) -> Vec<(String, Vec<String>)> {
    ui_components
        .iter()
        .map(|name| (name.clone(), candidates_for(name)))
        .collect()
}

fn slugify(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugifies_spaces_and_mixed_case() {
        assert_eq!(slugify("Add Item Button"), "add-item-button");
    }

    #[test]
    fn candidates_try_id_class_then_testid_in_order() {
        let candidates = candidates_for("Item List");
        assert_eq!(candidates[0], "#item-list");
        assert_eq!(candidates[1], ".item-list");
        assert_eq!(candidates[2], "[data-testid=\"item-list\"]");
    }
}
