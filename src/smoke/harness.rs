//! Smoke harness orchestration (spec §4.6): load the document, confirm
//! every planned selector resolves, run a click pass over each, and
//! classify whatever the console produced along the way.

use super::browser::{BrowserDriver, Interaction};
use super::selectors::candidates_for_plan;
use super::structured_error::{ErrorClass, StructuredError};
use super::SmokeResult;

/// Run the full smoke pass: load `html`, resolve a selector for each
/// `ui_components` entry, click each resolved element, and collect
/// whatever failures accumulate.
pub async fn run(
    driver: &mut dyn BrowserDriver,
    html: &str,
    ui_components: &[String],
) -> SmokeResult {
    let mut failures = Vec::new();

    if let Err(err) = driver.load(html).await {
        failures.push(StructuredError {
            class: ErrorClass::ConsoleError,
            selector: None,
            message: format!("page failed to load: {err}"),
        });
        return SmokeResult { failures, interacted: 0 };
    }

    let mut interacted = 0;
    for (component, candidates) in candidates_for_plan(ui_components) {
        match resolve(driver, &candidates).await {
            Some(selector) => {
                if let Err(err) = driver.interact(&selector, Interaction::Click).await {
                    failures.push(StructuredError {
                        class: ErrorClass::InteractionFailure,
                        selector: Some(selector),
                        message: err,
                    });
                } else {
                    interacted += 1;
                }
            }
            None => {
                failures.push(StructuredError {
                    class: ErrorClass::MissingSelector,
                    selector: candidates.first().cloned(),
                    message: format!("no selector found for ui_component `{component}`"),
                });
            }
        }
    }

    failures.extend(driver.drain_console().await);

    SmokeResult { failures, interacted }
}

async fn resolve(driver: &mut dyn BrowserDriver, candidates: &[String]) -> Option<String> {
    for candidate in candidates {
        if driver.exists(candidate).await.unwrap_or(false) {
            return Some(candidate.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;

    struct FakeDriver {
        existing: HashSet<String>,
        console: Vec<StructuredError>,
        fail_interact: HashSet<String>,
    }

    #[async_trait]
    impl BrowserDriver for FakeDriver {
        async fn load(&mut self, _html: &str) -> Result<(), String> {
            Ok(())
        }

        async fn exists(&mut self, selector: &str) -> Result<bool, String> {
            Ok(self.existing.contains(selector))
        }

        async fn interact(&mut self, selector: &str, _interaction: Interaction) -> Result<(), String> {
            if self.fail_interact.contains(selector) {
                Err("click handler threw".to_string())
            } else {
                Ok(())
            }
        }

        async fn drain_console(&mut self) -> Vec<StructuredError> {
            std::mem::take(&mut self.console)
        }
    }

    #[tokio::test]
    async fn all_selectors_found_and_clicked_is_clean() {
        let mut driver = FakeDriver {
            existing: ["#add-item-button".to_string()].into_iter().collect(),
            console: Vec::new(),
            fail_interact: HashSet::new(),
        };
        let result = run(&mut driver, "<html></html>", &["Add Item Button".to_string()]).await;
        assert!(result.is_clean());
        assert_eq!(result.interacted, 1);
    }

    #[tokio::test]
    async fn missing_selector_is_reported() {
        let mut driver = FakeDriver {
            existing: HashSet::new(),
            console: Vec::new(),
            fail_interact: HashSet::new(),
        };
        let result = run(&mut driver, "<html></html>", &["Add Item Button".to_string()]).await;
        assert!(!result.is_clean());
        assert_eq!(result.failures[0].class, ErrorClass::MissingSelector);
    }

    #[tokio::test]
    async fn interaction_failure_is_reported() {
        let mut driver = FakeDriver {
            existing: ["#submit".to_string()].into_iter().collect(),
            console: Vec::new(),
            fail_interact: ["#submit".to_string()].into_iter().collect(),
        };
        let result = run(&mut driver, "<html></html>", &["Submit".to_string()]).await;
        assert_eq!(result.failures[0].class, ErrorClass::InteractionFailure);
    }

    #[tokio::test]
    async fn console_warnings_do_not_make_the_result_unclean() {
        let mut driver = FakeDriver {
            existing: HashSet::new(),
            console: vec![StructuredError {
                class: ErrorClass::ConsoleWarning,
                selector: None,
                message: "deprecated API".to_string(),
            }],
            fail_interact: HashSet::new(),
        };
        let result = run(&mut driver, "<html></html>", &[]).await;
        assert!(result.is_clean());
    }
}
