//! Outcome aggregation - Reduces per-item outcomes to one dispatch result

use crate::domain::value_objects::{DispatchResult, ItemOutcome};

/// Fold outcomes into a [`DispatchResult`], keeping their order
pub fn aggregate(outcomes: Vec<ItemOutcome>) -> DispatchResult {
    let all_succeeded = outcomes.iter().all(|o| o.success);
    DispatchResult {
        outcomes,
        all_succeeded,
    }
}

/// Human-readable list of failed items with their last error
///
/// `None` when every item succeeded.
pub fn failure_summary(result: &DispatchResult) -> Option<String> {
    if result.all_succeeded {
        return None;
    }

    let failures: Vec<String> = result
        .failures()
        .map(|o| {
            format!(
                "{} ({})",
                o.item,
                o.last_error.as_deref().unwrap_or("unknown error")
            )
        })
        .collect();

    Some(format!(
        "{} request(s) failed after retries: {}",
        failures.len(),
        failures.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outcomes_succeed() {
        let result = aggregate(Vec::new());
        assert!(result.all_succeeded);
        assert!(result.outcomes.is_empty());
        assert_eq!(failure_summary(&result), None);
    }

    #[test]
    fn test_single_failure_fails_the_dispatch() {
        let result = aggregate(vec![
            ItemOutcome::succeeded("/a", 1),
            ItemOutcome::exhausted("/b", 3, "500 Internal Server Error"),
            ItemOutcome::succeeded("/c", 2),
        ]);

        assert!(!result.all_succeeded);
        assert_eq!(result.failures().count(), 1);
        assert_eq!(result.failures().next().unwrap().item, "/b");
        assert_eq!(result.outcomes[2].item, "/c");
    }

    #[test]
    fn test_summary_names_each_failed_item_and_cause() {
        let result = aggregate(vec![
            ItemOutcome::exhausted("/a", 3, "503 Service Unavailable"),
            ItemOutcome::succeeded("/b", 1),
            ItemOutcome::exhausted("/c", 3, "error sending request"),
        ]);

        assert_eq!(
            failure_summary(&result).unwrap(),
            "2 request(s) failed after retries: /a (503 Service Unavailable), /c (error sending request)"
        );
    }
}
