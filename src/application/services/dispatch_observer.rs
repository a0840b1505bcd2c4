//! Tracing-backed dispatch observer

use crate::application::ports::outbound::DispatchObserver;
use crate::domain::value_objects::{ItemOutcome, ItemState};

/// Logs dispatch progress through `tracing`
#[derive(Debug, Clone)]
pub struct TracingObserver {
    max_retries: u32,
}

impl TracingObserver {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }
}

impl DispatchObserver for TracingObserver {
    fn batch_started(&self, batch: usize, total_batches: usize, items: &[String]) {
        tracing::info!(
            "Processing batch {} of {} ({} items)",
            batch,
            total_batches,
            items.len()
        );
    }

    fn item_transition(&self, item: &str, state: &ItemState, last_error: Option<&str>) {
        let error = last_error.unwrap_or("unknown error");
        match state {
            ItemState::Pending => {}
            ItemState::Attempting { attempt } => {
                tracing::info!(
                    "Sending loc request for fragment {} (attempt {}/{})",
                    item,
                    attempt,
                    self.max_retries
                );
            }
            ItemState::Retrying { attempt, delay } => {
                tracing::warn!(
                    "Request failed for fragment {} (attempt {}/{}): {}",
                    item,
                    attempt,
                    self.max_retries,
                    error
                );
                tracing::info!("Waiting {}ms before retry...", delay.as_millis());
            }
            ItemState::Succeeded { attempts } => {
                tracing::debug!("Loc request for {} accepted after {} attempt(s)", item, attempts);
            }
            ItemState::Exhausted { attempts } => {
                tracing::error!(
                    "Failed to send loc request for fragment {} after {} attempts: {}",
                    item,
                    attempts,
                    error
                );
            }
        }
    }

    fn batch_settled(&self, batch: usize, outcomes: &[ItemOutcome]) {
        let failed = outcomes.iter().filter(|o| !o.success).count();
        tracing::debug!(
            "Batch {} settled: {} succeeded, {} failed",
            batch,
            outcomes.len() - failed,
            failed
        );
    }
}
