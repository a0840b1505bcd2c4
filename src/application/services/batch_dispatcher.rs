//! Batch Dispatcher - Bounded-concurrency fan-out over an ordered item list
//!
//! Items are split into consecutive batches of `batch_size`. Batches run
//! strictly one after another; inside a batch every item is driven
//! concurrently through the [`RetryingRequester`], and the next batch starts
//! only once every item of the current one has a terminal outcome.
//!
//! The dispatcher always runs to completion: an exhausted item never cancels
//! its siblings nor skips later batches, so the caller gets one outcome per
//! item. Stopping early is only possible through the cancellation token.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use futures_util::future::join_all;
use futures_util::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::application::ports::outbound::{ClockPort, DispatchObserver, ItemOperation};
use crate::application::services::RetryingRequester;
use crate::domain::value_objects::{DispatchConfig, ItemOutcome, ItemState};

pub struct BatchDispatcher {
    requester: RetryingRequester,
    observer: Arc<dyn DispatchObserver>,
}

impl BatchDispatcher {
    pub fn new(
        config: DispatchConfig,
        clock: Arc<dyn ClockPort>,
        observer: Arc<dyn DispatchObserver>,
    ) -> Self {
        Self {
            requester: RetryingRequester::new(config, clock, observer.clone()),
            observer,
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.requester = self.requester.with_cancellation(cancel);
        self
    }

    /// Dispatch every item and return their outcomes in input order
    pub async fn dispatch<O>(&self, items: &[String], operation: &O) -> Vec<ItemOutcome>
    where
        O: ItemOperation + ?Sized,
    {
        let config = self.requester.config();
        let batch_size = config.batch_size();
        let total_batches = config.batch_count(items.len());
        let mut outcomes = Vec::with_capacity(items.len());

        for (index, batch) in items.chunks(batch_size).enumerate() {
            let batch_number = index + 1;
            self.observer.batch_started(batch_number, total_batches, batch);

            // join_all yields results in the order of the input futures,
            // whatever order the items settle in.
            let settled = join_all(batch.iter().map(|item| self.settle(item, operation))).await;

            self.observer.batch_settled(batch_number, &settled);
            outcomes.extend(settled);
        }

        self.observer.dispatch_finished(&outcomes);
        outcomes
    }

    /// Drive one item to a terminal outcome, turning a panic into a failure
    async fn settle<O>(&self, item: &str, operation: &O) -> ItemOutcome
    where
        O: ItemOperation + ?Sized,
    {
        let attempts = AtomicU32::new(0);
        let run = self.requester.attempt_counted(item, operation, &attempts);

        match AssertUnwindSafe(run).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => {
                let attempts = attempts.load(Ordering::Relaxed).max(1);
                let error = format!("unexpected failure: {}", panic_message(panic.as_ref()));
                tracing::error!("Loc request for {} aborted: {}", item, error);
                self.observer.item_transition(
                    item,
                    &ItemState::Exhausted { attempts },
                    Some(&error),
                );
                ItemOutcome::exhausted(item, attempts, error)
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic".to_string()
    }
}
