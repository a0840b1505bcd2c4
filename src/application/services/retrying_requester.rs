//! Retrying Requester - Bounded retry with exponential backoff for one item
//!
//! The requester drives a single item through
//! `Pending -> Attempting -> (Retrying -> Attempting)* -> Succeeded | Exhausted`.
//! Every error reported by the operation is treated as transient; there is no
//! error-type discrimination. Batching is the dispatcher's concern.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::outbound::{ClockPort, DispatchObserver, ItemOperation};
use crate::domain::value_objects::{DispatchConfig, ItemOutcome, ItemState, CANCELLED_ERROR};

pub struct RetryingRequester {
    config: DispatchConfig,
    clock: Arc<dyn ClockPort>,
    observer: Arc<dyn DispatchObserver>,
    cancel: CancellationToken,
}

impl RetryingRequester {
    pub fn new(
        config: DispatchConfig,
        clock: Arc<dyn ClockPort>,
        observer: Arc<dyn DispatchObserver>,
    ) -> Self {
        Self {
            config,
            clock,
            observer,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop retrying once `cancel` fires
    ///
    /// The token is checked before every remote call and raced against every
    /// backoff sleep.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Run `operation` for `item` until it succeeds or retries are exhausted
    pub async fn attempt<O>(&self, item: &str, operation: &O) -> ItemOutcome
    where
        O: ItemOperation + ?Sized,
    {
        let attempts = AtomicU32::new(0);
        self.attempt_counted(item, operation, &attempts).await
    }

    /// Same as [`attempt`](Self::attempt), publishing the attempt counter
    /// so a caller can still report it if the run is torn down early.
    pub(crate) async fn attempt_counted<O>(
        &self,
        item: &str,
        operation: &O,
        attempts: &AtomicU32,
    ) -> ItemOutcome
    where
        O: ItemOperation + ?Sized,
    {
        let max_retries = self.config.max_retries();
        self.observer.item_transition(item, &ItemState::Pending, None);

        let mut attempt: u32 = 1;
        loop {
            if self.cancel.is_cancelled() {
                return self.cancelled(item, attempt - 1);
            }

            attempts.store(attempt, Ordering::Relaxed);
            self.observer
                .item_transition(item, &ItemState::Attempting { attempt }, None);

            let error = match operation.apply(item).await {
                Ok(()) => {
                    self.observer
                        .item_transition(item, &ItemState::Succeeded { attempts: attempt }, None);
                    return ItemOutcome::succeeded(item, attempt);
                }
                Err(e) => e.to_string(),
            };

            if attempt >= max_retries {
                self.observer.item_transition(
                    item,
                    &ItemState::Exhausted { attempts: attempt },
                    Some(&error),
                );
                return ItemOutcome::exhausted(item, attempt, error);
            }

            let delay = self.config.backoff_for(attempt);
            self.observer
                .item_transition(item, &ItemState::Retrying { attempt, delay }, Some(&error));

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    return self.cancelled(item, attempt);
                }
                _ = self.clock.sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    fn cancelled(&self, item: &str, attempts: u32) -> ItemOutcome {
        self.observer.item_transition(
            item,
            &ItemState::Exhausted { attempts },
            Some(CANCELLED_ERROR),
        );
        ItemOutcome::cancelled(item, attempts)
    }
}
