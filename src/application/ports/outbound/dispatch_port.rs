//! Dispatch ports - Capabilities injected into the retrying requester
//!
//! The requester and dispatcher never perform I/O on their own. The remote
//! call, the delay primitive and the progress observer are all supplied by
//! the caller so each piece can be exercised with fakes.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::value_objects::{ItemOutcome, ItemState};

/// A single-item remote call
///
/// Every `Err` is treated as a transient failure and retried.
#[async_trait]
pub trait ItemOperation: Send + Sync {
    type Error: std::fmt::Display + Send;

    async fn apply(&self, item: &str) -> Result<(), Self::Error>;
}

/// Delay-by-duration capability
#[async_trait]
pub trait ClockPort: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Progress notifications emitted while dispatching
///
/// All methods default to no-ops so implementors only override what they
/// care about.
pub trait DispatchObserver: Send + Sync {
    /// A batch is about to start. `batch` is 1-based.
    fn batch_started(&self, _batch: usize, _total_batches: usize, _items: &[String]) {}

    /// An item moved to a new state
    fn item_transition(&self, _item: &str, _state: &ItemState, _last_error: Option<&str>) {}

    /// Every item of a batch reached a terminal outcome
    fn batch_settled(&self, _batch: usize, _outcomes: &[ItemOutcome]) {}

    /// All batches are done
    fn dispatch_finished(&self, _outcomes: &[ItemOutcome]) {}
}
