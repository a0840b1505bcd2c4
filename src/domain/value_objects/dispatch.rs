//! Dispatch value objects - configuration, per-item state and outcomes

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_BACKOFF_MS: u64 = 1000;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchConfigError {
    #[error("batchSize must be at least 1")]
    BatchSize,
    #[error("maxRetries must be at least 1")]
    MaxRetries,
    #[error("baseBackoffMs must be greater than 0")]
    BaseBackoff,
    #[error("maxBackoffMs ({max}) must not be lower than baseBackoffMs ({base})")]
    MaxBackoff { base: u64, max: u64 },
}

/// Batching and retry parameters for one dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    batch_size: usize,
    max_retries: u32,
    base_backoff_ms: u64,
    max_backoff_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff_ms: DEFAULT_BASE_BACKOFF_MS,
            max_backoff_ms: DEFAULT_MAX_BACKOFF_MS,
        }
    }
}

impl DispatchConfig {
    pub fn new(
        batch_size: usize,
        max_retries: u32,
        base_backoff_ms: u64,
        max_backoff_ms: u64,
    ) -> Result<Self, DispatchConfigError> {
        if batch_size < 1 {
            return Err(DispatchConfigError::BatchSize);
        }
        if max_retries < 1 {
            return Err(DispatchConfigError::MaxRetries);
        }
        if base_backoff_ms == 0 {
            return Err(DispatchConfigError::BaseBackoff);
        }
        if max_backoff_ms < base_backoff_ms {
            return Err(DispatchConfigError::MaxBackoff {
                base: base_backoff_ms,
                max: max_backoff_ms,
            });
        }

        Ok(Self {
            batch_size,
            max_retries,
            base_backoff_ms,
            max_backoff_ms,
        })
    }

    /// Same config with a different batch size
    pub fn with_batch_size(self, batch_size: usize) -> Result<Self, DispatchConfigError> {
        Self::new(
            batch_size,
            self.max_retries,
            self.base_backoff_ms,
            self.max_backoff_ms,
        )
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay to wait after the given failed attempt (1-based)
    ///
    /// `min(base * 2^(attempt - 1), max)`; overflow saturates to the cap.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = 1u64.checked_shl(exponent).unwrap_or(u64::MAX);
        let delay_ms = self
            .base_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(delay_ms)
    }

    /// Number of batches needed for `item_count` items
    pub fn batch_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.batch_size)
    }
}

/// Lifecycle of a single item inside the retrying requester
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Pending,
    Attempting { attempt: u32 },
    Retrying { attempt: u32, delay: Duration },
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl ItemState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Exhausted { .. })
    }
}

/// Terminal record for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
    pub item: String,
    pub success: bool,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl ItemOutcome {
    pub fn succeeded(item: impl Into<String>, attempts: u32) -> Self {
        Self {
            item: item.into(),
            success: true,
            attempts,
            last_error: None,
        }
    }

    pub fn exhausted(item: impl Into<String>, attempts: u32, last_error: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            success: false,
            attempts,
            last_error: Some(last_error.into()),
        }
    }

    /// Outcome for an item stopped by cancellation; `attempts` may be zero
    pub fn cancelled(item: impl Into<String>, attempts: u32) -> Self {
        Self::exhausted(item, attempts, CANCELLED_ERROR)
    }
}

pub const CANCELLED_ERROR: &str = "dispatch cancelled";

/// Invocation-level result, outcomes in input item order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub outcomes: Vec<ItemOutcome>,
    pub all_succeeded: bool,
}

impl DispatchResult {
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }
}
