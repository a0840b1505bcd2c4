//! Value objects - Immutable objects defined by their attributes

mod dispatch;
mod ids;
mod translation;

pub use dispatch::{
    DispatchConfig, DispatchConfigError, DispatchResult, ItemOutcome, ItemState, CANCELLED_ERROR,
    DEFAULT_BASE_BACKOFF_MS, DEFAULT_BATCH_SIZE, DEFAULT_MAX_BACKOFF_MS, DEFAULT_MAX_RETRIES,
};
pub use ids::ProjectId;
pub use translation::{PreconditionError, TranslationRequest};
