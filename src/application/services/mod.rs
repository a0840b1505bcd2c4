//! Application services - Use case implementations
//!
//! The dispatch core is split leaf-first: the retrying requester drives one
//! item, the batch dispatcher fans items out batch by batch, and the outcome
//! aggregator folds the results. The translation project service wires them
//! to the outbound ports.

pub mod batch_dispatcher;
pub mod dispatch_observer;
pub mod outcome_aggregator;
pub mod retrying_requester;
pub mod translation_project_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch_dispatcher::BatchDispatcher;
pub use dispatch_observer::TracingObserver;
pub use retrying_requester::RetryingRequester;
pub use translation_project_service::{
    StartProjectCommand, TranslationProjectError, TranslationProjectService,
};
