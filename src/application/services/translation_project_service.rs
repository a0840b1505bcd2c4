//! Translation Project Service - Starts localisation of a translation project
//!
//! Authorizes the caller, reads the project fragment, then fans out one
//! localisation request per item through the [`BatchDispatcher`]. Any item
//! still failing after its retries fails the whole invocation, even though
//! the other items were sent.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::outbound::{
    ClockPort, DispatchObserver, IdentityError, IdentityPort, LocalisationPayload,
    LocalisationPort, LocaliseItem, ProjectSourceError, ProjectSourcePort,
};
use crate::application::services::outcome_aggregator::{aggregate, failure_summary};
use crate::application::services::{BatchDispatcher, TracingObserver};
use crate::domain::value_objects::{
    DispatchConfig, DispatchConfigError, DispatchResult, PreconditionError, ProjectId,
};

#[derive(Debug, thiserror::Error)]
pub enum TranslationProjectError {
    #[error("Invalid request: {0}")]
    InvalidConfig(#[from] DispatchConfigError),
    #[error("Forbidden: Invalid client ID")]
    Unauthorized,
    #[error("Translation project is incomplete (missing items or locales)")]
    Incomplete(#[source] PreconditionError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Source(#[from] ProjectSourceError),
    #[error("Failed to start translation project: {summary}")]
    Dispatch {
        summary: String,
        result: DispatchResult,
    },
}

/// Validated input of one project-start invocation
#[derive(Debug, Clone)]
pub struct StartProjectCommand {
    pub project_id: ProjectId,
    pub token: String,
    pub batch_size: Option<usize>,
}

pub struct TranslationProjectService {
    identity: Arc<dyn IdentityPort>,
    source: Arc<dyn ProjectSourcePort>,
    localisation: Arc<dyn LocalisationPort>,
    clock: Arc<dyn ClockPort>,
    observer: Arc<dyn DispatchObserver>,
    dispatch_config: DispatchConfig,
    allowed_client_id: String,
}

impl TranslationProjectService {
    pub fn new(
        identity: Arc<dyn IdentityPort>,
        source: Arc<dyn ProjectSourcePort>,
        localisation: Arc<dyn LocalisationPort>,
        clock: Arc<dyn ClockPort>,
        dispatch_config: DispatchConfig,
        allowed_client_id: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            source,
            localisation,
            clock,
            observer: Arc::new(TracingObserver::new(dispatch_config.max_retries())),
            dispatch_config,
            allowed_client_id: allowed_client_id.into(),
        }
    }

    /// Start the project; `Ok` only when every item was accepted
    pub async fn start(
        &self,
        command: StartProjectCommand,
        cancel: CancellationToken,
    ) -> Result<DispatchResult, TranslationProjectError> {
        let config = match command.batch_size {
            Some(batch_size) => self.dispatch_config.with_batch_size(batch_size)?,
            None => self.dispatch_config,
        };

        tracing::info!(
            "Validating IMS token for client ID: {}",
            self.allowed_client_id
        );
        if !self
            .identity
            .is_authorized(&command.token, &self.allowed_client_id)
            .await?
        {
            tracing::error!("IMS token validation failed for project {}", command.project_id);
            return Err(TranslationProjectError::Unauthorized);
        }

        let project = self
            .source
            .get_project(&command.project_id, &command.token)
            .await
            .inspect_err(|e| tracing::error!("Error fetching translation project: {}", e))?;

        let request = project.translation_request().map_err(|e| {
            tracing::warn!("{}", e);
            TranslationProjectError::Incomplete(e)
        })?;

        tracing::info!(
            "Starting translation project {} with {} item(s) for locales {:?}",
            command.project_id,
            request.items().len(),
            request.locales()
        );

        let operation = LocaliseItem::new(
            self.localisation.as_ref(),
            LocalisationPayload::machine_translation(request.locales().to_vec()),
            &command.token,
        );
        let dispatcher = BatchDispatcher::new(config, self.clock.clone(), self.observer.clone())
            .with_cancellation(cancel);

        let result = aggregate(dispatcher.dispatch(request.items(), &operation).await);

        if let Some(summary) = failure_summary(&result) {
            tracing::error!("{}", summary);
            return Err(TranslationProjectError::Dispatch { summary, result });
        }

        tracing::info!("Successfully sent {} loc requests", result.outcomes.len());
        Ok(result)
    }
}
