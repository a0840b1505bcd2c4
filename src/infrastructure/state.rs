//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::application::services::TranslationProjectService;
use crate::infrastructure::clock::TokioClock;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::ims::ImsClient;
use crate::infrastructure::odin::OdinClient;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub translation_project_service: TranslationProjectService,
    /// Cancelled on shutdown; every dispatch runs with a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);

        // Odin serves both the project fragment and the localisation endpoint
        let odin = Arc::new(OdinClient::new(&config.odin_endpoint, timeout)?);
        let ims = Arc::new(ImsClient::new(&config.ims_endpoint, timeout)?);

        let translation_project_service = TranslationProjectService::new(
            ims,
            odin.clone(),
            odin,
            Arc::new(TokioClock),
            config.dispatch_config()?,
            config.allowed_client_id.clone(),
        );

        Ok(Self {
            config,
            translation_project_service,
            shutdown: CancellationToken::new(),
        })
    }
}
