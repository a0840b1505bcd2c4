//! Odin client - Content fragment reads and localisation requests

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::outbound::{
    LocalisationError, LocalisationPayload, LocalisationPort, ProjectRecord, ProjectSourceError,
    ProjectSourcePort,
};
use crate::domain::value_objects::ProjectId;

/// Client for the Odin author instance
#[derive(Debug, Clone)]
pub struct OdinClient {
    client: Client,
    base_url: String,
}

impl OdinClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fragment_url(&self, project_id: &ProjectId) -> String {
        format!("{}/adobe/sites/cf/fragments/{}", self.base_url, project_id)
    }
}

#[async_trait]
impl ProjectSourcePort for OdinClient {
    async fn get_project(
        &self,
        project_id: &ProjectId,
        token: &str,
    ) -> Result<ProjectRecord, ProjectSourceError> {
        let url = self.fragment_url(project_id);
        tracing::info!("Fetching translation project from {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ProjectSourceError::Fetch(e.to_string()))?;

        let status = response.status();
        tracing::info!("response.status: {}", status);
        if !status.is_success() {
            return Err(ProjectSourceError::Fetch(status.to_string()));
        }

        response
            .json::<ProjectRecord>()
            .await
            .map_err(|e| ProjectSourceError::Fetch(e.to_string()))
    }
}

#[async_trait]
impl LocalisationPort for OdinClient {
    async fn send_to_localisation(
        &self,
        item: &str,
        payload: &LocalisationPayload,
        token: &str,
    ) -> Result<(), LocalisationError> {
        let response = self
            .client
            .post(format!("{}/bin/sendToLocalisationAsync", self.base_url))
            .query(&[("path", item)])
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(|e| LocalisationError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::info!("loc response.status for {}: {}", item, status);
        if !status.is_success() {
            return Err(LocalisationError::Status(status.to_string()));
        }
        Ok(())
    }
}
