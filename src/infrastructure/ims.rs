//! IMS client - Access token validation against an allow-listed client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::outbound::{IdentityError, IdentityPort};

/// Client for the IMS token validation endpoint
#[derive(Debug, Clone)]
pub struct ImsClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ValidationResponse {
    valid: bool,
    #[serde(default)]
    token: Option<ValidatedToken>,
}

#[derive(Debug, Deserialize)]
struct ValidatedToken {
    client_id: Option<String>,
}

impl ImsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl IdentityPort for ImsClient {
    async fn is_authorized(&self, token: &str, allowed_client_id: &str) -> Result<bool, IdentityError> {
        let response = self
            .client
            .get(format!("{}/ims/validate_token/v1", self.base_url))
            .query(&[("client_id", allowed_client_id), ("type", "access_token")])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| IdentityError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(IdentityError::Unreachable(status.to_string()));
        }
        if !status.is_success() {
            tracing::warn!("IMS rejected token validation request: {}", status);
            return Ok(false);
        }

        let validation: ValidationResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::InvalidResponse(e.to_string()))?;

        let client_id = validation.token.and_then(|t| t.client_id);
        if !validation.valid || client_id.as_deref() != Some(allowed_client_id) {
            tracing::error!(
                "IMS token validation failed: valid={}, client_id={:?}",
                validation.valid,
                client_id
            );
            return Ok(false);
        }

        Ok(true)
    }
}
