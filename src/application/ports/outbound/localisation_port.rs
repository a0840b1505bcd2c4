//! Localisation port - Interface for triggering localisation of one content item

use async_trait::async_trait;
use serde::Serialize;

use super::ItemOperation;

#[derive(Debug, thiserror::Error)]
pub enum LocalisationError {
    /// The service answered with a non-2xx status, e.g. "503 Service Unavailable"
    #[error("{0}")]
    Status(String),
    #[error("{0}")]
    Transport(String),
}

/// JSON body sent with every localisation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalisationPayload {
    pub target_locales: Vec<String>,
    pub machine_translation: bool,
}

impl LocalisationPayload {
    pub fn machine_translation(target_locales: Vec<String>) -> Self {
        Self {
            target_locales,
            machine_translation: true,
        }
    }
}

#[async_trait]
pub trait LocalisationPort: Send + Sync {
    /// Ask the content service to localise `item` into the payload's locales
    async fn send_to_localisation(
        &self,
        item: &str,
        payload: &LocalisationPayload,
        token: &str,
    ) -> Result<(), LocalisationError>;
}

/// Binds a localisation port to a payload and caller token so it can be
/// dispatched per item
pub struct LocaliseItem<'a, P: LocalisationPort + ?Sized> {
    port: &'a P,
    payload: LocalisationPayload,
    token: &'a str,
}

impl<'a, P: LocalisationPort + ?Sized> LocaliseItem<'a, P> {
    pub fn new(port: &'a P, payload: LocalisationPayload, token: &'a str) -> Self {
        Self {
            port,
            payload,
            token,
        }
    }
}

#[async_trait]
impl<'a, P: LocalisationPort + ?Sized> ItemOperation for LocaliseItem<'a, P> {
    type Error = LocalisationError;

    async fn apply(&self, item: &str) -> Result<(), Self::Error> {
        self.port
            .send_to_localisation(item, &self.payload, self.token)
            .await
    }
}
