//! Identity port - Validates caller tokens against an allow-listed client

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Identity service unreachable: {0}")]
    Unreachable(String),
    #[error("Unexpected identity service response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// `Ok(false)` means the token is invalid or belongs to another client
    async fn is_authorized(&self, token: &str, allowed_client_id: &str) -> Result<bool, IdentityError>;
}
