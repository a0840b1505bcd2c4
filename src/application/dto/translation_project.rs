//! Translation project DTOs - Bodies of the project-start endpoint

use serde::{Deserialize, Serialize};

/// Body of `POST /api/translation/project-start`
///
/// Fields are optional so a missing `projectId` can be reported with a
/// precise message instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartProjectRequest {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub batch_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartProjectResponse {
    pub message: String,
}

impl StartProjectResponse {
    pub fn started() -> Self {
        Self {
            message: "Translation project started".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
