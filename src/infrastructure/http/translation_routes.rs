//! Translation project routes

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::application::dto::{ErrorResponse, StartProjectRequest, StartProjectResponse};
use crate::application::services::{StartProjectCommand, TranslationProjectError};
use crate::domain::value_objects::ProjectId;
use crate::infrastructure::state::AppState;

/// Start localisation of every item of a translation project
pub async fn start_project(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let invocation_id = Uuid::new_v4();
    let span = tracing::info_span!("project_start", %invocation_id);

    async move {
        tracing::info!("Calling the project start action");

        let body = match parse_body(&body) {
            Ok(body) => body,
            Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
        };

        let command = match validate(&headers, body) {
            Ok(command) => command,
            Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
        };

        let cancel = state.shutdown.child_token();
        match state
            .translation_project_service
            .start(command, cancel)
            .await
        {
            Ok(_) => (StatusCode::OK, Json(StartProjectResponse::started())).into_response(),
            Err(e) => {
                let status = status_for(&e);
                let message = match &e {
                    TranslationProjectError::Identity(_) | TranslationProjectError::Source(_) => {
                        format!("Internal server error - {}", e)
                    }
                    _ => e.to_string(),
                };
                error_response(status, message)
            }
        }
    }
    .instrument(span)
    .await
}

/// An absent body is an empty request so missing fields are named by `validate`
fn parse_body(body: &[u8]) -> Result<StartProjectRequest, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StartProjectRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| format!("Invalid request body: {}", e))
}

/// Bearer token and project id, or the list of what is missing
fn validate(headers: &HeaderMap, body: StartProjectRequest) -> Result<StartProjectCommand, String> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);
    let project_id = body.project_id.as_deref().and_then(ProjectId::parse);

    let mut missing = Vec::new();
    if token.is_none() {
        missing.push("missing header(s) 'authorization'");
    }
    if project_id.is_none() {
        missing.push("missing parameter(s) 'projectId'");
    }

    match (token, project_id) {
        (Some(token), Some(project_id)) => Ok(StartProjectCommand {
            project_id,
            token,
            batch_size: body.batch_size,
        }),
        _ => Err(missing.join(" and ")),
    }
}

fn bearer_token(value: &str) -> Option<String> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

fn status_for(error: &TranslationProjectError) -> StatusCode {
    match error {
        TranslationProjectError::InvalidConfig(_) | TranslationProjectError::Incomplete(_) => {
            StatusCode::BAD_REQUEST
        }
        TranslationProjectError::Unauthorized => StatusCode::FORBIDDEN,
        TranslationProjectError::Identity(_)
        | TranslationProjectError::Source(_)
        | TranslationProjectError::Dispatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    tracing::error!("{} - {}", status.as_u16(), message);
    (status, Json(ErrorResponse::new(message))).into_response()
}
