//! Project persistence endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use web_builder_core::error::BuilderError;
use web_builder_core::project::ProjectFiles;

use crate::state::ServerState;

/// Body of `POST /api/save`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub project_name: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message.into() })),
    )
        .into_response()
}

fn success(message: &str) -> Response {
    Json(json!({ "success": true, "message": message })).into_response()
}

pub async fn save_handler(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SaveRequest>,
) -> Response {
    let files = ProjectFiles {
        html: req.html,
        css: req.css,
        js: req.js,
    };

    match state.projects.save(&req.project_name, &files).await {
        Ok(()) => {
            info!(project = %req.project_name, "Project saved");
            success("Project saved successfully!")
        }
        Err(e @ BuilderError::InvalidProjectName(_)) => {
            warn!(project = %req.project_name, "Rejected save: {e}");
            failure(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            error!(project = %req.project_name, "Failed to save project: {e}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub async fn load_handler(
    Path(project_name): Path<String>,
    State(state): State<Arc<ServerState>>,
) -> Response {
    match state.projects.load(&project_name).await {
        Ok(files) => Json(files).into_response(),
        Err(e @ BuilderError::InvalidProjectName(_)) => {
            failure(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            warn!(project = %project_name, "Failed to load project: {e}");
            failure(StatusCode::NOT_FOUND, "Project not found")
        }
    }
}

pub async fn list_handler(State(state): State<Arc<ServerState>>) -> Json<Vec<String>> {
    Json(state.projects.list().await)
}

pub async fn delete_handler(
    Path(project_name): Path<String>,
    State(state): State<Arc<ServerState>>,
) -> Response {
    match state.projects.delete(&project_name).await {
        Ok(()) => {
            info!(project = %project_name, "Project deleted");
            success("Project deleted successfully!")
        }
        Err(BuilderError::ProjectNotFound(_)) => {
            failure(StatusCode::NOT_FOUND, "Project not found")
        }
        Err(e @ BuilderError::InvalidProjectName(_)) => {
            failure(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            error!(project = %project_name, "Failed to delete project: {e}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_camel_case() {
        let req: SaveRequest = serde_json::from_value(json!({
            "projectName": "site",
            "html": "<p>x</p>",
            "css": "body{}",
            "js": ""
        }))
        .unwrap();
        assert_eq!(req.project_name, "site");
        assert_eq!(req.html, "<p>x</p>");
    }

    #[test]
    fn test_save_request_missing_parts_default_empty() {
        let req: SaveRequest =
            serde_json::from_value(json!({ "projectName": "site" })).unwrap();
        assert!(req.html.is_empty());
        assert!(req.css.is_empty());
        assert!(req.js.is_empty());
    }

    #[test]
    fn test_save_request_requires_name() {
        let result = serde_json::from_value::<SaveRequest>(json!({ "html": "" }));
        assert!(result.is_err());
    }
}
