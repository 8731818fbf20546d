use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
///
/// Selection and generation never produce one of these: missing content is
/// recovered locally with documented defaults. What does surface here is
/// configuration (an unknown version), content I/O and rendering.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unknown version: {0}")]
    UnknownVersion(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Content error: {0}")]
    Content(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::UnknownVersion(version) => (
                StatusCode::NOT_FOUND,
                "UNKNOWN_VERSION",
                format!("Version '{version}' is not defined in the registry"),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Content(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CONTENT_ERROR",
                msg.clone(),
            ),
            AppError::Yaml(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "CONTENT_ERROR",
                format!("Content could not be parsed: {e}"),
            ),
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "A filesystem error occurred".to_string(),
                )
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (StatusCode::BAD_GATEWAY, "RENDER_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_version_maps_to_404() {
        let response = AppError::UnknownVersion("cto".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_render_error_maps_to_bad_gateway() {
        let response = AppError::Render("no renderer available".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_yaml_error_converts_via_from() {
        let err: AppError = serde_yaml::from_str::<Vec<u32>>("{not: [a list")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Yaml(_)));
    }
}
