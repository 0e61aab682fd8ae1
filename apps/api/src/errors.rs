use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// A single form-validation failure, shown inline next to its field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// The user-visible notification raised when a generation step fails.
/// Carries no cause, code, or retry hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub variant: String,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn generation_failed(what: &str) -> Self {
        Self {
            variant: "destructive".to_string(),
            title: "Error".to_string(),
            description: format!("Could not generate {what}. Please try again."),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any model-call failure: network, quota, or malformed output.
    #[error("Could not generate {what}: {source}")]
    Generation {
        what: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn generation(what: &'static str) -> impl FnOnce(LlmError) -> AppError {
        move |source| AppError::Generation { what, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(fields) => {
                let body = Json(json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "Please correct the highlighted fields."
                    },
                    "fields": fields
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Generation { what, source } => {
                tracing::error!("Generation of {what} failed: {source}");
                let notice = Notice::generation_failed(what);
                let body = Json(json!({
                    "error": {
                        "code": "GENERATION_FAILED",
                        "message": notice.description
                    },
                    "notice": notice
                }));
                return (StatusCode::BAD_GATEWAY, body).into_response();
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

    async fn body_of(err: AppError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_generation_notice_is_generic() {
        let notice = Notice::generation_failed("a roadmap");
        assert_eq!(notice.variant, "destructive");
        assert_eq!(notice.title, "Error");
        assert_eq!(
            notice.description,
            "Could not generate a roadmap. Please try again."
        );
        assert!(!notice.description.contains("empty content"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("busy".into()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Validation(vec![]).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::generation("skill gaps")(LlmError::EmptyContent)
                .into_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_generation_body_hides_cause() {
        let body = body_of(AppError::generation("skill gaps")(LlmError::Api {
            status: 429,
            message: "quota exceeded for project 1234".to_string(),
        }))
        .await;
        assert_eq!(body["error"]["code"], "GENERATION_FAILED");
        assert_eq!(body["notice"]["variant"], "destructive");
        assert!(!body.to_string().contains("quota"));
    }

    #[tokio::test]
    async fn test_non_generation_errors_have_no_notice() {
        let body = body_of(AppError::Conflict("busy".into())).await;
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert!(body.get("notice").is_none());
    }
}
