use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// Every model in the fallback chain failed. The message is shown to the user.
    #[error("{0}")]
    ModelUnavailable(String),

    /// The model answered but no JSON array could be extracted.
    /// `raw_text` is returned so the user can inspect it.
    #[error("Response parse error: {message}")]
    ResponseParse { message: String, raw_text: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, raw_text) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "😕 비밀번호가 틀렸거나 세션이 만료되었습니다.".to_string(),
                None,
            ),
            AppError::ModelUnavailable(msg) => {
                tracing::error!("Model chain exhausted: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_UNAVAILABLE",
                    msg.clone(),
                    None,
                )
            }
            AppError::ResponseParse { message, raw_text } => {
                tracing::error!("Response parse error: {message}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "RESPONSE_PARSE_ERROR",
                    format!("데이터 처리 중 오류가 발생했습니다. ({message})"),
                    Some(raw_text.clone()),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(raw) = raw_text {
            error["raw_text"] = json!(raw);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_parse_error_exposes_raw_text() {
        let resp = AppError::ResponseParse {
            message: "expected value".to_string(),
            raw_text: "not json at all".to_string(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "RESPONSE_PARSE_ERROR");
        assert_eq!(body["error"]["raw_text"], "not json at all");
    }

    #[tokio::test]
    async fn test_model_unavailable_shows_message() {
        let resp = AppError::ModelUnavailable("Error: quota exceeded".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["message"], "Error: quota exceeded");
        assert!(body["error"].get("raw_text").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_is_401() {
        let resp = AppError::Unauthorized.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
