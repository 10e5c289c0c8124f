use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chatbase::ChatbaseError;
use shared::ErrorResponse;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

const CHATBOT_SUGGESTION: &str = "Check if chatbot ID is correct and chatbot is published";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no message or conversation provided")]
    NoContent,
    #[error(transparent)]
    Chatbase(#[from] ChatbaseError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NoContent => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No message or conversation provided".to_string(),
                    details: None,
                    chatbase_error: None,
                    suggestion: None,
                }),
            )
                .into_response(),
            AppError::Chatbase(err) => {
                let status = err
                    .status()
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

                tracing::error!(%status, error = %err, "chat relay failed");

                let body = ErrorResponse {
                    error: "Failed to get response".to_string(),
                    details: Some(err.to_string()),
                    chatbase_error: err.payload().cloned(),
                    suggestion: Some(CHATBOT_SUGGESTION.to_string()),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
