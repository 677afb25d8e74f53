use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use carteira_ai::AiError;
use carteira_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Ai(#[from] AiError),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Error payload: a human-readable `error` plus optional `details`.
/// Full error detail goes to the logs; clients get the redacted summary.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) | CoreError::ConstraintViolation(_) => {
                    (StatusCode::BAD_REQUEST, e.to_string(), None)
                }
                CoreError::Credential(_) => {
                    (StatusCode::UNAUTHORIZED, "Credenciais inválidas".to_string(), None)
                }
                other => {
                    tracing::error!("Internal error: {other}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Erro interno do servidor".to_string(),
                        None,
                    )
                }
            },
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason, None),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason, None),
            ApiError::Internal(reason) => {
                tracing::error!("Internal error: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                    Some(reason),
                )
            }
            ApiError::Ai(e) => match e {
                AiError::InvalidInput(_) => (
                    StatusCode::BAD_REQUEST,
                    "Messages são obrigatórias".to_string(),
                    None,
                ),
                AiError::MissingApiKey(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "API Key do Groq não configurada. Visite: https://console.groq.com/keys"
                        .to_string(),
                    None,
                ),
                AiError::Provider {
                    status: Some(code),
                    detail,
                } => (
                    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                    format!("Erro do Groq: {code}"),
                    Some(detail),
                ),
                AiError::Provider {
                    status: None,
                    detail,
                } => {
                    tracing::error!("Provider transport failure: {detail}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Erro interno do servidor".to_string(),
                        Some(detail),
                    )
                }
                AiError::Internal(detail) => {
                    tracing::error!("Relay internal error: {detail}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Erro interno do servidor".to_string(),
                        None,
                    )
                }
            },
            ApiError::Anyhow(e) => {
                tracing::error!("Unhandled error: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                    None,
                )
            }
        };
        let body = Json(ErrorBody { error, details });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
