use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ai_llm_service::AiLlmError;
use serde::Serialize;
use thiserror::Error;

use crate::core::app_state::ConfigError;

pub const QUERY_REQUIRED: &str = "Query is required in the request body.";
pub const MISSING_KEY_TEXT: &str = "Mocked response: Key missing. Cannot call live API.";

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request handling ---
    /// Bad caller input; nothing was sent upstream.
    #[error("{0}")]
    InvalidRequest(String),

    /// No API key configured; nothing was sent upstream.
    #[error(
        "Server Error: Gemini API Key is missing. Please set it in your .env file and restart the server."
    )]
    MissingApiKey,

    /// The Gemini call failed. The source is logged, never returned.
    #[error("Failed to communicate with the AI model or process the response.")]
    Upstream(#[source] AiLlmError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MissingApiKey | AppError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // startup-only
            AppError::Config(_) | AppError::Bind { .. } | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Placeholder answer sent alongside a missing-key error.
    fn fallback_text(&self) -> Option<&'static str> {
        match self {
            AppError::MissingApiKey => Some(MISSING_KEY_TEXT),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_string(),
            text: self.fallback_text(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed or non-JSON bodies are the caller's fault.
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidRequest(format!("Invalid request body: {}", err.body_text()))
    }
}
