//! POST /api/generate - relays a question plus transcript to Gemini.

use std::sync::Arc;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{debug, error, instrument};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult, QUERY_REQUIRED},
    routes::generate::generate_request::{GenerateRequest, GenerateResponse},
};

/// Handler: POST /api/generate
///
/// Checks the query, then the API key, and only then makes the single
/// upstream call. The history is forwarded exactly as received.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:4000/api/generate \
///   -H 'content-type: application/json' \
///   -d '{"query":"And in Rust?","history":[{"role":"user","text":"How do I read a file in Go?"},{"role":"model","text":"Use os.ReadFile."}]}'
/// ```
#[instrument(name = "generate_route", skip(state, payload))]
pub async fn generate_route(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let Json(body) = payload?;

    let query = match body.query {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Err(AppError::InvalidRequest(QUERY_REQUIRED.into())),
    };
    let history = body.history.unwrap_or_default();

    let Some(llm) = state.llm() else {
        error!("API Key missing! Set GEMINI_API_KEY (e.g. in .env) and restart the server");
        return Err(AppError::MissingApiKey);
    };

    debug!(
        history_len = history.len(),
        query_len = query.len(),
        "generate_route: start"
    );

    let result = llm.generate(&history, &query).await.map_err(|err| {
        error!(error = %err, "generate_route: upstream call failed");
        AppError::Upstream(err)
    })?;

    debug!(
        sources = result.sources.len(),
        "generate_route: success"
    );

    Ok(Json(result.into()))
}
