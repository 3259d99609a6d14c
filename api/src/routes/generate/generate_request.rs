use ai_llm_service::{ConversationTurn, GenerationResult, Source};
use serde::{Deserialize, Serialize};

/// Request payload for /api/generate.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// The new user question. Required, non-blank.
    #[serde(default)]
    pub query: Option<String>,
    /// Prior turns, oldest first. Absent or `null` means no history.
    #[serde(default)]
    pub history: Option<Vec<ConversationTurn>>,
}

/// Response payload for /api/generate.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Markdown answer, or the configured fallback text.
    pub text: String,
    /// Deduplicated web citations; empty when there are none.
    pub sources: Vec<Source>,
}

impl From<GenerationResult> for GenerateResponse {
    fn from(r: GenerationResult) -> Self {
        Self {
            text: r.text,
            sources: r.sources,
        }
    }
}
