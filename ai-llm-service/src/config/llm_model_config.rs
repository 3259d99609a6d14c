/// Configuration for the Gemini `generateContent` call.
///
/// Built once at startup (see [`crate::config::default_config`]) and shared
/// immutably by every request.
///
/// # Fields
///
/// - `model`: Model identifier (e.g., `"gemini-2.5-flash-preview-09-2025"`).
/// - `endpoint`: API base URL; the model path is appended to it.
/// - `api_key`: Credential sent as the `key` query parameter. `None` leaves the
///   relay running in a degraded mode that answers with a configuration error.
/// - `timeout_secs`: Optional request timeout in seconds.
/// - `system_instruction`: Static system prompt attached to every request.
/// - `fallback_text`: Answer used when the response carries no text.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_model_config::LlmModelConfig;
///
/// let cfg = LlmModelConfig {
///     api_key: Some("test-key".to_string()),
///     ..LlmModelConfig::default()
/// };
/// assert!(cfg.generate_url().ends_with(":generateContent"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// Base URL of the Generative Language API.
    pub endpoint: String,

    /// Optional API key.
    pub api_key: Option<String>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,

    /// System instruction sent with every request.
    pub system_instruction: String,

    /// Text returned when no answer could be extracted.
    pub fallback_text: String,
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are a concise, helpful, and friendly AI assistant. Always format your response using Markdown for excellent readability.";
pub const DEFAULT_FALLBACK_TEXT: &str = "Could not generate or parse AI response.";

impl Default for LlmModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
        }
    }
}

impl LlmModelConfig {
    /// Full `generateContent` URL for the configured model, without the key.
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim().trim_end_matches('/'),
            self.model
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_model() {
        let cfg = LlmModelConfig {
            endpoint: "http://127.0.0.1:9000/".into(),
            model: "m1".into(),
            ..LlmModelConfig::default()
        };
        assert_eq!(
            cfg.generate_url(),
            "http://127.0.0.1:9000/v1beta/models/m1:generateContent"
        );
    }

    #[test]
    fn blank_key_is_not_a_key() {
        let cfg = LlmModelConfig {
            api_key: Some("  ".into()),
            ..LlmModelConfig::default()
        };
        assert!(!cfg.has_api_key());
    }
}
