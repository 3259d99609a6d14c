//! Gemini service for grounded text generation.
//!
//! Minimal, non-streaming client around the Generative Language REST API:
//! - POST {endpoint}/v1beta/models/{model}:generateContent?key={api_key}
//!
//! Every request enables Google Search grounding and carries the configured
//! system instruction. One call per [`GeminiService::generate`], no retries.
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//! - `cfg.model` must not be empty

use std::time::{Duration, Instant};

use reqwest::header;
use tracing::{debug, error, info};

use crate::{
    config::llm_model_config::{DEFAULT_TIMEOUT_SECS, LlmModelConfig},
    conversation::{ConversationTurn, GenerationResult},
    error_handler::{
        AiLlmError, ConfigError, HttpError, ProviderError, ProviderErrorKind, Result, make_snippet,
    },
    services::gemini_payload::{GenerateContentRequest, GenerateContentResponse},
};

/// Thin client for the Gemini API.
///
/// Keeps a preconfigured `reqwest::Client` (timeout and default headers) and
/// is safe to share between concurrent requests.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    api_key: String,
    url_generate: String,
    timeout: Duration,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is absent or blank
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::Config`] with `EmptyModel` if `cfg.model` is blank
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        let api_key = cfg
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ProviderError::new(ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(
                ProviderError::new(ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone())).into(),
            );
        }

        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let url_generate = cfg.generate_url();

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            api_key,
            url_generate,
            timeout,
        })
    }

    /// Sends `history` followed by `query` and reduces the reply to text and
    /// citations.
    ///
    /// A reply without answer text is not an error; it yields
    /// `cfg.fallback_text` and no sources.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::Timeout`] if the call exceeds the configured timeout
    /// - [`AiLlmError::HttpTransport`] for other client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    pub async fn generate(
        &self,
        history: &[ConversationTurn],
        query: &str,
    ) -> Result<GenerationResult> {
        let started = Instant::now();
        let body = GenerateContentRequest::build(history, query, &self.cfg.system_instruction);

        debug!(
            model = %self.cfg.model,
            history_len = history.len(),
            query_len = query.len(),
            "POST {}", self.url_generate
        );

        let resp = self
            .client
            .post(&self.url_generate)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_generate.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Gemini generateContent returned non-success status"
            );

            return Err(ProviderError::new(ProviderErrorKind::HttpStatus(HttpError {
                status,
                url,
                snippet,
            }))
            .into());
        }

        let out: GenerateContentResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                let e = e.without_url();
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode generateContent response"
                );
                return Err(ProviderError::new(ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `candidates[0].content.parts[0].text`"
                )))
                .into());
            }
        };

        let result = out.into_generation_result(&self.cfg.fallback_text);

        info!(
            model = %self.cfg.model,
            sources = result.sources.len(),
            answer_len = result.text.len(),
            latency_ms = started.elapsed().as_millis(),
            "generateContent completed"
        );

        Ok(result)
    }

    /// Strips the URL (it carries the key) and separates timeouts.
    fn transport_error(&self, err: reqwest::Error) -> AiLlmError {
        let err = err.without_url();
        if err.is_timeout() {
            error!(timeout_secs = self.timeout.as_secs(), "Gemini request timed out");
            AiLlmError::Timeout(self.timeout)
        } else {
            error!(error = %err, "Gemini request failed before a response arrived");
            AiLlmError::HttpTransport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg_with_key(key: Option<&str>) -> LlmModelConfig {
        LlmModelConfig {
            api_key: key.map(str::to_string),
            ..LlmModelConfig::default()
        }
    }

    #[test]
    fn missing_key_is_rejected() {
        let err = GeminiService::new(cfg_with_key(None)).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::MissingApiKey
            })
        ));
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let cfg = LlmModelConfig {
            endpoint: "generativelanguage.googleapis.com".into(),
            ..cfg_with_key(Some("k"))
        };
        let err = GeminiService::new(cfg).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::InvalidEndpoint(_)
            })
        ));
    }

    #[test]
    fn blank_model_is_rejected() {
        let cfg = LlmModelConfig {
            model: " ".into(),
            ..cfg_with_key(Some("k"))
        };
        assert!(matches!(
            GeminiService::new(cfg).unwrap_err(),
            AiLlmError::Config(ConfigError::EmptyModel)
        ));
    }
}
