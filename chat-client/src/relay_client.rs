//! HTTP client for the relay's `POST /api/generate`.

use std::time::Duration;

use ai_llm_service::{ConversationTurn, GenerationResult, Source};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Longer than the relay's own upstream timeout, so its error wins.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    url_generate: String,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    query: &'a str,
    history: &'a [ConversationTurn],
}

#[derive(Deserialize)]
struct RelayReply {
    error: Option<String>,
    text: Option<String>,
    sources: Option<Vec<Source>>,
}

impl RelayClient {
    /// `base_url` is the relay origin, e.g. `http://localhost:4000`.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url_generate: format!("{}/api/generate", base.trim_end_matches('/')),
        })
    }

    /// Sends one question with the transcript snapshot.
    ///
    /// # Errors
    /// [`ClientError::Relay`] when the status is not 2xx or the body carries
    /// an `error` (its message, else `Backend returned status {code}`).
    pub async fn generate(
        &self,
        query: &str,
        history: &[ConversationTurn],
    ) -> Result<GenerationResult> {
        debug!(history_len = history.len(), "POST {}", self.url_generate);

        let resp = self
            .client
            .post(&self.url_generate)
            .json(&GenerateBody { query, history })
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        let parsed = serde_json::from_str::<RelayReply>(&body);

        let reply = match parsed {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => {
                return Err(ClientError::Relay(status_message(status)));
            }
            Err(e) => return Err(ClientError::Decode(e.to_string())),
        };

        let error = reply.error.filter(|e| !e.is_empty());
        if !status.is_success() || error.is_some() {
            return Err(ClientError::Relay(
                error.unwrap_or_else(|| status_message(status)),
            ));
        }

        Ok(GenerationResult {
            text: reply.text.unwrap_or_default(),
            sources: reply.sources.unwrap_or_default(),
        })
    }
}

fn status_message(status: reqwest::StatusCode) -> String {
    format!("Backend returned status {}", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_must_be_http() {
        assert!(matches!(
            RelayClient::new("localhost:4000"),
            Err(ClientError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let client = RelayClient::new("http://localhost:4000/").unwrap();
        assert_eq!(client.url_generate, "http://localhost:4000/api/generate");
    }
}
