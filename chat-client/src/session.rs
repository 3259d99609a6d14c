//! One conversation: relay client plus the transcript it replays.

use ai_llm_service::GenerationResult;
use tracing::warn;

use crate::{
    relay_client::RelayClient,
    transcript::Transcript,
    view::{render_answer, render_error_panel, render_sources},
};

/// Outcome of [`ChatSession::ask`], ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeView {
    Answer {
        result: GenerationResult,
        /// Rendered answer followed by the citation list.
        markup: String,
    },
    Failure {
        message: String,
        markup: String,
    },
}

impl ExchangeView {
    pub fn markup(&self) -> &str {
        match self {
            ExchangeView::Answer { markup, .. } | ExchangeView::Failure { markup, .. } => markup,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExchangeView::Failure { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    client: RelayClient,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new(client: RelayClient) -> Self {
        Self {
            client,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    /// Asks the relay with the current transcript.
    ///
    /// Blank input returns `None` without a request. The transcript only
    /// grows (query, then answer) when the exchange succeeds.
    pub async fn ask(&mut self, input: &str) -> Option<ExchangeView> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }

        let view = match self.client.generate(query, self.transcript.turns()).await {
            Ok(result) => {
                self.transcript.record_exchange(query, result.text.as_str());
                let mut markup = render_answer(&result.text);
                markup.push_str(&render_sources(&result.sources));
                ExchangeView::Answer { result, markup }
            }
            Err(err) => {
                warn!(error = %err, "exchange failed");
                let message = err.to_string();
                ExchangeView::Failure {
                    markup: render_error_panel(&message),
                    message,
                }
            }
        };

        Some(view)
    }
}
