//! Request-scoped chat types shared by the relay and its callers.

use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";
pub const ROLE_MODEL: &str = "model";

/// One dialogue entry, oldest first in a transcript.
///
/// `role` is forwarded to Gemini as-is; only `"user"` and `"model"` are
/// accepted upstream, but nothing here enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ROLE_USER.to_string(),
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ROLE_MODEL.to_string(),
            text: text.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ROLE_USER
    }
}

/// A web citation backing the answer. Unique by `uri` within a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// Answer text plus its citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub sources: Vec<Source>,
}
