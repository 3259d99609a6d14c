//! Wire types for `POST /v1beta/models/{model}:generateContent`.
//!
//! Request types borrow from the caller's transcript; response types are
//! fully optional because Gemini omits (or nulls) fields freely.

use serde::{Deserialize, Serialize};

use crate::{
    citations::collect_sources,
    conversation::{ConversationTurn, GenerationResult, ROLE_USER},
};

/* ===========================================================================
Request
======================================================================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub tools: Vec<Tool>,
    pub system_instruction: SystemInstruction<'a>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Content<'a> {
    pub role: &'a str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SystemInstruction<'a> {
    pub parts: Vec<Part<'a>>,
}

/// Tool declaration; only Google Search grounding is ever enabled.
#[derive(Debug, Default, Serialize)]
pub struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Default, Serialize)]
pub struct GoogleSearch {}

impl<'a> GenerateContentRequest<'a> {
    /// Replays `history` in order and appends `query` as the final user turn.
    pub fn build(history: &'a [ConversationTurn], query: &'a str, system: &'a str) -> Self {
        let mut contents: Vec<Content<'a>> = history
            .iter()
            .map(|turn| Content::single(&turn.role, &turn.text))
            .collect();
        contents.push(Content::single(ROLE_USER, query));

        Self {
            contents,
            tools: vec![Tool::default()],
            system_instruction: SystemInstruction {
                parts: vec![Part { text: system }],
            },
        }
    }
}

impl<'a> Content<'a> {
    fn single(role: &'a str, text: &'a str) -> Self {
        Self {
            role,
            parts: vec![Part { text }],
        }
    }
}

/* ===========================================================================
Response
======================================================================== */

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    pub grounding_attributions: Option<Vec<GroundingAttribution>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroundingAttribution {
    pub web: Option<WebAttribution>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebAttribution {
    pub uri: Option<String>,
    pub title: Option<String>,
}

impl GenerateContentResponse {
    fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.as_deref()?.first()
    }

    /// `candidates[0].content.parts[0].text`, if present and non-empty.
    pub fn answer_text(&self) -> Option<&str> {
        self.first_candidate()?
            .content
            .as_ref()?
            .parts
            .as_deref()?
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }

    /// Web attributions of the first candidate, in response order.
    pub fn web_attributions(&self) -> impl Iterator<Item = &WebAttribution> {
        self.first_candidate()
            .and_then(|c| c.grounding_metadata.as_ref())
            .and_then(|m| m.grounding_attributions.as_deref())
            .unwrap_or_default()
            .iter()
            .filter_map(|a| a.web.as_ref())
    }

    /// Reduces the response to answer text and citations.
    ///
    /// Citations are only read when an answer was found; otherwise the
    /// result is `fallback` with no sources.
    pub fn into_generation_result(self, fallback: &str) -> GenerationResult {
        match self.answer_text() {
            Some(text) => GenerationResult {
                text: text.to_string(),
                sources: collect_sources(self.web_attributions()),
            },
            None => GenerationResult {
                text: fallback.to_string(),
                sources: Vec::new(),
            },
        }
    }
}
