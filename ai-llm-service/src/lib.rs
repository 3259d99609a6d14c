//! Gemini access for the Ask Gemini relay.
//!
//! - [`services::gemini_service::GeminiService`] performs the single grounded
//!   `generateContent` call.
//! - [`config`] builds its [`config::llm_model_config::LlmModelConfig`] from the environment.
//! - [`conversation`] holds the request-scoped types shared with callers.

pub mod citations;
pub mod config;
pub mod conversation;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use conversation::{ConversationTurn, GenerationResult, Source};
pub use error_handler::{AiLlmError, Result};
pub use services::gemini_service::GeminiService;
