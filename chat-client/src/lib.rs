//! Receiving side of Ask Gemini: keeps the transcript, calls the relay and
//! turns answers into HTML.

pub mod error;
pub mod markdown;
pub mod relay_client;
pub mod session;
pub mod transcript;
pub mod view;

pub use error::{ClientError, Result};
pub use markdown::render;
pub use relay_client::RelayClient;
pub use session::{ChatSession, ExchangeView};
pub use transcript::Transcript;
