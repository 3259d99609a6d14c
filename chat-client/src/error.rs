use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid relay URL {0:?}: must start with http:// or https://")]
    InvalidBaseUrl(String),

    /// The relay answered with an error; the message is shown as-is.
    #[error("{0}")]
    Relay(String),

    #[error("could not read relay response: {0}")]
    Decode(String),

    #[error("request to relay failed: {0}")]
    Transport(#[from] reqwest::Error),
}
