use std::path::PathBuf;

use ai_llm_service::{
    AiLlmError, GeminiService, LlmModelConfig,
    config::default_config::config_gemini_from,
    error_handler::{env_opt, env_opt_u64},
};
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Startup configuration failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}: expected 1..=65535")]
    InvalidPort(String),

    #[error(transparent)]
    Llm(#[from] AiLlmError),
}

/// Listener and static asset settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for paths other than the API routes.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Process-wide configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmModelConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PORT` (default 4000), `BIND_HOST` (default `0.0.0.0`),
    ///   `STATIC_DIR` (default `public`)
    /// - `GEMINI_*` variables, see `ai_llm_service::config::default_config`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match env_opt(&lookup, "PORT") {
            Some(raw) => match env_opt_u64(&lookup, "PORT") {
                Ok(Some(p)) if (1..=u64::from(u16::MAX)).contains(&p) => p as u16,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let server = ServerConfig {
            host: env_opt(&lookup, "BIND_HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            static_dir: env_opt(&lookup, "STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        };

        Ok(Self {
            server,
            llm: config_gemini_from(&lookup)?,
        })
    }
}

/// Shared state for all HTTP handlers.
///
/// `llm` is `None` when no API key is configured; the generate route then
/// answers with a configuration error instead of calling out.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    llm: Option<GeminiService>,
}

impl AppState {
    /// # Errors
    /// Returns [`ConfigError::Llm`] if a key is present but the Gemini client
    /// cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let llm = if config.llm.has_api_key() {
            Some(GeminiService::new(config.llm.clone())?)
        } else {
            warn!("GEMINI_API_KEY is not set; /api/generate will answer with a configuration error");
            None
        };

        info!(
            model = %config.llm.model,
            static_dir = %config.server.static_dir.display(),
            key_configured = llm.is_some(),
            "application state ready"
        );

        Ok(Self { config, llm })
    }

    pub fn llm(&self) -> Option<&GeminiService> {
        self.llm.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |k| {
            pairs
                .iter()
                .find(|(name, _)| *name == k)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.server, ServerConfig::default());
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:4000");
        assert_eq!(cfg.llm.api_key, None);
    }

    #[test]
    fn port_and_host_are_read() {
        let cfg = AppConfig::from_lookup(lookup(&[("PORT", "8081"), ("BIND_HOST", "127.0.0.1")]))
            .unwrap();
        assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8081");
    }

    #[test]
    fn invalid_port_is_rejected() {
        const BAD: [&[(&str, &str)]; 3] = [&[("PORT", "http")], &[("PORT", "70000")], &[("PORT", "0")]];
        for bad in BAD {
            let err = AppConfig::from_lookup(lookup(bad)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidPort(_)));
        }
    }

    #[test]
    fn missing_key_leaves_llm_unset() {
        let state = AppState::new(AppConfig::from_lookup(lookup(&[])).unwrap()).unwrap();
        assert!(state.llm().is_none());
    }

    #[test]
    fn present_key_builds_client() {
        let cfg = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        let state = AppState::new(cfg).unwrap();
        assert!(state.llm().is_some());
    }
}
