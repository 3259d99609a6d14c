//! Gemini config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`       = credential (optional; absence degrades the relay)
//! - `GEMINI_MODEL`         = model id (default: [`DEFAULT_MODEL`])
//! - `GEMINI_BASE_URL`      = API base URL (default: [`DEFAULT_ENDPOINT`])
//! - `GEMINI_TIMEOUT_SECS`  = request timeout (default: [`DEFAULT_TIMEOUT_SECS`])
//! - `GEMINI_SYSTEM_PROMPT` = system instruction override
//! - `GEMINI_FALLBACK_TEXT` = fallback answer override
//!
//! Empty values are treated as unset.

use crate::{
    config::llm_model_config::{
        DEFAULT_ENDPOINT, DEFAULT_FALLBACK_TEXT, DEFAULT_MODEL, DEFAULT_SYSTEM_INSTRUCTION,
        DEFAULT_TIMEOUT_SECS, LlmModelConfig,
    },
    error_handler::{Result, env_opt, env_opt_u64, validate_http_endpoint},
};

/// Reads the Gemini config from the process environment.
///
/// # Errors
/// - [`crate::error_handler::ConfigError::InvalidNumber`] for a bad `GEMINI_TIMEOUT_SECS`
/// - [`crate::error_handler::ConfigError::InvalidFormat`] for a non-http(s) `GEMINI_BASE_URL`
pub fn config_gemini() -> Result<LlmModelConfig> {
    config_gemini_from(|name| std::env::var(name).ok())
}

/// Same as [`config_gemini`], reading values through `lookup`.
pub fn config_gemini_from<F>(lookup: F) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let endpoint = env_opt(&lookup, "GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.into());
    validate_http_endpoint("GEMINI_BASE_URL", endpoint.trim())?;

    let timeout_secs = env_opt_u64(&lookup, "GEMINI_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        model: env_opt(&lookup, "GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
        endpoint,
        api_key: env_opt(&lookup, "GEMINI_API_KEY").map(|k| k.trim().to_string()),
        timeout_secs: Some(timeout_secs),
        system_instruction: env_opt(&lookup, "GEMINI_SYSTEM_PROMPT")
            .unwrap_or_else(|| DEFAULT_SYSTEM_INSTRUCTION.into()),
        fallback_text: env_opt(&lookup, "GEMINI_FALLBACK_TEXT")
            .unwrap_or_else(|| DEFAULT_FALLBACK_TEXT.into()),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error_handler::{AiLlmError, ConfigError};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults_without_key() {
        let cfg = config_gemini_from(lookup_from(&[])).unwrap();
        assert_eq!(cfg, LlmModelConfig::default());
        assert!(!cfg.has_api_key());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_gemini_from(lookup_from(&[
            ("GEMINI_API_KEY", " secret "),
            ("GEMINI_MODEL", "gemini-test"),
            ("GEMINI_BASE_URL", "http://localhost:9999"),
            ("GEMINI_TIMEOUT_SECS", "5"),
            ("GEMINI_FALLBACK_TEXT", "nothing"),
        ]))
        .unwrap();

        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.model, "gemini-test");
        assert_eq!(cfg.endpoint, "http://localhost:9999");
        assert_eq!(cfg.timeout_secs, Some(5));
        assert_eq!(cfg.fallback_text, "nothing");
        assert_eq!(cfg.system_instruction, DEFAULT_SYSTEM_INSTRUCTION);
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let cfg = config_gemini_from(lookup_from(&[("GEMINI_API_KEY", "")])).unwrap();
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = config_gemini_from(lookup_from(&[("GEMINI_BASE_URL", "localhost:1")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidFormat {
                var: "GEMINI_BASE_URL",
                ..
            })
        ));
    }
}
