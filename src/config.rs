//! Crew configuration
//!
//! All runtime settings live in an explicit [`CrewConfig`] that is handed to
//! the provider at construction time. Reading the environment is one way to
//! build it; the environment is never written to.
//!
//! ```ignore
//! // From environment variables
//! let config = CrewConfig::from_env()?;
//!
//! // Explicit
//! let config = CrewConfig::new("AIza...").with_model("gemini-2.5-pro");
//! ```

use std::env;
use std::path::PathBuf;

use crate::core::{CrewError, CrewResult};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const MODEL_VAR: &str = "CREW_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const TEMPERATURE_VAR: &str = "CREW_TEMPERATURE";
pub const MAX_TOKENS_VAR: &str = "CREW_MAX_OUTPUT_TOKENS";
pub const RUNS_DIR_VAR: &str = "CREW_RUNS_DIR";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Strip a `gemini/` provider prefix from a model identifier
pub fn normalize_model(model: String) -> String {
    match model.strip_prefix("gemini/") {
        Some(name) => name.to_string(),
        None => model,
    }
}

/// Settings for the model provider and run bookkeeping
#[derive(Clone)]
pub struct CrewConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Directory for run records; `None` disables saving
    pub runs_dir: Option<PathBuf>,
}

impl std::fmt::Debug for CrewConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrewConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("runs_dir", &self.runs_dir)
            .finish()
    }
}

impl CrewConfig {
    /// Create a config with an explicit API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            runs_dir: None,
        }
    }

    /// Build a config from environment variables
    ///
    /// Reads from:
    /// - `GOOGLE_API_KEY` (required)
    /// - `CREW_MODEL` (optional, defaults to `gemini-2.5-flash`)
    /// - `GEMINI_BASE_URL` (optional)
    /// - `CREW_TEMPERATURE` (optional, defaults to 0.4)
    /// - `CREW_MAX_OUTPUT_TOKENS` (optional, defaults to 8192)
    /// - `CREW_RUNS_DIR` (optional)
    pub fn from_env() -> CrewResult<Self> {
        tracing::info!("Loading crew configuration from environment");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> CrewResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or_else(|| CrewError::MissingConfig(API_KEY_VAR.to_string()))?;

        let mut config = Self::new(api_key);

        if let Some(model) = get(MODEL_VAR) {
            config = config.with_model(model);
        }
        if let Some(url) = get(BASE_URL_VAR) {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(TEMPERATURE_VAR) {
            let temperature: f32 = raw.trim().parse().map_err(|_| CrewError::InvalidConfig {
                key: TEMPERATURE_VAR.to_string(),
                reason: format!("'{}' is not a number", raw),
            })?;
            if !(0.0..=2.0).contains(&temperature) {
                return Err(CrewError::InvalidConfig {
                    key: TEMPERATURE_VAR.to_string(),
                    reason: format!("{} is outside 0.0..=2.0", temperature),
                });
            }
            config.temperature = temperature;
        }
        if let Some(raw) = get(MAX_TOKENS_VAR) {
            let max_output_tokens = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| CrewError::InvalidConfig {
                    key: MAX_TOKENS_VAR.to_string(),
                    reason: format!("'{}' is not a positive integer", raw),
                })?;
            config.max_output_tokens = max_output_tokens;
        }
        config.runs_dir = get(RUNS_DIR_VAR).map(PathBuf::from);

        tracing::info!("Using model: {}", config.model);
        tracing::info!("Temperature: {}", config.temperature);
        tracing::info!("Max output tokens: {}", config.max_output_tokens);

        Ok(config)
    }

    /// Set the model, stripping a `gemini/` provider prefix if present
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = normalize_model(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_runs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.runs_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        // No hardcoded fallback key: an unset credential fails at load time
        let err = CrewConfig::from_lookup(lookup(&[(MODEL_VAR, "gemini-2.5-pro")])).unwrap_err();
        assert!(matches!(err, CrewError::MissingConfig(ref key) if key == API_KEY_VAR));
    }

    #[test]
    fn test_blank_api_key_is_an_error() {
        let err = CrewConfig::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, CrewError::MissingConfig(_)));
    }

    #[test]
    fn test_defaults() {
        let config = CrewConfig::from_lookup(lookup(&[(API_KEY_VAR, "key")])).unwrap();
        assert_eq!(config.api_key, "key");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(config.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS);
        assert!(config.runs_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = CrewConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "key"),
            (MODEL_VAR, "gemini/gemini-2.5-pro"),
            (BASE_URL_VAR, "http://localhost:8080/"),
            (TEMPERATURE_VAR, "0.9"),
            (MAX_TOKENS_VAR, "1024"),
            (RUNS_DIR_VAR, "runs"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.temperature, 0.9);
        assert_eq!(config.max_output_tokens, 1024);
        assert_eq!(config.runs_dir, Some(PathBuf::from("runs")));
    }

    #[test]
    fn test_invalid_temperature() {
        let err = CrewConfig::from_lookup(lookup(&[(API_KEY_VAR, "key"), (TEMPERATURE_VAR, "hot")]))
            .unwrap_err();
        assert!(matches!(err, CrewError::InvalidConfig { ref key, .. } if key == TEMPERATURE_VAR));

        let err = CrewConfig::from_lookup(lookup(&[(API_KEY_VAR, "key"), (TEMPERATURE_VAR, "3.5")]))
            .unwrap_err();
        assert!(matches!(err, CrewError::InvalidConfig { .. }));
    }

    #[test]
    fn test_invalid_max_output_tokens() {
        for raw in ["0", "-5", "many"] {
            let err = CrewConfig::from_lookup(lookup(&[(API_KEY_VAR, "key"), (MAX_TOKENS_VAR, raw)]))
                .unwrap_err();
            assert!(
                matches!(err, CrewError::InvalidConfig { ref key, .. } if key == MAX_TOKENS_VAR),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_normalize_model() {
        assert_eq!(normalize_model("gemini/gemini-2.5-pro".to_string()), "gemini-2.5-pro");
        assert_eq!(normalize_model("gemini-2.5-flash".to_string()), "gemini-2.5-flash");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = CrewConfig::new("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
