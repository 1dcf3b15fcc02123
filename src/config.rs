use crate::error::ConfigError;
use crate::fetcher::DEFAULT_FETCH_TIMEOUT_SECS;
use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL_TIMEOUT_SECS};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Process-wide settings read once at startup.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model_base_url: String,
    pub fetch_timeout_secs: u64,
    pub model_timeout_secs: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[redacted]")
            .field("model_base_url", &self.model_base_url)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("model_timeout_secs", &self.model_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the API key is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        build_config(|key| std::env::var(key))
    }
}

/// Builds a [`Config`] from an env-var lookup function.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnvVar`] when the API key is absent or
/// blank, and [`ConfigError::InvalidEnvVar`] when a timeout is not a
/// positive integer.
pub fn build_config<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_secs = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        match raw.trim().parse::<u64>() {
            Ok(0) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            }),
            Ok(secs) => Ok(secs),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let api_key = lookup(API_KEY_VAR)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VAR.to_string()))?;

    Ok(Config {
        api_key,
        model_base_url: or_default("GEMINI_BASE_URL", DEFAULT_BASE_URL),
        fetch_timeout_secs: parse_secs(
            "PRODUCT_EXTRACTOR_FETCH_TIMEOUT_SECS",
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?,
        model_timeout_secs: parse_secs(
            "PRODUCT_EXTRACTOR_MODEL_TIMEOUT_SECS",
            DEFAULT_MODEL_TIMEOUT_SECS,
        )?,
    })
}
