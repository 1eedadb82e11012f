//! BaseLinker connection configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BASELINKER_API_TOKEN` - API token from the BaseLinker panel (Account -> API)
//!
//! ## Optional
//! - `BASELINKER_API_URL` - Connector endpoint override (default: production endpoint)

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Production connector endpoint.
pub const DEFAULT_API_URL: &str = "https://api.baselinker.com/connector.php";

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// BaseLinker connection configuration.
///
/// Loaded once at process start and handed to the client at construction;
/// nothing else in the system reads the environment.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct Config {
    /// API token identifying the BaseLinker account
    pub token: SecretString,
    /// Connector endpoint requests are posted to
    pub api_url: Url,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"[REDACTED]")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `BASELINKER_API_TOKEN` is missing or fails
    /// validation (placeholder detection, entropy check), or if
    /// `BASELINKER_API_URL` is set but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let token = get_validated_secret("BASELINKER_API_TOKEN")?;
        let api_url = get_env_or_default("BASELINKER_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("BASELINKER_API_URL".to_string(), e.to_string())
            })?;

        Ok(Self { token, api_url })
    }

    /// Build a configuration directly, bypassing the environment.
    #[must_use]
    pub const fn new(token: SecretString, api_url: Url) -> Self {
        Self { token, api_url }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real API tokens have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use the token issued by the vendor."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}
