//! Configuration interpolation for environment variables and secrets.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

static SERVICE: &str = "payline";
/// Environment variable used to select the secret resolution backend.
pub const SECRETS_BACKEND_ENV_VAR: &str = "PAYLINE_SECRETS_BACKEND";

static PLACEHOLDER: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"\$\{(env|secret):([\w+_-]*)}"));

/// Secret resolution backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretsBackend {
    /// Resolve `${secret:NAME}` values via OS keychain (`keyring-rs`).
    Keychain,
    /// Resolve `${secret:NAME}` values from process environment variable `NAME`.
    Environment,
}

impl SecretsBackend {
    fn from_env_var(raw: Option<String>) -> Self {
        match raw.unwrap_or_default().trim().to_ascii_lowercase().as_str() {
            "env" => Self::Environment,
            _ => Self::Keychain,
        }
    }
}

/// Determine the currently configured secrets backend.
pub fn secrets_backend() -> SecretsBackend {
    SecretsBackend::from_env_var(std::env::var(SECRETS_BACKEND_ENV_VAR).ok())
}

/// Interpolate a string value, replacing `${env:NAME}` and `${secret:NAME}` patterns.
pub fn interpolate_string(value: &str) -> Result<String, InterpolationError> {
    let placeholder = PLACEHOLDER.as_ref().map_err(|e| InterpolationError::Regex(e.clone()))?;

    let mut result = String::with_capacity(value.len());
    let mut last = 0;
    for cap in placeholder.captures_iter(value) {
        let (Some(whole), Some(kind), Some(name)) = (cap.get(0), cap.get(1), cap.get(2)) else {
            continue;
        };
        let resolved = match kind.as_str() {
            "env" => {
                let resolved = std::env::var(name.as_str()).map_err(|_| InterpolationError::MissingEnvVar {
                    name: name.as_str().to_string(),
                })?;
                debug!("Interpolated env var: {} -> [REDACTED]", name.as_str());
                resolved
            }
            _ => {
                let resolved = resolve_secret(name.as_str())?;
                debug!("Interpolated secret: {} -> [REDACTED]", name.as_str());
                resolved
            }
        };
        result.push_str(&value[last..whole.start()]);
        result.push_str(&resolved);
        last = whole.end();
    }
    result.push_str(&value[last..]);
    Ok(result)
}

/// Resolve a secret using the configured secrets backend.
pub fn resolve_secret(name: &str) -> Result<String, InterpolationError> {
    match secrets_backend() {
        SecretsBackend::Environment => std::env::var(name).map_err(|error| InterpolationError::MissingSecret {
            name: name.to_string(),
            error: error.to_string(),
        }),
        SecretsBackend::Keychain => {
            let keyring = keyring::Entry::new(SERVICE, name).map_err(|e| InterpolationError::KeyringError {
                name: name.to_string(),
                error: e.to_string(),
            })?;

            keyring.get_password().map_err(|e| InterpolationError::MissingSecret {
                name: name.to_string(),
                error: e.to_string(),
            })
        }
    }
}

/// Errors that can occur during interpolation.
#[derive(Debug, Error, Clone)]
pub enum InterpolationError {
    #[error("Missing environment variable: {name}")]
    MissingEnvVar { name: String },

    #[error("Missing secret: {name} - {error}")]
    MissingSecret { name: String, error: String },

    #[error("Keyring error for {name}: {error}")]
    KeyringError { name: String, error: String },

    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}
