//! Configuration IO helpers.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::config_dir;
use payline_util::expand_tilde;
use tracing::debug;

use crate::config::{ConfigError, PaylineConfig, interpolate_config, validate_config};

pub const CONFIG_PATH_ENV_VAR: &str = "PAYLINE_CONFIG_PATH";

/// Returns the default path for the configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("payline").join("config.json")
}

/// Loads configuration from the default path.
pub fn load_config() -> Result<PaylineConfig, ConfigError> {
    let path = default_config_path();
    load_config_from_path(&path)
}

/// Loads configuration from `path`, then applies environment overrides.
///
/// A missing file is not an error: the defaults plus environment are used.
pub fn load_config_from_path(path: &Path) -> Result<PaylineConfig, ConfigError> {
    let mut config = if path.exists() {
        let content = fs::read_to_string(path)?;
        let mut config: PaylineConfig = serde_json::from_str(&content)?;
        interpolate_config(&mut config)?;
        config
    } else {
        debug!(path = %path.display(), "no configuration file; using environment only");
        PaylineConfig::default()
    };

    apply_env_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

/// Overwrite config values with any non-blank `PAYLINE_*` environment variables.
pub fn apply_env_overrides(config: &mut PaylineConfig) {
    let targets = [
        ("PAYLINE_ACCOUNT_CODE", &mut config.account_code),
        ("PAYLINE_PUBLIC_API_KEY", &mut config.public_api_key),
        ("PAYLINE_PRIVATE_SECRET_KEY", &mut config.private_secret_key),
        ("PAYLINE_API_BASE", &mut config.api_base_url),
        ("PAYLINE_DOCS_BASE", &mut config.docs_base_url),
    ];
    for (name, field) in targets {
        if let Ok(value) = env::var(name)
            && !value.trim().is_empty()
        {
            debug!(variable = name, "configuration value overridden from environment");
            *field = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const UNSET: [(&str, Option<&str>); 5] = [
        ("PAYLINE_ACCOUNT_CODE", None),
        ("PAYLINE_PUBLIC_API_KEY", None),
        ("PAYLINE_PRIVATE_SECRET_KEY", None),
        ("PAYLINE_API_BASE", None),
        ("PAYLINE_DOCS_BASE", None),
    ];

    #[test]
    fn default_path_honors_environment_override() {
        let override_path = "~/custom/payline/config.json";
        temp_env::with_var(CONFIG_PATH_ENV_VAR, Some(override_path), || {
            let path = default_config_path();
            assert_eq!(path, expand_tilde(override_path));
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        let directory = tempfile::tempdir().expect("tempdir");
        temp_env::with_vars(UNSET, || {
            let config = load_config_from_path(&directory.path().join("absent.json")).expect("load");
            assert_eq!(config, PaylineConfig::default());
            assert!(config.credentials().is_none());
        });
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"accountCode": "file-acct", "publicApiKey": "file-pk", "privateSecretKey": "file-sk"}}"#
        )
        .expect("write config");

        let mut vars = UNSET;
        vars[0].1 = Some("env-acct");
        vars[3].1 = Some("http://127.0.0.1:9999");
        temp_env::with_vars(vars, || {
            let config = load_config_from_path(file.path()).expect("load");
            assert_eq!(config.account_code.as_deref(), Some("env-acct"));
            assert_eq!(config.public_api_key.as_deref(), Some("file-pk"));
            assert_eq!(config.api_base_url.as_deref(), Some("http://127.0.0.1:9999"));
        });
    }

    #[test]
    fn invalid_json_is_reported() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{ not json").expect("write config");
        temp_env::with_vars(UNSET, || {
            assert!(matches!(load_config_from_path(file.path()), Err(ConfigError::Json(_))));
        });
    }
}
