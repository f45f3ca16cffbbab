//! `${env:NAME}` / `${secret:NAME}` interpolation over config string fields.

use payline_util::{InterpolationError, interpolate_string};
use tracing::debug;

use crate::config::PaylineConfig;

/// Resolve placeholders in every string field of `config`.
pub fn interpolate_config(config: &mut PaylineConfig) -> Result<(), InterpolationError> {
    let fields = [
        ("accountCode", &mut config.account_code),
        ("publicApiKey", &mut config.public_api_key),
        ("privateSecretKey", &mut config.private_secret_key),
        ("apiBaseUrl", &mut config.api_base_url),
        ("docsBaseUrl", &mut config.docs_base_url),
        ("httpServer.bindAddress", &mut config.http_server.bind_address),
    ];
    for (name, field) in fields {
        if let Some(value) = field.as_mut()
            && value.contains("${")
        {
            *value = interpolate_string(value)?;
            debug!(field = name, "interpolated configuration value");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_placeholders_are_resolved() {
        temp_env::with_var("PAYLINE_TEST_PUBLIC_KEY", Some("sandbox_pk_999"), || {
            let mut config = PaylineConfig {
                public_api_key: Some("${env:PAYLINE_TEST_PUBLIC_KEY}".into()),
                account_code: Some("acct-plain".into()),
                ..Default::default()
            };
            interpolate_config(&mut config).expect("interpolate");
            assert_eq!(config.public_api_key.as_deref(), Some("sandbox_pk_999"));
            assert_eq!(config.account_code.as_deref(), Some("acct-plain"));
        });
    }

    #[test]
    fn missing_env_var_is_an_error() {
        temp_env::with_var_unset("PAYLINE_TEST_MISSING", || {
            let mut config = PaylineConfig {
                private_secret_key: Some("${env:PAYLINE_TEST_MISSING}".into()),
                ..Default::default()
            };
            let error = interpolate_config(&mut config).expect_err("missing env var");
            assert!(matches!(error, InterpolationError::MissingEnvVar { .. }));
        });
    }
}
