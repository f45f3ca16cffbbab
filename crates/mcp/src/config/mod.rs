//! Server configuration.
//! Loads `<config_dir>/payline/config.json`, resolves placeholders and
//! applies `PAYLINE_*` environment overrides.

mod interpolation;
mod io;
mod model;
mod validation;

pub use interpolation::interpolate_config;
pub use io::{CONFIG_PATH_ENV_VAR, apply_env_overrides, default_config_path, load_config, load_config_from_path};
pub use model::{ConfigError, HttpServerConfig, PaylineConfig};
pub use validation::{ValidationError, validate_config};
