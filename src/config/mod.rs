pub mod jwt_conf;
pub mod mongo_conf;
pub mod admin_user_conf;
pub mod app_conf;

pub use jwt_conf::JwtConfig;
pub use mongo_conf::MongoConfig;
pub use admin_user_conf::AdminUserConfig;
pub use app_conf::AppConfig;

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{error, warn};

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Reads a variable that has no default.
pub(crate) fn required_var(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| {
        error!("{} environment variable not found", key);
        ConfigError::EnvVarNotFound(key.to_string())
    })
}

/// Reads and parses a variable, falling back to `default` when it is unset.
/// A value that is set but does not parse is an error, never the default.
pub(crate) fn parsed_var_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            error!("Invalid {} value: {}", key, raw);
            ConfigError::InvalidValue(format!("Invalid {} value: {}", key, raw))
        }),
        Err(_) => {
            warn!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}
