use crate::config::{required_var, ConfigError};

/// Credentials of the superadmin created on first start.
#[derive(Debug, Clone)]
pub struct AdminUserConfig {
    pub email: String,
    pub password: String,
}

impl AdminUserConfig {
    /// Both `ADMIN_EMAIL` and `ADMIN_PASSWORD` must be set and non-empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = AdminUserConfig {
            email: required_var("ADMIN_EMAIL")?,
            password: required_var("ADMIN_PASSWORD")?,
        };
        if config.email.trim().is_empty() || config.password.is_empty() {
            return Err(ConfigError::ValidationError("ADMIN_EMAIL and ADMIN_PASSWORD cannot be empty".to_string()));
        }
        Ok(config)
    }
}
