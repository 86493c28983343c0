use tracing::{debug, error, info};

use crate::config::{parsed_var_or, required_var, ConfigError};

const MIN_SECRET_LEN: usize = 32;

/// Signing settings for admin access tokens.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub jwt_secret: String,
    /// Access token expiration time in minutes
    pub access_token_expiration: i64,
}

impl JwtConfig {
    /// Reads `JWT_SECRET` (required, at least 32 characters) and
    /// `JWT_ACCESS_TOKEN_EXPIRY` in minutes (defaults to 60).
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading JWT configuration from environment variables");

        let config = JwtConfig {
            jwt_secret: required_var("JWT_SECRET")?,
            access_token_expiration: parsed_var_or("JWT_ACCESS_TOKEN_EXPIRY", 60)?,
        };
        debug!(
            "JWT secret loaded ({} chars), tokens live {} minutes",
            config.jwt_secret.len(),
            config.access_token_expiration
        );

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            error!("JWT secret is too short (minimum {} characters required)", MIN_SECRET_LEN);
            return Err(ConfigError::ValidationError(format!(
                "JWT secret must be at least {} characters long",
                MIN_SECRET_LEN
            )));
        }

        if self.access_token_expiration <= 0 {
            return Err(ConfigError::ValidationError("JWT_ACCESS_TOKEN_EXPIRY must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// JWT configuration for tests and local development
impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            jwt_secret: "lecturehub_development_secret_key_long_enough_for_hs256".to_string(),
            access_token_expiration: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiration, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = JwtConfig {
            jwt_secret: "short".to_string(),
            access_token_expiration: 60,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_expiry_rejected() {
        let mut config = JwtConfig::default();
        config.access_token_expiration = 0;
        assert!(config.validate().is_err());
    }
}
