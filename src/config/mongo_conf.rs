use tracing::{debug, info};

use crate::config::{parsed_var_or, required_var, ConfigError};

/// Connection settings for the lecture store.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Credentials are only applied when both are set
    pub username: Option<String>,
    pub password: Option<String>,
    pub pool_size: u32,
    /// Used for both connect and server selection
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Reads `MONGO_URI` and `MONGO_DATABASE` (required), `MONGO_USERNAME`,
    /// `MONGO_PASSWORD`, `MONGO_POOL_SIZE` and `MONGO_CONNECTION_TIMEOUT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading MongoDB configuration from environment variables");

        let config = MongoConfig {
            uri: required_var("MONGO_URI")?,
            database: required_var("MONGO_DATABASE")?,
            username: std::env::var("MONGO_USERNAME").ok(),
            password: std::env::var("MONGO_PASSWORD").ok(),
            pool_size: parsed_var_or("MONGO_POOL_SIZE", 10)?,
            connection_timeout_secs: parsed_var_or("MONGO_CONNECTION_TIMEOUT", 5)?,
        };
        debug!(
            database = %config.database,
            authenticated = config.username.is_some(),
            pool_size = config.pool_size,
            "MongoDB settings read"
        );

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

        if self.uri.trim().is_empty() {
            return invalid("MONGO_URI cannot be empty");
        }
        if self.database.trim().is_empty() {
            return invalid("MONGO_DATABASE cannot be empty");
        }
        if self.pool_size == 0 {
            return invalid("MONGO_POOL_SIZE must be greater than 0");
        }
        if self.connection_timeout_secs == 0 {
            return invalid("MONGO_CONNECTION_TIMEOUT must be greater than 0");
        }
        match (&self.username, &self.password) {
            (Some(user), _) if user.is_empty() => invalid("MONGO_USERNAME cannot be empty if set"),
            (_, Some(pass)) if pass.is_empty() => invalid("MONGO_PASSWORD cannot be empty if set"),
            (Some(_), None) | (None, Some(_)) => invalid("MONGO_USERNAME and MONGO_PASSWORD must be set together"),
            _ => Ok(()),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://127.0.0.1:27017".to_string(),
            database: "lecturehub".to_string(),
            username: None,
            password: None,
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
