use std::env;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{parsed_var_or, ConfigError};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory uploaded lecture images and banners are written to
    pub upload_dir: PathBuf,
    /// Request body cap for the multipart lecture routes
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parsed_var_or("APP_PORT", 5000u16)?;
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                debug!("UPLOAD_DIR not set, using default: uploads");
                PathBuf::from("uploads")
            });
        let max_upload_bytes = parsed_var_or("UPLOAD_MAX_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        let config = AppConfig { host, port, upload_dir, max_upload_bytes };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::ValidationError("APP_HOST cannot be empty".to_string()));
        }
        if self.upload_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("UPLOAD_DIR cannot be empty".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::ValidationError("UPLOAD_MAX_BYTES must be greater than 0".to_string()));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
