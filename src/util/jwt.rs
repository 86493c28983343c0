use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use crate::config::JwtConfig;

/// JWT token claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (admin ID)
    pub sub: String,
    /// Admin email
    pub email: String,
    /// Admin role (admin, superadmin)
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

/// Signed access token plus the metadata returned to the client at login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    pub token_type: String,
}

/// Error types for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
}


pub trait JwtTokenUtils {
    fn generate_access_token(&self, admin_id: &str, email: &str, role: &str) -> Result<IssuedToken, JwtError>;
    fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {

    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl {
            jwt_config,
        }
    }

    fn encode_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        encode(&header, claims, &encoding_key).map_err(|err| {
            error!("Failed to encode JWT token: {}", err);
            JwtError::EncodingFailed(err.to_string())
        })
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {

    fn generate_access_token(&self, admin_id: &str, email: &str, role: &str) -> Result<IssuedToken, JwtError> {
        debug!("Generating access token for admin: {} with role: {}", admin_id, role);

        let now = Utc::now();
        let expires_in_minutes = self.jwt_config.access_token_expiration;
        let expiration = now + Duration::minutes(expires_in_minutes);

        let claims = Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = self.encode_claims(&claims)?;
        info!("Successfully generated access token for admin: {}", admin_id);
        Ok(IssuedToken {
            token,
            expires_in: expires_in_minutes * 60,
            token_type: "Bearer".to_string(),
        })
    }

    fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        debug!("Validating JWT token");

        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                let claims = token_data.claims;

                // Validation applies a leeway; the advertised lifetime is strict.
                if claims.exp < Utc::now().timestamp() {
                    warn!("Token has expired for admin: {}", claims.sub);
                    return Err(JwtError::TokenExpired);
                }

                debug!("Token validation successful for admin: {}", claims.sub);
                Ok(claims)
            }
            Err(err) if matches!(err.kind(), ErrorKind::ExpiredSignature) => {
                warn!("Token has expired");
                Err(JwtError::TokenExpired)
            }
            Err(err) => {
                warn!("Failed to decode JWT token: {}", err);
                Err(JwtError::DecodingFailed(err.to_string()))
            }
        }
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(JwtError::InvalidToken)?
            .trim();

        if token.is_empty() {
            warn!("Empty token in authorization header");
            return Err(JwtError::InvalidToken);
        }

        Ok(token.to_string())
    }
}
