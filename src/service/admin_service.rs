use tracing::{info, error, warn, instrument};
use crate::repository::admin_repo::AdminRepository;
use crate::repository::repository_error::RepositoryError;
use crate::util::jwt::{IssuedToken, JwtTokenUtils, JwtTokenUtilsImpl};
use crate::util::password::{PasswordUtilsImpl, PasswordUtils};
use crate::util::time::now_timestamp;
use std::sync::Arc;

use crate::model::admin::{normalize_email, Admin, AdminRole};
use crate::util::error::ServiceError;
use async_trait::async_trait;

#[async_trait]
pub trait AdminService: Send + Sync {
    async fn register(&self, email: String, password: String, role: AdminRole) -> Result<Admin, ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<IssuedToken, ServiceError>;
    /// Creates the configured superadmin unless an admin with that email exists.
    async fn ensure_seed_admin(&self, email: String, password: String) -> Result<bool, ServiceError>;
}


pub struct AdminServiceImpl {
    pub admin_repo: Arc<dyn AdminRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl AdminServiceImpl {
    pub fn new(admin_repo: Arc<dyn AdminRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self { admin_repo, jwt_utils }
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn register(&self, email: String, password: String, role: AdminRole) -> Result<Admin, ServiceError> {
        info!("Registering new admin");
        let email = normalize_email(&email);

        if self.admin_repo.find_by_email(&email).await?.is_some() {
            warn!("Admin already exists");
            return Err(ServiceError::Conflict("Admin already exists".to_string()));
        }

        let hash = PasswordUtilsImpl::hash_password(&password)
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        // A concurrent registration can pass the check above; the unique
        // index turns the second insert into AlreadyExists.
        match self.admin_repo.insert(Admin::new(&email, hash, role)).await {
            Ok(admin) => {
                info!("Admin registered successfully");
                Ok(admin)
            }
            Err(RepositoryError::AlreadyExists(_)) => {
                warn!("Admin registration lost a duplicate-key race");
                Err(ServiceError::Conflict("Admin already exists".to_string()))
            }
            Err(e) => {
                error!("Failed to insert admin: {e}");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<IssuedToken, ServiceError> {
        info!("Admin login attempt");
        let email = normalize_email(&email);
        let admin = self.admin_repo.find_by_email(&email).await?
            .ok_or_else(|| ServiceError::NotFound("Admin not found".to_string()))?;

        let valid = PasswordUtilsImpl::verify_password(&password, &admin.password_hash)
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            warn!("Invalid credentials");
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        let admin_id = admin.id
            .ok_or_else(|| ServiceError::InternalError("Stored admin has no id".to_string()))?;
        let token = self.jwt_utils
            .generate_access_token(&admin_id.to_hex(), &admin.email, admin.role.as_str())
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;

        if let Err(e) = self.admin_repo.record_login(&admin_id, &now_timestamp()).await {
            warn!("Failed to record last login: {e}");
        }

        info!("Admin logged in successfully");
        Ok(token)
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn ensure_seed_admin(&self, email: String, password: String) -> Result<bool, ServiceError> {
        match self.register(email, password, AdminRole::Superadmin).await {
            Ok(_) => Ok(true),
            Err(ServiceError::Conflict(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
