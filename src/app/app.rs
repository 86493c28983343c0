use axum::{Router, routing::get};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{info, warn, error};
use crate::config::{AdminUserConfig, AppConfig, ConfigError, JwtConfig, MongoConfig};
use crate::middlewares::admin_middleware::AdminAuthState;
use crate::repository::admin_repo::{AdminRepository, MongoAdminRepository};
use crate::repository::attendance_repo::{AttendanceRepository, MongoAttendanceRepository};
use crate::repository::lecture_repo::{LectureRepository, MongoLectureRepository};
use crate::repository::lecture_request_repo::{LectureRequestRepository, MongoLectureRequestRepository};
use crate::repository::mongo_store;
use crate::repository::repository_error::RepositoryError;
use crate::repository::student_repo::{MongoStudentRepository, StudentRepository};
use crate::router::admin_router::admin_router;
use crate::router::attendance_router::attendance_router;
use crate::router::lecture_request_router::lecture_request_router;
use crate::router::lecture_router::lecture_router;
use crate::router::student_router::student_router;
use crate::service::admin_service::{AdminService, AdminServiceImpl};
use crate::service::attendance_service::AttendanceServiceImpl;
use crate::service::lecture_request_service::LectureRequestServiceImpl;
use crate::service::lecture_service::LectureServiceImpl;
use crate::service::student_service::StudentServiceImpl;
use crate::util::jwt::JwtTokenUtilsImpl;
use crate::util::upload::{FileStorage, LocalFileStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("Repository setup error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Upload storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Repository handles the services are built from.
pub struct AppRepositories {
    pub admin_repo: Arc<dyn AdminRepository>,
    pub student_repo: Arc<dyn StudentRepository>,
    pub lecture_request_repo: Arc<dyn LectureRequestRepository>,
    pub lecture_repo: Arc<dyn LectureRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
}

pub struct AppServices {
    pub admin_service: Arc<AdminServiceImpl>,
    pub student_service: Arc<StudentServiceImpl>,
    pub lecture_request_service: Arc<LectureRequestServiceImpl>,
    pub lecture_service: Arc<LectureServiceImpl>,
    pub attendance_service: Arc<AttendanceServiceImpl>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl AppServices {
    pub fn new(repos: AppRepositories, jwt_config: JwtConfig, storage: Arc<dyn FileStorage>) -> Self {
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(jwt_config));
        AppServices {
            admin_service: Arc::new(AdminServiceImpl::new(repos.admin_repo, jwt_utils.clone())),
            student_service: Arc::new(StudentServiceImpl::new(repos.student_repo)),
            lecture_request_service: Arc::new(LectureRequestServiceImpl::new(repos.lecture_request_repo)),
            lecture_service: Arc::new(LectureServiceImpl::new(
                repos.lecture_repo.clone(),
                repos.attendance_repo.clone(),
                storage,
            )),
            attendance_service: Arc::new(AttendanceServiceImpl::new(repos.attendance_repo, repos.lecture_repo)),
            jwt_utils,
        }
    }
}

/// Full HTTP surface: the JSON API under `/api`, stored uploads under
/// `/uploads` and a plain liveness route.
pub fn build_router(services: &AppServices, upload_dir: &Path, max_upload_bytes: usize) -> Router {
    let admin_auth_state = Arc::new(AdminAuthState {
        jwt_utils: services.jwt_utils.clone(),
    });

    let api = Router::new()
        .merge(admin_router(services.admin_service.clone(), admin_auth_state.clone()))
        .merge(student_router(services.student_service.clone()))
        .merge(lecture_request_router(services.lecture_request_service.clone(), admin_auth_state))
        .merge(lecture_router(services.lecture_service.clone(), max_upload_bytes))
        .merge(attendance_router(services.attendance_service.clone()));

    Router::new()
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .route("/health", get(|| async { "OK" }))
}

pub struct App {
    config: AppConfig,
    router: Router,
    pub services: AppServices,
}

impl App {
    pub async fn new() -> Result<Self, StartupError> {
        let config = AppConfig::from_env()?;
        let jwt_config = JwtConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;

        let db = mongo_store::connect(&mongo_config).await?;

        let admin_repo = MongoAdminRepository::new(&db);
        admin_repo.ensure_indexes().await?;
        let student_repo = MongoStudentRepository::new(&db);
        student_repo.ensure_indexes().await?;
        let lecture_request_repo = MongoLectureRequestRepository::new(&db);
        lecture_request_repo.ensure_indexes().await?;
        let attendance_repo = MongoAttendanceRepository::new(&db);
        attendance_repo.ensure_indexes().await?;
        let lecture_repo = MongoLectureRepository::new(&db);
        info!("MongoDB indexes ensured");

        let storage = Arc::new(LocalFileStorage::new(config.upload_dir.clone()).await?);

        let repos = AppRepositories {
            admin_repo: Arc::new(admin_repo),
            student_repo: Arc::new(student_repo),
            lecture_request_repo: Arc::new(lecture_request_repo),
            lecture_repo: Arc::new(lecture_repo),
            attendance_repo: Arc::new(attendance_repo),
        };
        let services = AppServices::new(repos, jwt_config, storage);
        let router = build_router(&services, &config.upload_dir, config.max_upload_bytes);

        let app = App { config, router, services };
        app.create_first_admin_user().await;
        Ok(app)
    }

    pub async fn start(self) -> Result<(), StartupError> {
        let listener = tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        info!("🚀 Server running at http://{}", listener.local_addr()?);
        axum::serve(listener, self.router).await?;
        Ok(())
    }

    async fn create_first_admin_user(&self) {
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin seed config not loaded: {e}");
                return;
            }
        };

        match self.services.admin_service.ensure_seed_admin(admin_conf.email, admin_conf.password).await {
            Ok(true) => info!("First superadmin created."),
            Ok(false) => info!("Seed admin already exists, skipping creation."),
            Err(e) => error!("Failed to create seed admin: {e}"),
        }
    }
}
