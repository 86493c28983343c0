use axum::{Router, routing::post};
use crate::handler::student_handler::student_login_handler;
use crate::service::student_service::StudentServiceImpl;
use std::sync::Arc;

pub fn student_router(service: Arc<StudentServiceImpl>) -> Router {
    Router::new()
        .route("/student/login", post(student_login_handler))
        .with_state(service)
}
