use axum::{Router, routing::{get, post, put}, middleware};
use crate::handler::lecture_request_handler::{
    submit_lecture_request_handler,
    list_lecture_requests_handler,
    approve_lecture_request_handler,
    reject_lecture_request_handler,
};
use std::sync::Arc;
use crate::service::lecture_request_service::LectureRequestServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

pub fn lecture_request_router(service: Arc<LectureRequestServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // Public route
    let public = Router::new()
        .route("/lecture-requests", post(submit_lecture_request_handler));

    // Admin-protected routes
    let admin = Router::new()
        .route("/lecture-requests", get(list_lecture_requests_handler))
        .route("/lecture-requests/{id}/approve", put(approve_lecture_request_handler))
        .route("/lecture-requests/{id}/reject", put(reject_lecture_request_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
