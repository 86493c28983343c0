use axum::{Router, routing::post};
use crate::handler::attendance_handler::mark_attendance_handler;
use crate::service::attendance_service::AttendanceServiceImpl;
use std::sync::Arc;

pub fn attendance_router(service: Arc<AttendanceServiceImpl>) -> Router {
    Router::new()
        .route("/class-attendance/mark", post(mark_attendance_handler))
        .with_state(service)
}
