use axum::{Router, routing::get, extract::DefaultBodyLimit};
use crate::handler::class_handler::list_classes_handler;
use crate::handler::lecture_handler::{
    create_lecture_handler,
    list_lectures_handler,
    get_lecture_handler,
    update_lecture_handler,
    delete_lecture_handler,
};
use crate::service::lecture_service::LectureServiceImpl;
use std::sync::Arc;

/// Lecture CRUD plus the class listing derived from lectures.
pub fn lecture_router(service: Arc<LectureServiceImpl>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/lectures", get(list_lectures_handler).post(create_lecture_handler))
        .route(
            "/lectures/{id}",
            get(get_lecture_handler)
                .put(update_lecture_handler)
                .delete(delete_lecture_handler),
        )
        .route("/classes", get(list_classes_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(service)
}
