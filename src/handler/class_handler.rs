use axum::{extract::{State, Query}, response::IntoResponse, Json};
use crate::handler::parse_object_id;
use crate::service::lecture_service::{LectureServiceImpl, LectureService};
use crate::util::error::HandlerError;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListQuery {
    pub exclude_attended_for_lecture: Option<String>,
}

pub async fn list_classes_handler(
    State(service): State<Arc<LectureServiceImpl>>,
    Query(query): Query<ClassListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let exclude = match query.exclude_attended_for_lecture.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(parse_object_id(raw, "lecture")?),
    };
    let classes = service.list_classes(exclude).await?;
    Ok(Json(classes))
}
