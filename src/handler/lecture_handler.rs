use axum::{extract::{State, Path, Multipart}, response::IntoResponse, Json, http::StatusCode};
use crate::dto::lecture_dto::{LectureForm, LectureResponse};
use crate::handler::parse_object_id;
use crate::service::lecture_service::{LectureServiceImpl, LectureService};
use crate::util::error::HandlerError;
use crate::util::upload::UploadedFile;
use bytes::BytesMut;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

/// Reads a lecture multipart form. Unknown fields are skipped; file fields
/// are buffered in memory and capped by the router's body limit.
async fn read_lecture_form(mut multipart: Multipart) -> Result<LectureForm, HandlerError> {
    let mut form = LectureForm::default();

    while let Some(mut field) = multipart.next_field().await.map_err(|e| {
        error!("[read_lecture_form] Error getting next field: {}", e);
        HandlerError::bad_request(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if let Some(filename) = field.file_name().map(|s| s.to_string()) {
            // An untouched file input arrives as a part with an empty filename.
            if filename.is_empty() {
                debug!("[read_lecture_form] Skipping empty file input {}", name);
                continue;
            }
            let mut buf = BytesMut::new();
            while let Some(chunk) = field.chunk().await.map_err(|e| {
                error!("[read_lecture_form] Error reading file chunk: {}", e);
                HandlerError::bad_request(format!("Failed to read file chunk: {}", e))
            })? {
                buf.extend_from_slice(&chunk);
            }
            debug!("[read_lecture_form] Received file {} for {} ({} bytes)", filename, name, buf.len());
            let file = UploadedFile {
                original_name: filename,
                content: buf.freeze(),
            };
            if !form.set_file_field(&name, file) {
                debug!("[read_lecture_form] Ignoring file field {}", name);
            }
        } else {
            let value = field.text().await.map_err(|e| {
                HandlerError::bad_request(format!("Failed to read field {}: {}", name, e))
            })?;
            if !form.set_text_field(&name, value) {
                debug!("[read_lecture_form] Ignoring field {}", name);
            }
        }
    }

    Ok(form)
}

// Handler: Create Lecture
pub async fn create_lecture_handler(
    State(service): State<Arc<LectureServiceImpl>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    let form = read_lecture_form(multipart).await?;
    let lecture = service.create(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Lecture created successfully",
            "lecture": LectureResponse::from(lecture),
        })),
    ))
}

// Handler: List Lectures
pub async fn list_lectures_handler(
    State(service): State<Arc<LectureServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let lectures = service.list().await?;
    Ok(Json(lectures))
}

// Handler: Get Lecture
pub async fn get_lecture_handler(
    State(service): State<Arc<LectureServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "lecture")?;
    let lecture = service.get(id).await?;
    Ok(Json(LectureResponse::from(lecture)))
}

// Handler: Update Lecture
pub async fn update_lecture_handler(
    State(service): State<Arc<LectureServiceImpl>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "lecture")?;
    let form = read_lecture_form(multipart).await?;
    let lecture = service.update(id, form).await?;
    Ok(Json(json!({
        "message": "Lecture updated successfully",
        "lecture": LectureResponse::from(lecture),
    })))
}

// Handler: Delete Lecture
pub async fn delete_lecture_handler(
    State(service): State<Arc<LectureServiceImpl>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "lecture")?;
    service.delete(id).await?;
    Ok(Json(json!({ "message": "Lecture deleted successfully" })))
}
