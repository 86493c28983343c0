use axum::{extract::{State, Path, Json}, response::IntoResponse, http::StatusCode};
use axum::extract::rejection::JsonRejection;
use crate::dto::lecture_request_dto::{DecisionRequest, LectureRequestResponse, SubmitLectureRequest};
use crate::handler::{json_body, optional_json_body, parse_object_id};
use crate::service::lecture_request_service::{LectureRequestServiceImpl, LectureRequestService};
use crate::util::error::HandlerError;
use serde_json::json;
use std::sync::Arc;

// Handler: Submit Lecture Request (public)
pub async fn submit_lecture_request_handler(
    State(service): State<Arc<LectureRequestServiceImpl>>,
    payload: Result<Json<SubmitLectureRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = json_body(payload)?;
    let created = service.submit(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Lecture request submitted successfully",
            "request": LectureRequestResponse::from(created),
        })),
    ))
}

// Handler: List Lecture Requests (admin only)
pub async fn list_lecture_requests_handler(
    State(service): State<Arc<LectureRequestServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let requests = service.list().await?;
    let dtos: Vec<LectureRequestResponse> = requests.into_iter().map(LectureRequestResponse::from).collect();
    Ok(Json(dtos))
}

// Handler: Approve Lecture Request (admin only)
pub async fn approve_lecture_request_handler(
    State(service): State<Arc<LectureRequestServiceImpl>>,
    Path(id): Path<String>,
    payload: Result<Option<Json<DecisionRequest>>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "lecture request")?;
    let comments = optional_json_body(payload)?.and_then(|body| body.admin_comments);
    let updated = service.approve(id, comments).await?;
    Ok(Json(json!({
        "message": "Lecture request approved",
        "request": LectureRequestResponse::from(updated),
    })))
}

// Handler: Reject Lecture Request (admin only)
pub async fn reject_lecture_request_handler(
    State(service): State<Arc<LectureRequestServiceImpl>>,
    Path(id): Path<String>,
    payload: Result<Option<Json<DecisionRequest>>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = parse_object_id(&id, "lecture request")?;
    let comments = optional_json_body(payload)?.and_then(|body| body.admin_comments);
    let updated = service.reject(id, comments).await?;
    Ok(Json(json!({
        "message": "Lecture request rejected",
        "request": LectureRequestResponse::from(updated),
    })))
}
