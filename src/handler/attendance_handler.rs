use axum::{extract::{State, Json}, response::IntoResponse, http::StatusCode};
use axum::extract::rejection::JsonRejection;
use crate::dto::attendance_dto::{AttendanceRecordResponse, MarkAttendanceRequest, NewAttendance};
use crate::handler::json_body;
use crate::service::attendance_service::{AttendanceServiceImpl, AttendanceService};
use crate::util::error::HandlerError;
use serde_json::json;
use std::sync::Arc;

pub async fn mark_attendance_handler(
    State(service): State<Arc<AttendanceServiceImpl>>,
    payload: Result<Json<MarkAttendanceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let attendance = NewAttendance::try_from(json_body(payload)?).map_err(HandlerError::bad_request)?;
    let record = service.mark(attendance).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Attendance marked successfully",
            "attendanceRecord": AttendanceRecordResponse::from(record),
        })),
    ))
}
