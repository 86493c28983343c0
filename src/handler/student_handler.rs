use axum::{extract::{State, Json}, response::IntoResponse};
use axum::extract::rejection::JsonRejection;
use crate::dto::auth_dto::{StudentLoginRequest, StudentSummary};
use crate::handler::json_body;
use crate::service::student_service::{StudentServiceImpl, StudentService};
use crate::util::error::HandlerError;
use serde_json::json;
use std::sync::Arc;

pub async fn student_login_handler(
    State(service): State<Arc<StudentServiceImpl>>,
    payload: Result<Json<StudentLoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = json_body(payload)?;
    let student = service.login(payload.roll_number, payload.name).await?;
    Ok(Json(json!({
        "message": "Login successful",
        "student": StudentSummary::from(student),
    })))
}
