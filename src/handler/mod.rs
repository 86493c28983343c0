pub mod admin_handler;
pub mod student_handler;
pub mod lecture_request_handler;
pub mod lecture_handler;
pub mod class_handler;
pub mod attendance_handler;

use crate::util::error::HandlerError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use bson::oid::ObjectId;

/// Parses a path or query id, mapping malformed values to Bad Request.
pub(crate) fn parse_object_id(raw: &str, what: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| HandlerError::bad_request(format!("Invalid {} id", what)))
}

/// Unwraps a JSON body; syntax and shape errors become Bad Request.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HandlerError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| HandlerError::bad_request(rejection.body_text()))
}

/// Like [`json_body`] for routes whose body may be omitted entirely.
pub(crate) fn optional_json_body<T>(payload: Result<Option<Json<T>>, JsonRejection>) -> Result<Option<T>, HandlerError> {
    payload
        .map(|body| body.map(|Json(body)| body))
        .map_err(|rejection| HandlerError::bad_request(rejection.body_text()))
}
