use axum::{extract::{State, Json}, response::IntoResponse, http::StatusCode, Extension};
use axum::extract::rejection::JsonRejection;
use crate::dto::auth_dto::{AdminCredentialsRequest, AdminSummary, LoginResponse};
use crate::handler::json_body;
use crate::model::admin::AdminRole;
use crate::service::admin_service::{AdminServiceImpl, AdminService};
use crate::util::error::HandlerError;
use crate::util::jwt::Claims;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

fn credentials(payload: AdminCredentialsRequest) -> Result<(String, String), HandlerError> {
    match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => Ok((email, password)),
        _ => Err(HandlerError::bad_request("Email and password are required")),
    }
}

// Register
pub async fn register_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    payload: Result<Json<AdminCredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let payload = json_body(payload)?.trimmed();
    if let Err(e) = payload.validate() {
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    let (email, password) = credentials(payload)?;
    let admin = service.register(email, password, AdminRole::Admin).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Admin registered successfully",
            "admin": AdminSummary::from(admin),
        })),
    ))
}

// Login
pub async fn login_handler(
    State(service): State<Arc<AdminServiceImpl>>,
    payload: Result<Json<AdminCredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    // Presence only: an unknown identifier of any shape is a failed lookup.
    let (email, password) = credentials(json_body(payload)?.trimmed())?;
    let issued = service.login(email, password).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token: issued.token,
        token_type: issued.token_type,
        expires_in: issued.expires_in,
    }))
}

// Protected smoke route, claims are set by the bearer middleware
pub async fn protected_handler(
    Extension(claims): Extension<Claims>,
) -> impl IntoResponse {
    Json(json!({
        "message": "Access granted to protected route",
        "admin": claims,
    }))
}

pub async fn test_handler() -> impl IntoResponse {
    Json(json!({ "message": "Admin routes are working" }))
}
