use axum::{http::Request, middleware::Next, response::Response, extract::State, body::Body};
use axum::http::header::AUTHORIZATION;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtilsImpl, JwtTokenUtils};

pub struct AdminAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

/// Bearer guard for admin routes. A missing header is 401; a header that
/// does not carry a valid, unexpired token is 403.
pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let Some(auth_header) = req.headers().get(AUTHORIZATION) else {
        debug!("Rejected request without Authorization header");
        return Err(HandlerError::unauthorized("No token provided"));
    };

    let claims = auth_header
        .to_str()
        .ok()
        .and_then(|header| state.jwt_utils.extract_token_from_header(header).ok())
        .and_then(|token| match state.jwt_utils.validate_access_token(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                warn!("Rejected bearer token: {}", e);
                None
            }
        })
        .ok_or_else(|| HandlerError::forbidden("Invalid or expired token"))?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
