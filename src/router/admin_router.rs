use axum::{Router, routing::{get, post}, middleware};
use crate::handler::admin_handler::{
    register_handler,
    login_handler,
    protected_handler,
    test_handler,
};
use std::sync::Arc;
use crate::service::admin_service::AdminServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

pub fn admin_router(service: Arc<AdminServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // Public auth routes
    let public = Router::new()
        .route("/admin/register", post(register_handler))
        .route("/admin/login", post(login_handler))
        .route("/admin/test", get(test_handler));

    // Bearer-protected routes
    let admin = Router::new()
        .route("/admin/protected", get(protected_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state, admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
