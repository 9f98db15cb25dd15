mod google;
mod refresh;

pub use google::google_auth;
pub use refresh::refresh_token;

use crate::server::error::ServerError;
use crate::server::models::{HealthResponse, LogoutResponse};
use axum::Json;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Tokens are stateless, so there is nothing to revoke here.
pub async fn logout() -> Json<LogoutResponse> {
    tracing::debug!("Logout acknowledged");
    Json(LogoutResponse { success: true })
}

pub async fn route_not_found() -> ServerError {
    ServerError::RouteNotFound
}
