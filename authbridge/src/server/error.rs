use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;

use crate::server::services::{ProviderError, TokenError};

const AUTHENTICATION_FAILED: &str = "Authentication Failed!.";
const REFRESH_FAILED: &str = "Failed to refresh token";
const ROUTE_NOT_FOUND: &str = "Route not found";
const INTERNAL_ERROR: &str = "Internal Server Error";

/// Failures of `POST /auth/google`
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider exchange failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("App token issuance failed: {0}")]
    Token(#[from] TokenError),
}

impl IntoResponse for ExchangeError {
    fn into_response(self) -> Response {
        match &self {
            ExchangeError::Token(TokenError::MissingSecret) => {
                tracing::error!(error = %self, "Signing secret is not configured");
            }
            _ => {
                tracing::warn!(error = %self, "Authentication failed");
            }
        }

        let body = Json(json!({
            "message": AUTHENTICATION_FAILED,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Failures of `POST /auth/google/refresh-token`
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Provider refresh failed: {0}")]
    Provider(#[from] ProviderError),
}

impl IntoResponse for RefreshError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Token refresh failed");

        let body = Json(json!({
            "message": REFRESH_FAILED,
        }));

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Failures outside any specific handler
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Route not found")]
    RouteNotFound,

    #[error("Unhandled error: {0}")]
    Unhandled(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::RouteNotFound => (StatusCode::NOT_FOUND, ROUTE_NOT_FOUND),
            ServerError::Unhandled(detail) => {
                tracing::error!(detail = %detail, "Unhandled server error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Last-resort handler for panics raised while serving a request
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ServerError::Unhandled(detail).into_response()
}
