use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::server::{error::handle_panic, handlers, AppState};

const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Build the HTTP API.
///
/// Unknown paths and unsupported methods both answer with the 404 body.
pub fn router(state: AppState, allowed_origin: HeaderValue) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/auth/google", post(handlers::google_auth))
        .route("/auth/google/refresh-token", post(handlers::refresh_token))
        .route("/auth/logout", post(handlers::logout))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::route_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allowed_origin))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
