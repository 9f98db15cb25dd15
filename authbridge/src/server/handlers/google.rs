use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::common::{AuthResponse, ExchangeRequest};
use crate::server::{error::ExchangeError, AppState};

#[tracing::instrument(name = "google_auth", skip_all)]
pub async fn google_auth(
    State(state): State<AppState>,
    payload: Result<Json<ExchangeRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ExchangeError> {
    let Json(req) = payload.map_err(|e| ExchangeError::InvalidRequest(e.body_text()))?;

    state.token_issuer.ensure_configured()?;

    // Exchange code for provider tokens
    let google_tokens = state.identity_provider.exchange_code(&req.code).await?;

    // Fetch the profile with the fresh access token
    let user = state
        .identity_provider
        .fetch_profile(&google_tokens.access_token)
        .await?;

    let app_token = state.token_issuer.issue(&user.email, &user.name)?;

    tracing::info!("Authentication successful");

    Ok(Json(AuthResponse {
        user,
        google_tokens,
        app_token,
    }))
}
