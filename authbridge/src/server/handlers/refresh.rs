use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::common::{ProviderTokenSet, RefreshRequest};
use crate::server::{error::RefreshError, AppState};

/// Refreshes provider tokens only; the app token is left as issued.
#[tracing::instrument(name = "refresh_token", skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<ProviderTokenSet>, RefreshError> {
    let Json(req) = payload.map_err(|e| RefreshError::InvalidRequest(e.body_text()))?;

    tracing::debug!("Token refresh requested");

    let tokens = state
        .identity_provider
        .refresh_access_token(&req.refresh_token)
        .await?;

    tracing::info!("Token refresh successful");

    Ok(Json(tokens))
}
