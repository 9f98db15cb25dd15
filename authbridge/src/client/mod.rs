pub mod auth_client;
mod config;
mod routing;
mod session;

pub use auth_client::{AuthClientError, ServerAuthClient};
pub use config::Settings;
pub use routing::Route;
pub use session::{ClientSession, SessionHandle, SessionProvider};

use crate::error::AuthError;

/// Complete a login from an authorization code.
///
/// Only the profile name is kept; the provider tokens and app token in the
/// response are dropped here. A profile without a name counts as a failed
/// login. On failure the session is left untouched.
pub async fn login(
    client: &ServerAuthClient,
    session: &SessionHandle,
    code: &str,
) -> Result<Route, AuthError> {
    let response = client.exchange_code(code).await?;

    if response.user.name.is_empty() {
        tracing::warn!("Profile has no name, staying signed out");
        return Err(AuthError::MissingDisplayName);
    }

    session.set_display_name(Some(response.user.name));
    tracing::info!("Signed in");

    Ok(Route::after_login())
}

/// Sign out locally, then tell the server.
///
/// Local state is cleared even when the server cannot be reached.
pub async fn logout(client: &ServerAuthClient, session: &SessionHandle) -> Route {
    session.logout();

    if let Err(e) = client.logout().await {
        tracing::warn!(error = %e, "Server logout failed");
    }

    Route::after_logout()
}
