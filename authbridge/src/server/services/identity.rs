use async_trait::async_trait;
use thiserror::Error;

use crate::common::{ProviderTokenSet, UserProfile};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Token request failed: {0}")]
    TokenRequest(String),

    #[error("Userinfo request failed: {0}")]
    UserInfo(#[from] reqwest::Error),

    #[error("Invalid provider configuration: {0}")]
    Configuration(String),
}

/// The identity provider side of the login flow.
///
/// Each call is one outbound request; nothing is cached between calls.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a single-use authorization code for provider tokens
    async fn exchange_code(&self, code: &str) -> Result<ProviderTokenSet, ProviderError>;

    /// Fetch the profile of the user owning `access_token`
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, ProviderError>;

    /// Obtain a fresh access token from a refresh token
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<ProviderTokenSet, ProviderError>;
}
