mod models;

use crate::client::config::Settings;
use crate::common::{AuthResponse, ExchangeRequest, ProviderTokenSet, RefreshRequest};
use crate::error::AuthError;
pub use models::AuthClientError;
use models::ErrorBody;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};

/// HTTP client for the identity exchange service
pub struct ServerAuthClient {
    http_client: Client,
    server_url: String,
}

impl ServerAuthClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            server_url: server_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Load [`Settings`] from `client.toml` and the environment
    pub fn from_env() -> Result<Self, AuthError> {
        let settings = Settings::new()?;
        Self::from_settings(&settings)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AuthError> {
        settings.validate().map_err(AuthError::Configuration)?;
        Ok(Self::new(settings.server_url.clone()))
    }

    /// Trade an authorization code from the consent popup for the login bundle
    pub async fn exchange_code(&self, code: &str) -> Result<AuthResponse, AuthClientError> {
        let req = ExchangeRequest {
            code: code.to_string(),
        };

        self.post_json("/auth/google", &req).await
    }

    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<ProviderTokenSet, AuthClientError> {
        let req = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        self.post_json("/auth/google/refresh-token", &req).await
    }

    pub async fn logout(&self) -> Result<(), AuthClientError> {
        let url = format!("{}/auth/logout", self.server_url);
        let resp = self.http_client.post(&url).send().await?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }

        Ok(())
    }

    async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, AuthClientError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.server_url, path);
        let resp = self.http_client.post(&url).json(body).send().await?;

        if !resp.status().is_success() {
            return Err(rejection(resp).await);
        }

        Ok(resp.json::<Resp>().await?)
    }
}

async fn rejection(resp: reqwest::Response) -> AuthClientError {
    let status = resp.status();
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
    };

    AuthClientError::Rejected {
        status: status.as_u16(),
        message,
    }
}
