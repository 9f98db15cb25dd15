use async_trait::async_trait;
use chrono::Utc;
use oauth2::{
    basic::{
        BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
        BasicTokenType,
    },
    AuthType, AuthorizationCode, Client, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
    ExtraTokenFields, HttpRequest, HttpResponse, RefreshToken, RequestTokenError,
    StandardRevocableToken, StandardTokenResponse, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};

use crate::common::{ProviderTokenSet, UserProfile};
use crate::server::config::OAuthConfiguration;
use crate::server::services::identity::{IdentityProvider, ProviderError};

// Simple async HTTP client for OAuth2
async fn http_client(request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let mut builder = client
        .request(request.method().clone(), request.uri().to_string())
        .body(request.body().clone());

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    let response = builder.send().await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    let mut http_response = HttpResponse::new(body);
    *http_response.status_mut() = status;
    *http_response.headers_mut() = headers;

    Ok(http_response)
}

/// Google returns an OpenID Connect `id_token` next to the standard fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleTokenFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl ExtraTokenFields for GoogleTokenFields {}

type GoogleTokenResponse = StandardTokenResponse<GoogleTokenFields, BasicTokenType>;

type GoogleClient = Client<
    BasicErrorResponse,
    GoogleTokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

impl From<RequestTokenError<reqwest::Error, BasicErrorResponse>> for ProviderError {
    fn from(err: RequestTokenError<reqwest::Error, BasicErrorResponse>) -> Self {
        ProviderError::TokenRequest(err.to_string())
    }
}

pub struct OAuthClient {
    client: GoogleClient,
    redirect_uri: String,
    userinfo_url: String,
    http: reqwest::Client,
}

impl OAuthClient {
    pub fn new(config: &OAuthConfiguration) -> Result<Self, ProviderError> {
        let token_url = TokenUrl::new(config.token_url.clone())
            .map_err(|e| ProviderError::Configuration(format!("Invalid token URL: {}", e)))?;

        let client: GoogleClient = Client::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_type(AuthType::RequestBody)
            .set_token_uri(token_url);

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ProviderError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            redirect_uri: config.redirect_uri.clone(),
            userinfo_url: config.userinfo_url.clone(),
            http,
        })
    }
}

#[async_trait]
impl IdentityProvider for OAuthClient {
    /// Exchange authorization code for provider tokens.
    ///
    /// The redirect URI goes out as a raw form field: `postmessage` is not a URL.
    async fn exchange_code(&self, code: &str) -> Result<ProviderTokenSet, ProviderError> {
        let token_result = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .add_extra_param("redirect_uri", self.redirect_uri.clone())
            .request_async(&http_client)
            .await?;

        let tokens = into_token_set(&token_result, None);

        tracing::debug!(
            has_refresh_token = tokens.refresh_token.is_some(),
            expiry_date = ?tokens.expiry_date,
            "Exchanged authorization code"
        );

        Ok(tokens)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, ProviderError> {
        let profile = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<UserProfile>()
            .await?;

        tracing::debug!("Fetched user profile");

        Ok(profile)
    }

    /// Refresh an access token; the provider usually omits `refresh_token`
    /// here, so the presented one is carried over.
    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<ProviderTokenSet, ProviderError> {
        let token_result = self
            .client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
            .request_async(&http_client)
            .await?;

        let tokens = into_token_set(&token_result, Some(refresh_token));

        tracing::debug!(expiry_date = ?tokens.expiry_date, "Refreshed provider tokens");

        Ok(tokens)
    }
}

fn into_token_set(
    token_result: &GoogleTokenResponse,
    presented_refresh_token: Option<&str>,
) -> ProviderTokenSet {
    let refresh_token = token_result
        .refresh_token()
        .map(|t| t.secret().to_string())
        .or_else(|| presented_refresh_token.map(str::to_string));

    let scope = token_result
        .scopes()
        .map(|scopes| {
            scopes
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();

    let token_type = match token_result.token_type() {
        BasicTokenType::Bearer => "Bearer".to_string(),
        BasicTokenType::Mac => "MAC".to_string(),
        BasicTokenType::Extension(other) => other.clone(),
    };

    let expiry_date = token_result
        .expires_in()
        .and_then(|expires_in| chrono::Duration::from_std(expires_in).ok())
        .map(|expires_in| (Utc::now() + expires_in).timestamp_millis());

    ProviderTokenSet {
        access_token: token_result.access_token().secret().to_string(),
        refresh_token,
        scope,
        token_type,
        id_token: token_result.extra_fields().id_token.clone(),
        expiry_date,
    }
}
