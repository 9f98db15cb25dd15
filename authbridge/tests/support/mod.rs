#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::to_bytes, http::HeaderValue, response::Response, Router};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use authbridge::server::{
    config::TokenConfiguration,
    router,
    services::{IdentityProvider, ProviderError, TokenIssuer},
    AppState,
};
use authbridge::{ProviderTokenSet, UserProfile};

pub const VALID_CODE: &str = "validcode123";
/// Exchanges fine, but the profile comes back without a name
pub const NAMELESS_CODE: &str = "namelesscode456";
/// Makes the provider panic mid-request
pub const PANIC_CODE: &str = "paniccode789";
pub const PANIC_DETAIL: &str = "provider blew up holding client_secret=hunter2";
pub const VALID_REFRESH_TOKEN: &str = "1//valid-refresh";
pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Stands in for Google: one valid code, one valid refresh token
#[derive(Default)]
pub struct StubProvider {
    exchanges: AtomicUsize,
    refreshes: AtomicUsize,
}

impl StubProvider {
    pub fn exchanges(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }
}

fn token_set(access_token: String, refresh_token: Option<&str>) -> ProviderTokenSet {
    ProviderTokenSet {
        access_token,
        refresh_token: refresh_token.map(str::to_string),
        scope: "openid https://www.googleapis.com/auth/userinfo.email".to_string(),
        token_type: "Bearer".to_string(),
        id_token: Some("eyJhbGciOiJSUzI1NiJ9.e30.sig".to_string()),
        expiry_date: Some(1_700_000_000_000),
    }
}

#[async_trait]
impl IdentityProvider for StubProvider {
    async fn exchange_code(&self, code: &str) -> Result<ProviderTokenSet, ProviderError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);

        match code {
            VALID_CODE => Ok(token_set(
                "ya29.initial".to_string(),
                Some(VALID_REFRESH_TOKEN),
            )),
            NAMELESS_CODE => Ok(token_set("ya29.nameless".to_string(), None)),
            PANIC_CODE => panic!("{}", PANIC_DETAIL),
            _ => Err(ProviderError::TokenRequest(
                "Server returned error response: invalid_grant: Bad Request".to_string(),
            )),
        }
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, ProviderError> {
        let name = match access_token {
            "ya29.initial" => "A B",
            "ya29.nameless" => "",
            other => panic!("unexpected access token {}", other),
        };

        Ok(UserProfile {
            id: String::new(),
            email: "a@b.com".to_string(),
            verified_email: None,
            name: name.to_string(),
            given_name: None,
            family_name: None,
            picture: None,
            locale: None,
        })
    }

    async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<ProviderTokenSet, ProviderError> {
        if refresh_token != VALID_REFRESH_TOKEN {
            return Err(ProviderError::TokenRequest(
                "Server returned error response: invalid_grant: Token has been expired or revoked."
                    .to_string(),
            ));
        }

        let n = self.refreshes.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(token_set(
            format!("ya29.refreshed-{}", n),
            Some(refresh_token),
        ))
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<StubProvider>,
    pub token_issuer: Arc<TokenIssuer>,
}

pub fn make_test_app(signing_secret: Option<&str>) -> TestApp {
    let provider = Arc::new(StubProvider::default());
    let token_issuer = Arc::new(TokenIssuer::new(&TokenConfiguration {
        signing_secret: signing_secret.map(str::to_string),
        ttl_seconds: 24 * 60 * 60,
    }));

    let state = AppState {
        identity_provider: provider.clone(),
        token_issuer: token_issuer.clone(),
    };

    TestApp {
        router: router(state, HeaderValue::from_static(ALLOWED_ORIGIN)),
        provider,
        token_issuer,
    }
}

/// Serve the app on an ephemeral port and return its base URL
pub async fn spawn_server(app: &TestApp) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app.router.clone();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

pub async fn json_body(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
