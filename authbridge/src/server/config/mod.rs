use axum::http::HeaderValue;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Deserialize, Clone)]
pub struct Configuration {
    #[serde(default)]
    pub server: ServerConfiguration,
    pub oauth: OAuthConfiguration,
    #[serde(default)]
    pub token: TokenConfiguration,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfiguration {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// The single browser origin allowed to call the API with credentials
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

impl ServerConfiguration {
    pub fn allowed_origin_header(&self) -> Result<HeaderValue, ConfigError> {
        self.allowed_origin.parse().map_err(|e| {
            ConfigError::Message(format!(
                "server.allowed_origin {:?} is not a valid header value: {}",
                self.allowed_origin, e
            ))
        })
    }
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OAuthConfiguration {
    pub client_id: String,
    pub client_secret: String,

    /// `postmessage` selects the provider's popup (non-redirect) code flow
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    #[serde(default = "default_userinfo_url")]
    pub userinfo_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfiguration {
    /// Missing is not fatal at startup; each login attempt fails instead.
    #[serde(default)]
    pub signing_secret: Option<String>,

    #[serde(default = "default_token_ttl")]
    pub ttl_seconds: u64,
}

impl Default for TokenConfiguration {
    fn default() -> Self {
        Self {
            signing_secret: None,
            ttl_seconds: default_token_ttl(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_allowed_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_redirect_uri() -> String {
    "postmessage".to_string()
}

fn default_token_url() -> String {
    GOOGLE_TOKEN_URL.to_string()
}

fn default_userinfo_url() -> String {
    GOOGLE_USERINFO_URL.to_string()
}

fn default_token_ttl() -> u64 {
    24 * 60 * 60
}

impl Configuration {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(config::File::with_name("config"));
        }

        builder =
            builder.add_source(config::Environment::with_prefix("AUTHBRIDGE").separator("__"));

        Self::from_builder(builder)
    }

    pub fn from_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
