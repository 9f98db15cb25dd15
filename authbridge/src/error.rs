use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Auth error: {0}")]
    AuthClient(#[from] crate::client::AuthClientError),

    #[error("Profile has no display name")]
    MissingDisplayName,
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
