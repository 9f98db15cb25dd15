pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Configuration;
pub use error::{ExchangeError, RefreshError, ServerError};
pub use routes::router;

use services::{IdentityProvider, TokenIssuer};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub token_issuer: Arc<TokenIssuer>,
}
