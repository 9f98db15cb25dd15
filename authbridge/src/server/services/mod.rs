pub mod identity;
pub mod oauth_client;
pub mod token_issuer;

pub use identity::{IdentityProvider, ProviderError};
pub use oauth_client::OAuthClient;
pub use token_issuer::{TokenError, TokenIssuer};
