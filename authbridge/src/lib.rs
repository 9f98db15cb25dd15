// Wire types shared between client and server
pub mod common;

// Client library (session store and exchange client)
mod client;
mod error;

pub use client::{
    login, logout, AuthClientError, ClientSession, Route, ServerAuthClient, SessionHandle,
    SessionProvider, Settings,
};
pub use common::{
    AppTokenClaims, AuthResponse, ExchangeRequest, ProviderTokenSet, RefreshRequest, UserProfile,
};
pub use error::AuthError;

// Server modules (public for binary, internal for library)
#[cfg(feature = "server")]
pub mod server;
