use crate::client::session::SessionHandle;

/// Views of the client application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Public landing page with the login button
    Landing,
    /// Authenticated area
    App,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::App => "/app",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Landing),
            "/app" => Some(Route::App),
            _ => None,
        }
    }

    /// Where a navigation to `requested` actually lands.
    pub fn resolve(requested: Route, session: &SessionHandle) -> Route {
        match requested {
            Route::App if !session.is_authenticated() => Route::Landing,
            other => other,
        }
    }

    pub fn after_login() -> Route {
        Route::App
    }

    pub fn after_logout() -> Route {
        Route::Landing
    }
}
