use authbridge::{
    login, logout, AuthClientError, AuthError, ClientSession, Route, ServerAuthClient,
    SessionProvider, Settings,
};

mod support;

use support::{
    make_test_app, spawn_server, NAMELESS_CODE, SIGNING_SECRET, VALID_CODE, VALID_REFRESH_TOKEN,
};

#[tokio::test]
async fn test_login_then_logout_round_trip() {
    let app = make_test_app(Some(SIGNING_SECRET));
    let client = ServerAuthClient::new(spawn_server(&app).await);

    let provider = SessionProvider::new();
    let session = provider.handle();
    assert_eq!(session.current(), ClientSession::Unauthenticated);
    assert_eq!(Route::resolve(Route::App, &session), Route::Landing);

    let route = login(&client, &session, VALID_CODE).await.unwrap();
    assert_eq!(route, Route::App);
    assert_eq!(session.display_name().as_deref(), Some("A B"));
    assert_eq!(Route::resolve(Route::App, &session), Route::App);

    let route = logout(&client, &session).await;
    assert_eq!(route, Route::Landing);
    assert_eq!(session.display_name(), None);
}

#[tokio::test]
async fn test_failed_login_leaves_session_untouched() {
    let app = make_test_app(Some(SIGNING_SECRET));
    let client = ServerAuthClient::new(spawn_server(&app).await);

    let provider = SessionProvider::new();
    let session = provider.handle();

    let err = login(&client, &session, "bad").await.unwrap_err();
    match err {
        AuthError::AuthClient(AuthClientError::Rejected { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Authentication Failed!.");
        }
        other => panic!("unexpected error: {}", other),
    }

    assert_eq!(session.current(), ClientSession::Unauthenticated);
}

#[tokio::test]
async fn test_login_without_profile_name_stays_signed_out() {
    let app = make_test_app(Some(SIGNING_SECRET));
    let client = ServerAuthClient::new(spawn_server(&app).await);

    let provider = SessionProvider::new();
    let session = provider.handle();

    let err = login(&client, &session, NAMELESS_CODE).await.unwrap_err();
    assert!(matches!(err, AuthError::MissingDisplayName));

    assert_eq!(session.current(), ClientSession::Unauthenticated);
    assert_eq!(Route::resolve(Route::App, &session), Route::Landing);
}

#[tokio::test]
async fn test_logout_clears_state_when_server_unreachable() {
    // Nothing listens on port 9 locally
    let client = ServerAuthClient::new("http://127.0.0.1:9");

    let provider = SessionProvider::new();
    let session = provider.handle();
    session.set_display_name(Some("A B".to_string()));

    let route = logout(&client, &session).await;
    assert_eq!(route, Route::Landing);
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_exchange_code_returns_full_bundle() {
    let app = make_test_app(Some(SIGNING_SECRET));
    let client = ServerAuthClient::new(format!("{}/", spawn_server(&app).await));

    let response = client.exchange_code(VALID_CODE).await.unwrap();
    assert_eq!(response.user.email, "a@b.com");
    assert_eq!(
        response.google_tokens.refresh_token.as_deref(),
        Some(VALID_REFRESH_TOKEN)
    );

    let claims = app.token_issuer.verify(&response.app_token).unwrap();
    assert_eq!(claims.name, "A B");
}

#[tokio::test]
async fn test_refresh_token_through_client() {
    let app = make_test_app(Some(SIGNING_SECRET));
    let client = ServerAuthClient::new(spawn_server(&app).await);

    let tokens = client.refresh_token(VALID_REFRESH_TOKEN).await.unwrap();
    assert_eq!(tokens.access_token, "ya29.refreshed-1");

    let err = client.refresh_token("1//revoked").await.unwrap_err();
    assert!(matches!(
        err,
        AuthClientError::Rejected { status: 400, .. }
    ));
}

#[test]
fn test_client_from_invalid_settings() {
    let settings = Settings {
        server_url: "ftp://example.com".to_string(),
    };

    assert!(matches!(
        ServerAuthClient::from_settings(&settings),
        Err(AuthError::Configuration(_))
    ));
}
