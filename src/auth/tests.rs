//! Tests for the auth module

use super::*;
use crate::error::Error;

fn request() -> reqwest::RequestBuilder {
    reqwest::Client::new().get("https://api.spotify.com/v1/search")
}

#[tokio::test]
async fn test_bearer_applied() {
    let auth = Authenticator::new(SessionContext::new("user-1", Credential::new("my-token")));

    let req = auth.apply(request()).await.unwrap();
    let built = req.build().unwrap();

    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-token"
    );
}

#[tokio::test]
async fn test_blank_token_is_unauthorized() {
    let auth = Authenticator::new(SessionContext::new("user-1", Credential::new("  ")));

    let err = auth.apply(request()).await.unwrap_err();
    assert!(matches!(err, Error::Unauthorized { .. }));
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let session = SessionContext::new("user-1", Credential::new("old")).expires_in(-60);
    let auth = Authenticator::new(session);

    let err = auth.apply(request()).await.unwrap_err();
    assert!(err.needs_reauth());
}

#[tokio::test]
async fn test_replace_session() {
    let session = SessionContext::new("user-1", Credential::new("old")).expires_in(-60);
    let auth = Authenticator::new(session);
    assert!(auth.apply(request()).await.is_err());

    auth.replace_session(SessionContext::new("user-1", Credential::new("fresh")))
        .await;

    let built = auth.apply(request()).await.unwrap().build().unwrap();
    assert_eq!(built.headers().get("Authorization").unwrap(), "Bearer fresh");
    assert_eq!(auth.session().await.access_token.expose(), "fresh");
}
