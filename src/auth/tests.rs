//! Tests for the auth module

use super::*;
use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::json;

fn full_auth() -> Auth {
    let mut auth = Auth::new(
        Some("client".to_string()),
        Some("secret".to_string()),
        Some("access".to_string()),
        Some("refresh".to_string()),
    );
    auth.update(
        AuthUpdate::new()
            .authorization_datetime(Utc::now())
            .expires_in(3600)
            .redirect_uri("https://example.com/callback"),
    );
    auth
}

#[test]
fn test_new_auth_defaults() {
    let auth = Auth::with_client("client", "secret");
    assert_eq!(auth.client_id(), Some("client"));
    assert_eq!(auth.client_secret(), Some("secret"));
    assert_eq!(auth.access_token(), None);
    assert_eq!(auth.expires_in(), 0);
    assert!(auth.authorization_datetime().is_none());
}

#[test]
fn test_update_overwrites_only_given_fields() {
    let mut auth = full_auth();
    auth.update(AuthUpdate::new().access_token("new-access"));

    assert_eq!(auth.access_token(), Some("new-access"));
    assert_eq!(auth.refresh_token(), Some("refresh"));
    assert_eq!(auth.expires_in(), 3600);
    assert_eq!(auth.redirect_uri(), Some("https://example.com/callback"));
}

#[test]
fn test_empty_update_is_noop() {
    let mut auth = full_auth();
    let before = auth.clone();
    let update = AuthUpdate::new();
    assert!(update.is_empty());
    auth.update(update);
    assert_eq!(auth, before);
}

#[test]
fn test_clear() {
    let mut auth = full_auth();
    auth.clear();

    assert_eq!(auth.access_token(), None);
    assert_eq!(auth.refresh_token(), None);
    assert_eq!(auth.authorization_datetime(), None);
    assert_eq!(auth.expires_in(), 0);
    // client credentials survive revocation
    assert_eq!(auth.client_id(), Some("client"));
    assert_eq!(auth.client_secret(), Some("secret"));
}

#[test]
fn test_debug_redacts_secrets() {
    let debug = format!("{:?}", full_auth());
    assert!(!debug.contains("secret\""));
    assert!(!debug.contains("\"access\""));
    assert!(!debug.contains("\"refresh\""));
    assert!(debug.contains("<redacted>"));
    assert!(debug.contains("client"));
}

#[test]
fn test_apply_bearer() {
    let auth = Auth::with_access_token("my-token");
    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/api"));

    let built = req.build().unwrap();
    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-token"
    );
}

#[test]
fn test_apply_without_token_still_sends_header() {
    let auth = Auth::with_client("client", "secret");
    let client = reqwest::Client::new();
    let built = auth
        .apply(client.get("https://example.com/api"))
        .build()
        .unwrap();

    let value = built.headers().get("Authorization").unwrap();
    assert!(value.to_str().unwrap().starts_with("Bearer"));
}

#[test]
fn test_authorization_code_grant() {
    let auth = full_auth();
    let grant = TokenGrant::authorization_code(&auth, "code-123", "");

    assert_eq!(grant.grant_type(), Some("authorization_code"));
    assert_eq!(
        serde_json::to_value(&grant).unwrap(),
        json!({
            "grant_type": "authorization_code",
            "client_id": "client",
            "client_secret": "secret",
            "code": "code-123",
            "redirect_uri": "https://example.com/callback"
        })
    );
}

#[test]
fn test_authorization_code_grant_redirect_override() {
    let auth = full_auth();
    let grant = TokenGrant::authorization_code(&auth, "c", "https://other.example.com");
    let body = serde_json::to_value(&grant).unwrap();
    assert_eq!(body["redirect_uri"], "https://other.example.com");
}

#[test]
fn test_refresh_and_revoke_grants() {
    let auth = full_auth();

    let refresh = serde_json::to_value(TokenGrant::refresh_token(&auth)).unwrap();
    assert_eq!(refresh["grant_type"], "refresh_token");
    assert_eq!(refresh["refresh_token"], "refresh");

    let revoke = TokenGrant::revoke(&auth);
    assert_eq!(revoke.grant_type(), None);
    let body = serde_json::to_value(&revoke).unwrap();
    assert_eq!(body["token"], "access");
    assert!(body.get("grant_type").is_none());
}
