use axum::http::StatusCode;
use oidc_master_oidc::discovery::NOT_AVAILABLE;
use oidc_master_oidc::{DiscoveryClient, DiscoveryError};
use oidc_master_test::{refused_url, StubServer};
use serde_json::json;

fn google_like(issuer: &str) -> serde_json::Value {
    json!({
        "issuer": issuer,
        "authorization_endpoint": "https://accounts.google.com/o/oauth2/v2/auth",
        "token_endpoint": "https://oauth2.googleapis.com/token",
        "userinfo_endpoint": "https://openidconnect.googleapis.com/v1/userinfo",
        "jwks_uri": "https://www.googleapis.com/oauth2/v3/certs",
        "scopes_supported": ["openid", "email", "profile"],
        "response_types_supported": ["code", "token", "id_token"],
        "claims_supported": ["aud", "email", "sub"]
    })
}

#[tokio::test]
async fn fetch_returns_document_as_served() {
    let server = StubServer::discovery("", google_like("https://accounts.google.com")).await;

    let doc = DiscoveryClient::new()
        .fetch(&server.base_url())
        .await
        .unwrap();

    assert_eq!(
        doc.authorization_endpoint(),
        Some("https://accounts.google.com/o/oauth2/v2/auth")
    );
    assert_eq!(doc.issuer(), Some("https://accounts.google.com"));
    assert_eq!(doc.get("claims_supported").unwrap()[1], "email");
}

#[tokio::test]
async fn trailing_slash_issuer_is_normalised() {
    let server = StubServer::discovery("", google_like("x")).await;

    let doc = DiscoveryClient::new()
        .fetch(&server.url("/"))
        .await
        .unwrap();

    assert_eq!(doc.token_endpoint(), Some("https://oauth2.googleapis.com/token"));
}

#[tokio::test]
async fn issuer_with_path_prefix() {
    let server = StubServer::discovery("/realms/dev", google_like("x")).await;

    let doc = DiscoveryClient::new()
        .fetch(&server.url("/realms/dev"))
        .await
        .unwrap();

    assert_eq!(doc.jwks_uri(), Some("https://www.googleapis.com/oauth2/v3/certs"));
}

#[tokio::test]
async fn key_endpoints_and_features() {
    let server = StubServer::discovery(
        "",
        json!({
            "authorization_endpoint": "https://id.example.com/authorize",
            "jwks_uri": "https://id.example.com/jwks",
            "scopes_supported": ["openid"],
            "response_types_supported": ["code"]
        }),
    )
    .await;

    let doc = DiscoveryClient::new().fetch(&server.base_url()).await.unwrap();
    let rendered: Vec<_> = doc
        .key_endpoints()
        .iter()
        .map(|e| (e.label, e.display().to_string()))
        .collect();

    assert_eq!(
        rendered,
        vec![
            ("Authorization Endpoint", "https://id.example.com/authorize".to_string()),
            ("Token Endpoint", NOT_AVAILABLE.to_string()),
            ("UserInfo Endpoint", NOT_AVAILABLE.to_string()),
            ("JWKS URI", "https://id.example.com/jwks".to_string()),
        ]
    );
    assert_eq!(doc.supported_features(), vec!["openid", "code"]);
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = StubServer::fixed(
        "/.well-known/openid-configuration",
        StatusCode::NOT_FOUND,
        "not here",
    )
    .await;

    let err = DiscoveryClient::new()
        .fetch(&server.base_url())
        .await
        .unwrap_err();

    assert!(matches!(err, DiscoveryError::Status(404)));
    assert_eq!(err.public_message(), "Failed to fetch discovery document");
}

#[tokio::test]
async fn non_json_body_is_a_parse_error() {
    let server = StubServer::fixed(
        "/.well-known/openid-configuration",
        StatusCode::OK,
        "<html>login</html>",
    )
    .await;

    let err = DiscoveryClient::new()
        .fetch(&server.base_url())
        .await
        .unwrap_err();

    assert!(matches!(err, DiscoveryError::Parse(_)));
}

#[tokio::test]
async fn invalid_issuer_never_hits_the_network() {
    let err = DiscoveryClient::new().fetch("   ").await.unwrap_err();
    assert!(matches!(err, DiscoveryError::InvalidIssuer(_)));
}

#[test]
fn pretty_json_is_two_space_indented() {
    let doc = oidc_master_oidc::DiscoveryDocument::new(json!({"issuer": "a"}));
    assert_eq!(doc.to_pretty_json(), "{\n  \"issuer\": \"a\"\n}");
}

#[tokio::test]
async fn connection_failure_is_a_request_error() {
    let issuer = refused_url().await;

    let err = DiscoveryClient::new().fetch(&issuer).await.unwrap_err();

    assert!(matches!(err, DiscoveryError::Request(_)), "unexpected error: {err}");
    assert_eq!(err.public_message(), "Failed to fetch discovery document");
}
