use axum::http::StatusCode;
use oidc_master_test::{now_secs, StubServer, TestJwt};
use serde_json::json;

#[test]
fn signed_tokens_have_three_segments() {
    let token = TestJwt::builder().sub("user-1").expires_in(60).sign();
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn compose_keeps_the_signature_verbatim() {
    let token = TestJwt::compose(&json!({"alg": "none"}), &json!({}), "not-a-sig");
    assert!(token.ends_with(".not-a-sig"));
    assert!(!token.contains('='));
}

#[tokio::test]
async fn recording_stub_captures_requests() {
    let (server, recorder) = StubServer::recording(StatusCode::OK, json!({"ok": true})).await;

    let response = reqwest::Client::new()
        .post(server.url("/anything?key=k"))
        .json(&json!({"a": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK.as_u16());
    assert_eq!(response.json::<serde_json::Value>().await.unwrap(), json!({"ok": true}));

    let requests = recorder.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].uri, "/anything?key=k");
    assert_eq!(requests[0].body, json!({"a": 1}));
    assert_eq!(requests[0].headers["content-type"], "application/json");
}

#[test]
fn expires_in_is_relative_to_now() {
    let token = TestJwt::builder().expires_in(-30).sign();
    let payload = token.split('.').nth(1).unwrap();
    let claims: serde_json::Value = serde_json::from_slice(
        &base64::Engine::decode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, payload).unwrap(),
    )
    .unwrap();
    assert_eq!(claims["exp"].as_i64().unwrap() - claims["iat"].as_i64().unwrap(), -30);
    assert!((claims["iat"].as_i64().unwrap() - now_secs()).abs() <= 5);
}
