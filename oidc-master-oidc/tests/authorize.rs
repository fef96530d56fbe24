use oidc_master_core::config::BuilderSettings;
use oidc_master_oidc::{
    build_authorize_url, AuthRequestParams, AuthorizeUrlError, GeneratedUrl, Pkce, PkceMethod,
    INVALID_ENDPOINT,
};

fn params() -> AuthRequestParams {
    AuthRequestParams {
        endpoint: "https://accounts.google.com/o/oauth2/v2/auth".into(),
        client_id: "abc".into(),
        redirect_uri: "http://localhost:3000/callback".into(),
        scope: "openid profile email".into(),
        response_type: "code".into(),
        state: "xyz".into(),
        nonce: "n0nce".into(),
        code_challenge: None,
        code_challenge_method: None,
    }
}

#[test]
fn empty_values_are_skipped() {
    let url = build_authorize_url(
        "https://example.com/auth",
        [("client_id", "abc"), ("redirect_uri", ""), ("state", "xyz")],
    )
    .unwrap();

    assert!(url.contains("client_id=abc"));
    assert!(url.contains("state=xyz"));
    assert!(!url.contains("redirect_uri="));
    assert_eq!(url, "https://example.com/auth?client_id=abc&state=xyz");
}

#[test]
fn unparseable_endpoint_fails() {
    let err = build_authorize_url("not a url", [("client_id", "abc")]).unwrap_err();
    assert!(matches!(err, AuthorizeUrlError::InvalidEndpoint { .. }));
    assert_eq!(err.public_message(), INVALID_ENDPOINT);
}

#[test]
fn endpoint_without_host_fails() {
    let err = build_authorize_url("mailto:someone@example.com", [("a", "b")]).unwrap_err();
    assert!(matches!(err, AuthorizeUrlError::MissingHost(_)));
}

#[test]
fn existing_query_is_preserved_and_duplicates_appended() {
    let url = build_authorize_url(
        "https://example.com/auth?prompt=login&scope=openid",
        [("scope", "email")],
    )
    .unwrap();

    assert_eq!(
        url,
        "https://example.com/auth?prompt=login&scope=openid&scope=email"
    );
}

#[test]
fn no_pairs_leaves_url_untouched() {
    let url = build_authorize_url("https://example.com/auth", [("client_id", "")]).unwrap();
    assert_eq!(url, "https://example.com/auth");
}

#[test]
fn values_are_form_urlencoded() {
    let url = params().build().unwrap();
    assert!(url.contains("scope=openid+profile+email"));
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback"));
}

#[test]
fn parameters_follow_fixed_order() {
    let url = params().build().unwrap();
    let query = url.split_once('?').unwrap().1;
    let names: Vec<_> = query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap().0)
        .collect();

    assert_eq!(
        names,
        vec!["client_id", "redirect_uri", "scope", "response_type", "state", "nonce"]
    );
}

#[test]
fn pkce_parameters_are_appended() {
    let pkce = Pkce::from_verifier(
        "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk",
        PkceMethod::S256,
    );
    let url = params().with_pkce(&pkce).build().unwrap();

    assert!(url.ends_with(
        "&code_challenge=E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM&code_challenge_method=S256"
    ));
}

#[test]
fn generate_maps_failure_to_sentinel() {
    let mut bad = params();
    bad.endpoint = "::::".into();

    let generated = bad.generate();
    assert_eq!(generated, GeneratedUrl::Invalid);
    assert_eq!(generated.to_string(), "Invalid Auth Endpoint");
    assert!(!generated.is_actionable());
    assert!(generated.url().is_none());

    let good = params().generate();
    assert!(good.is_actionable());
    assert!(good.as_str().starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
}

#[test]
fn from_settings_prefills_and_generates_secrets() {
    let settings = BuilderSettings {
        authorization_endpoint: "https://id.example.com/authorize".into(),
        redirect_uri: "https://app.example.com/cb".into(),
        scope: "openid".into(),
        response_type: "code id_token".into(),
        random_length: 20,
    };

    let mut params = AuthRequestParams::from_settings(&settings);
    assert_eq!(params.endpoint, "https://id.example.com/authorize");
    assert!(params.client_id.is_empty());
    assert_eq!(params.state.len(), 20);
    assert_eq!(params.nonce.len(), 20);
    assert_ne!(params.state, params.nonce);

    let before = params.state.clone();
    params.regenerate_secrets(32);
    assert_eq!(params.state.len(), 32);
    assert_ne!(params.state, before);

    // client_id is still empty, so it is left out of the query.
    let url = params.build().unwrap();
    assert!(!url.contains("client_id"));
    assert!(url.contains("response_type=code+id_token"));
}
