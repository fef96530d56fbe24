use oidc_master_test::{TestJwt, TEST_SECRET};
use oidc_master_token::{decode, try_decode, Segment, TokenError, INVALID_FORMAT_MESSAGE};
use serde_json::json;

#[test]
fn decodes_hand_built_token() {
    let decoded = decode("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjMifQ.sig").unwrap();

    assert_eq!(decoded.header, json!({"alg": "HS256"}));
    assert_eq!(decoded.payload, json!({"sub": "123"}));
    assert_eq!(decoded.signature, "sig");
    assert_eq!(decoded.algorithm(), Some("HS256"));
}

#[test]
fn decodes_signed_token_with_custom_claims() {
    let token = TestJwt::builder()
        .sub("user-1")
        .iss("https://id.example.com")
        .aud(vec!["api", "web"])
        .kid("key-7")
        .claim("email", "user@example.com")
        .expires_in(3600)
        .sign();

    let decoded = decode(&token).unwrap();
    assert_eq!(decoded.key_id(), Some("key-7"));
    assert_eq!(decoded.claim("email"), Some(&json!("user@example.com")));
    assert_eq!(decoded.payload["aud"], json!(["api", "web"]));
    assert_eq!(decoded.raw, token);
    assert!(!TEST_SECRET.is_empty());
}

#[test]
fn padded_and_unpadded_segments_decode_alike() {
    let header = json!({"alg": "none", "typ": "JWT"});
    let payload = json!({"sub": "a", "n": 1});

    let unpadded = decode(&TestJwt::compose(&header, &payload, "")).unwrap();
    let padded = decode(&TestJwt::compose_padded(&header, &payload, "")).unwrap();

    assert_eq!(unpadded.header, padded.header);
    assert_eq!(unpadded.payload, payload);
    assert_eq!(padded.signature, "");
}

#[test]
fn url_safe_characters_are_translated() {
    // Multi-byte characters and "?" land on the 62nd/63rd alphabet entries.
    let payload = json!({"data": "ÿÿÿ???"});
    let token = TestJwt::compose(&json!({"alg": "none"}), &payload, "s");
    assert!(token.contains('_') || token.contains('-'));

    assert_eq!(decode(&token).unwrap().payload, payload);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let decoded = decode("  eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjMifQ.sig\n").unwrap();
    assert_eq!(decoded.signature, "sig");
}

#[test]
fn line_breaks_inside_segments_are_ignored() {
    let decoded = decode("eyJhbGciOiJI\r\nUzI1NiJ9.eyJzdWIi\nOiIxMjMifQ.sig").unwrap();
    assert_eq!(decoded.header, json!({"alg": "HS256"}));
    assert_eq!(decoded.payload, json!({"sub": "123"}));
}

#[test]
fn leading_byte_order_mark_is_ignored() {
    let decoded = decode("\u{feff}eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjMifQ.sig").unwrap();
    assert_eq!(decoded.header, json!({"alg": "HS256"}));
    assert_eq!(decoded.payload, json!({"sub": "123"}));
}

#[test]
fn wrong_segment_counts_are_rejected() {
    for token in ["", "abc", "a.b", "a.b.c.d", "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjMifQ"] {
        assert!(decode(token).is_none(), "{token:?} should not decode");
    }
    assert!(matches!(try_decode("a.b"), Err(TokenError::SegmentCount(2))));
    assert!(matches!(try_decode("a.b.c.d"), Err(TokenError::SegmentCount(4))));
}

#[test]
fn non_json_segments_are_rejected() {
    let not_json = TestJwt::segment(b"hello world");
    let token = format!("{not_json}.{}.sig", TestJwt::segment(b"{}"));

    assert!(decode(&token).is_none());
    assert!(matches!(
        try_decode(&token),
        Err(TokenError::Json { segment: Segment::Header, .. })
    ));
}

#[test]
fn invalid_utf8_is_rejected() {
    let token = format!(
        "{}.{}.sig",
        TestJwt::segment(b"{}"),
        TestJwt::segment(&[0xff, 0xfe, 0xfd])
    );
    assert!(matches!(try_decode(&token), Err(TokenError::Utf8(Segment::Payload))));
}

#[test]
fn falsy_json_segments_are_rejected() {
    for body in ["null", "false", "0", "\"\""] {
        let token = format!(
            "{}.{}.sig",
            TestJwt::segment(b"{\"alg\":\"none\"}"),
            TestJwt::segment(body.as_bytes())
        );
        assert!(
            matches!(try_decode(&token), Err(TokenError::Empty(Segment::Payload))),
            "{body} should be rejected"
        );
    }
}

#[test]
fn every_failure_shares_the_user_message() {
    let err = try_decode("only.two").unwrap_err();
    assert_eq!(err.public_message(), INVALID_FORMAT_MESSAGE);
}

#[test]
fn pretty_output_is_two_space_indented() {
    let decoded = decode("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjMifQ.sig").unwrap();
    assert_eq!(decoded.header_pretty(), "{\n  \"alg\": \"HS256\"\n}");
    assert_eq!(decoded.payload_pretty(), "{\n  \"sub\": \"123\"\n}");
}
