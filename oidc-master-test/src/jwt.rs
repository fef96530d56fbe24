use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{Map, Value};

/// Shared HMAC secret for minted test tokens.
pub const TEST_SECRET: &[u8] = b"oidc-master-test-secret-do-not-use-in-production";

/// Helpers for producing compact JWTs in tests.
pub struct TestJwt;

impl TestJwt {
    /// Start building a signed HS256 token.
    pub fn builder() -> TokenBuilder {
        TokenBuilder::default()
    }

    /// Join arbitrary JSON header and payload with a signature string,
    /// Base64URL-encoding the JSON without padding.
    pub fn compose(header: &Value, payload: &Value, signature: &str) -> String {
        format!(
            "{}.{}.{signature}",
            URL_SAFE_NO_PAD.encode(header.to_string()),
            URL_SAFE_NO_PAD.encode(payload.to_string()),
        )
    }

    /// Same as [`TestJwt::compose`] but keeps `=` padding.
    pub fn compose_padded(header: &Value, payload: &Value, signature: &str) -> String {
        format!(
            "{}.{}.{signature}",
            URL_SAFE.encode(header.to_string()),
            URL_SAFE.encode(payload.to_string()),
        )
    }

    /// Base64URL (no padding) of raw bytes, for building malformed segments.
    pub fn segment(bytes: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

/// Builder for HS256 tokens signed with [`TEST_SECRET`].
#[derive(Default)]
pub struct TokenBuilder {
    claims: Map<String, Value>,
    kid: Option<String>,
}

impl TokenBuilder {
    pub fn sub(self, sub: &str) -> Self {
        self.claim("sub", sub)
    }

    pub fn iss(self, iss: &str) -> Self {
        self.claim("iss", iss)
    }

    pub fn aud(self, aud: impl Into<Value>) -> Self {
        self.claim("aud", aud)
    }

    /// Set `iat` to now and `exp` to now + `secs` (negative for an expired token).
    pub fn expires_in(self, secs: i64) -> Self {
        let now = now_secs();
        self.claim("iat", now).claim("exp", now + secs)
    }

    pub fn kid(mut self, kid: &str) -> Self {
        self.kid = Some(kid.to_string());
        self
    }

    pub fn claim(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.claims.insert(name.to_string(), value.into());
        self
    }

    pub fn sign(self) -> String {
        let mut header = Header::new(Algorithm::HS256);
        header.kid = self.kid;
        encode(
            &header,
            &Value::Object(self.claims),
            &EncodingKey::from_secret(TEST_SECRET),
        )
        .expect("failed to sign test token")
    }
}

/// Current Unix time in whole seconds.
pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}
