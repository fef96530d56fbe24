use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::DiscoveryError;

/// Path appended to an issuer to locate its metadata.
pub const WELL_KNOWN_SUFFIX: &str = ".well-known/openid-configuration";

/// Rendered for endpoints the document does not declare.
pub const NOT_AVAILABLE: &str = "N/A";

/// Build the discovery URL for `issuer`, joining with exactly one slash.
pub fn discovery_url(issuer: &str) -> Result<String, DiscoveryError> {
    let issuer = issuer.trim();
    if issuer.is_empty() {
        return Err(DiscoveryError::InvalidIssuer("issuer is empty".into()));
    }

    let candidate = if issuer.ends_with('/') {
        format!("{issuer}{WELL_KNOWN_SUFFIX}")
    } else {
        format!("{issuer}/{WELL_KNOWN_SUFFIX}")
    };

    url::Url::parse(&candidate)
        .map(String::from)
        .map_err(|e| DiscoveryError::InvalidIssuer(format!("{issuer}: {e}")))
}

/// OpenID Provider metadata exactly as served.
///
/// The shape is not validated: any JSON value is kept, including fields this
/// type has no accessor for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscoveryDocument(Value);

/// A labelled endpoint from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEndpoint<'a> {
    pub label: &'static str,
    pub value: Option<&'a str>,
}

impl KeyEndpoint<'_> {
    /// The endpoint, or [`NOT_AVAILABLE`].
    pub fn display(&self) -> &str {
        self.value.unwrap_or(NOT_AVAILABLE)
    }
}

impl DiscoveryDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A string-valued field; empty strings count as absent.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// The string entries of an array-valued field.
    pub fn string_list(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn issuer(&self) -> Option<&str> {
        self.str_field("issuer")
    }

    pub fn authorization_endpoint(&self) -> Option<&str> {
        self.str_field("authorization_endpoint")
    }

    pub fn token_endpoint(&self) -> Option<&str> {
        self.str_field("token_endpoint")
    }

    pub fn userinfo_endpoint(&self) -> Option<&str> {
        self.str_field("userinfo_endpoint")
    }

    pub fn jwks_uri(&self) -> Option<&str> {
        self.str_field("jwks_uri")
    }

    pub fn scopes_supported(&self) -> Vec<&str> {
        self.string_list("scopes_supported")
    }

    pub fn response_types_supported(&self) -> Vec<&str> {
        self.string_list("response_types_supported")
    }

    /// Authorization, Token, UserInfo and JWKS endpoints, in that order.
    pub fn key_endpoints(&self) -> [KeyEndpoint<'_>; 4] {
        [
            KeyEndpoint {
                label: "Authorization Endpoint",
                value: self.authorization_endpoint(),
            },
            KeyEndpoint {
                label: "Token Endpoint",
                value: self.token_endpoint(),
            },
            KeyEndpoint {
                label: "UserInfo Endpoint",
                value: self.userinfo_endpoint(),
            },
            KeyEndpoint {
                label: "JWKS URI",
                value: self.jwks_uri(),
            },
        ]
    }

    /// Supported scopes followed by supported response types.
    pub fn supported_features(&self) -> Vec<&str> {
        let mut features = self.scopes_supported();
        features.extend(self.response_types_supported());
        features
    }

    /// Two-space indented JSON.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

/// Fetches discovery documents over HTTP.
///
/// One GET per call: no caching, no retries, no timeout.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryClient {
    client: reqwest::Client,
}

impl DiscoveryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest` client (proxies, TLS roots, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `{issuer}/.well-known/openid-configuration` and parse the body as JSON.
    pub async fn fetch(&self, issuer: &str) -> Result<DiscoveryDocument, DiscoveryError> {
        let url = discovery_url(issuer)?;
        debug!(%url, "Fetching discovery document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DiscoveryError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Discovery endpoint returned an error status");
            return Err(DiscoveryError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DiscoveryError::Request(e.to_string()))?;

        let value: Value =
            serde_json::from_slice(&body).map_err(|e| DiscoveryError::Parse(e.to_string()))?;

        debug!(%url, "Discovery document received");
        Ok(DiscoveryDocument::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn discovery_url_joins_with_single_slash() {
        assert_eq!(
            discovery_url("https://accounts.google.com").unwrap(),
            "https://accounts.google.com/.well-known/openid-configuration"
        );
        assert_eq!(
            discovery_url("https://accounts.google.com/").unwrap(),
            "https://accounts.google.com/.well-known/openid-configuration"
        );
        assert_eq!(
            discovery_url("  https://id.example.com/realms/dev ").unwrap(),
            "https://id.example.com/realms/dev/.well-known/openid-configuration"
        );
    }

    #[test]
    fn discovery_url_rejects_garbage() {
        assert!(matches!(discovery_url(""), Err(DiscoveryError::InvalidIssuer(_))));
        assert!(matches!(
            discovery_url("not a url"),
            Err(DiscoveryError::InvalidIssuer(_))
        ));
    }

    #[test]
    fn key_endpoints_fall_back_to_not_available() {
        let doc = DiscoveryDocument::new(json!({
            "authorization_endpoint": "https://id.example.com/auth",
            "token_endpoint": "",
        }));
        let endpoints = doc.key_endpoints();
        assert_eq!(endpoints[0].display(), "https://id.example.com/auth");
        assert_eq!(endpoints[1].display(), NOT_AVAILABLE);
        assert_eq!(endpoints[3].label, "JWKS URI");
    }

    #[test]
    fn non_object_documents_have_no_fields() {
        let doc = DiscoveryDocument::new(json!([1, 2, 3]));
        assert!(doc.issuer().is_none());
        assert!(doc.supported_features().is_empty());
    }
}
