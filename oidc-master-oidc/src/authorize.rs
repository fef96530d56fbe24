use oidc_master_core::config::BuilderSettings;
use tracing::debug;
use url::Url;

use crate::error::AuthorizeUrlError;
use crate::pkce::Pkce;
use crate::random::generate_random_string;

/// Shown instead of a URL when the endpoint cannot be parsed.
pub const INVALID_ENDPOINT: &str = "Invalid Auth Endpoint";

/// `response_type` values offered by the builder, with their labels.
pub const RESPONSE_TYPES: [(&str, &str); 4] = [
    ("code", "code (Auth Code)"),
    ("token", "token (Implicit)"),
    ("id_token", "id_token"),
    ("code id_token", "code id_token (Hybrid)"),
];

/// Append `params` to `endpoint` as query parameters.
///
/// Pairs are appended in iteration order, form-urlencoded. Pairs with an
/// empty value are skipped without notice. A query already present on
/// `endpoint` is kept; same-named parameters are appended, not replaced.
pub fn build_authorize_url<I, K, V>(endpoint: &str, params: I) -> Result<String, AuthorizeUrlError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let endpoint = endpoint.trim();
    let mut url = Url::parse(endpoint).map_err(|e| AuthorizeUrlError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    if !url.has_host() {
        return Err(AuthorizeUrlError::MissingHost(endpoint.to_string()));
    }

    let pairs: Vec<(K, V)> = params
        .into_iter()
        .filter(|(_, value)| !value.as_ref().is_empty())
        .collect();

    // query_pairs_mut() on a URL without a query would leave a bare "?".
    if !pairs.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in &pairs {
            query.append_pair(key.as_ref(), value.as_ref());
        }
    }

    Ok(url.into())
}

/// Outcome of building the URL, as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedUrl {
    Ready(String),
    Invalid,
}

impl GeneratedUrl {
    /// The URL, or the [`INVALID_ENDPOINT`] sentinel.
    pub fn as_str(&self) -> &str {
        match self {
            GeneratedUrl::Ready(url) => url,
            GeneratedUrl::Invalid => INVALID_ENDPOINT,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            GeneratedUrl::Ready(url) => Some(url),
            GeneratedUrl::Invalid => None,
        }
    }

    /// Whether "open" and "copy" make sense for this value.
    pub fn is_actionable(&self) -> bool {
        matches!(self, GeneratedUrl::Ready(_))
    }
}

impl From<Result<String, AuthorizeUrlError>> for GeneratedUrl {
    fn from(result: Result<String, AuthorizeUrlError>) -> Self {
        match result {
            Ok(url) => GeneratedUrl::Ready(url),
            Err(err) => {
                debug!(error = %err, "Authorization URL could not be built");
                GeneratedUrl::Invalid
            }
        }
    }
}

impl std::fmt::Display for GeneratedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs of an OAuth 2.0 / OIDC authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequestParams {
    /// Authorization endpoint URL.
    pub endpoint: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub response_type: String,
    pub state: String,
    pub nonce: String,
    pub code_challenge: Option<String>,
    pub code_challenge_method: Option<String>,
}

impl AuthRequestParams {
    /// Pre-filled from the builder settings, with fresh `state` and `nonce`.
    pub fn from_settings(settings: &BuilderSettings) -> Self {
        Self {
            endpoint: settings.authorization_endpoint.clone(),
            client_id: String::new(),
            redirect_uri: settings.redirect_uri.clone(),
            scope: settings.scope.clone(),
            response_type: settings.response_type.clone(),
            state: generate_random_string(settings.random_length),
            nonce: generate_random_string(settings.random_length),
            code_challenge: None,
            code_challenge_method: None,
        }
    }

    /// Replace `state` and `nonce` with new random values of `length` characters.
    pub fn regenerate_secrets(&mut self, length: usize) {
        self.state = generate_random_string(length);
        self.nonce = generate_random_string(length);
    }

    /// Attach a PKCE challenge.
    pub fn with_pkce(mut self, pkce: &Pkce) -> Self {
        self.code_challenge = Some(pkce.challenge().to_string());
        self.code_challenge_method = Some(pkce.method().as_str().to_string());
        self
    }

    /// Query parameters in their fixed order. Empty values are included;
    /// [`build_authorize_url`] drops them.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("scope", self.scope.as_str()),
            ("response_type", self.response_type.as_str()),
            ("state", self.state.as_str()),
            ("nonce", self.nonce.as_str()),
        ];
        if let Some(challenge) = &self.code_challenge {
            pairs.push(("code_challenge", challenge.as_str()));
        }
        if let Some(method) = &self.code_challenge_method {
            pairs.push(("code_challenge_method", method.as_str()));
        }
        pairs
    }

    pub fn build(&self) -> Result<String, AuthorizeUrlError> {
        build_authorize_url(&self.endpoint, self.query_pairs())
    }

    /// Build, mapping failure to [`GeneratedUrl::Invalid`].
    pub fn generate(&self) -> GeneratedUrl {
        self.build().into()
    }
}
