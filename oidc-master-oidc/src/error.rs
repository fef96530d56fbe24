/// Errors raised while fetching a discovery document.
///
/// Every variant maps to the same [`public_message`](DiscoveryError::public_message);
/// the detail is for logs and tests.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The issuer does not form a valid discovery URL.
    InvalidIssuer(String),

    /// The request could not be sent or the response body not read.
    Request(String),

    /// The server answered with a non-2xx status.
    Status(u16),

    /// The response body is not JSON.
    Parse(String),
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::InvalidIssuer(msg) => write!(f, "Invalid issuer URL: {msg}"),
            DiscoveryError::Request(msg) => write!(f, "Discovery request failed: {msg}"),
            DiscoveryError::Status(code) => {
                write!(f, "Discovery endpoint returned HTTP {code}")
            }
            DiscoveryError::Parse(msg) => write!(f, "Discovery document is not JSON: {msg}"),
        }
    }
}

impl std::error::Error for DiscoveryError {}

impl DiscoveryError {
    pub fn public_message(&self) -> &'static str {
        "Failed to fetch discovery document"
    }
}

/// The authorization endpoint could not be parsed as an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeUrlError {
    /// Not a URL at all.
    InvalidEndpoint { endpoint: String, reason: String },

    /// A URL, but without a host to send the user to.
    MissingHost(String),
}

impl std::fmt::Display for AuthorizeUrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorizeUrlError::InvalidEndpoint { endpoint, reason } => {
                write!(f, "Invalid authorization endpoint '{endpoint}': {reason}")
            }
            AuthorizeUrlError::MissingHost(endpoint) => {
                write!(f, "Authorization endpoint '{endpoint}' has no host")
            }
        }
    }
}

impl std::error::Error for AuthorizeUrlError {}

impl AuthorizeUrlError {
    pub fn public_message(&self) -> &'static str {
        crate::authorize::INVALID_ENDPOINT
    }
}
