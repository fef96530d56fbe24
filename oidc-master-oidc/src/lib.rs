//! Client-side OIDC helpers.
//!
//! - [`discovery`]: fetch and inspect `/.well-known/openid-configuration`
//! - [`authorize`]: compose authorization request URLs
//! - [`random`]: `state` / `nonce` values
//! - [`pkce`]: RFC 7636 verifier and challenge
//! - [`presets`]: well-known issuers
//!
//! # Example
//!
//! ```ignore
//! use oidc_master_oidc::{DiscoveryClient, AuthRequestParams};
//!
//! let doc = DiscoveryClient::new().fetch("https://accounts.google.com").await?;
//! let mut params = AuthRequestParams::from_settings(&settings.builder);
//! params.endpoint = doc.authorization_endpoint().unwrap_or_default().to_string();
//! params.client_id = "my-client".into();
//! println!("{}", params.generate());
//! ```

pub mod authorize;
pub mod discovery;
pub mod error;
pub mod pkce;
pub mod presets;
pub mod random;

pub use authorize::{build_authorize_url, AuthRequestParams, GeneratedUrl, INVALID_ENDPOINT};
pub use discovery::{discovery_url, DiscoveryClient, DiscoveryDocument, KeyEndpoint};
pub use error::{AuthorizeUrlError, DiscoveryError};
pub use pkce::{Pkce, PkceMethod};
pub use presets::{find_preset, IssuerPreset, PRESETS};
pub use random::generate_random_string;

pub mod prelude {
    //! Re-exports of the most commonly used OIDC types.
    pub use crate::{AuthRequestParams, DiscoveryClient, DiscoveryDocument, GeneratedUrl, Pkce};
}
