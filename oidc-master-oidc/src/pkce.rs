//! Proof Key for Code Exchange (RFC 7636) helpers.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::random::generate_random_string;

/// Verifier length used by [`Pkce::generate`]; RFC 7636 allows 43 to 128.
pub const VERIFIER_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PkceMethod {
    S256,
    Plain,
}

impl PkceMethod {
    /// Value of the `code_challenge_method` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            PkceMethod::S256 => "S256",
            PkceMethod::Plain => "plain",
        }
    }
}

/// A code verifier and the challenge derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkce {
    verifier: String,
    challenge: String,
    method: PkceMethod,
}

impl Pkce {
    /// Random verifier with an `S256` challenge.
    pub fn generate() -> Self {
        Self::from_verifier(generate_random_string(VERIFIER_LENGTH), PkceMethod::S256)
    }

    /// Random verifier sent as its own challenge.
    pub fn plain() -> Self {
        Self::from_verifier(generate_random_string(VERIFIER_LENGTH), PkceMethod::Plain)
    }

    pub fn from_verifier(verifier: impl Into<String>, method: PkceMethod) -> Self {
        let verifier = verifier.into();
        let challenge = match method {
            PkceMethod::S256 => URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes())),
            PkceMethod::Plain => verifier.clone(),
        };
        Self {
            verifier,
            challenge,
            method,
        }
    }

    /// Kept by the client for the token request.
    pub fn verifier(&self) -> &str {
        &self.verifier
    }

    /// Sent as `code_challenge` in the authorization request.
    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    pub fn method(&self) -> PkceMethod {
        self.method
    }
}
