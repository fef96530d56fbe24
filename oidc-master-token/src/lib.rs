//! Compact JWT inspection.
//!
//! Splits a token into header, payload and signature, decodes the first two
//! as Base64URL JSON, and summarises the registered claims. Signatures are
//! never checked; this crate is for looking at tokens, not trusting them.
//!
//! ```
//! let token = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjMifQ.sig";
//! let decoded = oidc_master_token::decode(token).unwrap();
//! assert_eq!(decoded.header["alg"], "HS256");
//! assert_eq!(decoded.payload["sub"], "123");
//! assert_eq!(decoded.signature, "sig");
//! ```

pub mod claims;
pub mod codec;
pub mod error;
pub mod time;

pub use claims::{ClaimsSummary, ExpiryStatus, SECURITY_NOTE};
pub use codec::{decode, try_decode, DecodedToken};
pub use error::{Segment, TokenError};
pub use time::{format_time, format_time_in, NOT_AVAILABLE};

/// Banner for input that is present but not a decodable JWT.
pub const INVALID_FORMAT_MESSAGE: &str =
    "Invalid JWT format. Please ensure it has three parts separated by dots.";
