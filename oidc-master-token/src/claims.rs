//! Registered-claim summary shown next to a decoded token.
//!
//! Nothing here validates a token: the summary only reports what the
//! payload says, with placeholders for absent claims.

use chrono::{Local, TimeZone};
use serde_json::Value;

use crate::codec::is_empty;
use crate::time::{claim_epoch, format_time_in};

/// Rendered for absent string claims.
pub const MISSING: &str = "Missing";

/// Reminder displayed with every decoded token.
pub const SECURITY_NOTE: &str = "Signature verification is not performed by this tool. \
Always verify signatures in your backend using the public keys from the provider's jwks_uri.";

/// Whether `exp` lies in the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    Valid,
    Expired,
}

impl std::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpiryStatus::Valid => f.write_str("Valid"),
            ExpiryStatus::Expired => f.write_str("Expired"),
        }
    }
}

/// Display strings for the registered claims of a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsSummary {
    pub issuer: String,
    pub subject: String,
    pub audience: String,
    pub expires_at: String,
    pub issued_at: String,
    pub not_before: String,
    pub jwt_id: String,
    pub expiry: ExpiryStatus,
}

impl ClaimsSummary {
    /// Summarise `payload` at time `now` (epoch seconds), formatting in local time.
    pub fn from_payload(payload: &Value, now: f64) -> Self {
        Self::from_payload_in(payload, now, &Local)
    }

    /// Summarise `payload` at time `now`, formatting timestamps in `tz`.
    pub fn from_payload_in<Tz>(payload: &Value, now: f64, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let exp = claim_epoch(payload.get("exp"));
        let expiry = match exp {
            Some(exp) if exp != 0.0 && exp < now => ExpiryStatus::Expired,
            _ => ExpiryStatus::Valid,
        };

        ClaimsSummary {
            issuer: display_claim(payload.get("iss")),
            subject: display_claim(payload.get("sub")),
            audience: display_audience(payload.get("aud")),
            expires_at: format_time_in(exp, tz),
            issued_at: format_time_in(claim_epoch(payload.get("iat")), tz),
            not_before: format_time_in(claim_epoch(payload.get("nbf")), tz),
            jwt_id: display_claim(payload.get("jti")),
            expiry,
        }
    }

    /// Labelled rows in display order.
    pub fn rows(&self) -> [(&'static str, &str); 7] {
        [
            ("Issuer (iss)", self.issuer.as_str()),
            ("Subject (sub)", self.subject.as_str()),
            ("Audience (aud)", self.audience.as_str()),
            ("Expires at (exp)", self.expires_at.as_str()),
            ("Issued at (iat)", self.issued_at.as_str()),
            ("Not before (nbf)", self.not_before.as_str()),
            ("JWT ID (jti)", self.jwt_id.as_str()),
        ]
    }
}

fn display_claim(value: Option<&Value>) -> String {
    match value {
        None => MISSING.to_string(),
        Some(v) if is_empty(v) => MISSING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn display_audience(value: Option<&Value>) -> String {
    match value {
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(Value::Array(_)) => MISSING.to_string(),
        other => display_claim(other),
    }
}
