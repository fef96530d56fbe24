use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;
use tracing::debug;

use crate::error::{Segment, TokenError};

/// Standard-alphabet engine that accepts input with or without padding.
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A compact JWT split into its parts. The signature is never verified.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    /// Parsed JOSE header.
    pub header: Value,
    /// Parsed claims, including any non-registered ones.
    pub payload: Value,
    /// Third segment, untouched.
    pub signature: String,
    /// The input exactly as it was given.
    pub raw: String,
}

impl DecodedToken {
    /// Look up a payload claim.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// The `alg` header parameter.
    pub fn algorithm(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    /// The `kid` header parameter.
    pub fn key_id(&self) -> Option<&str> {
        self.header.get("kid").and_then(Value::as_str)
    }

    /// Header as two-space indented JSON.
    pub fn header_pretty(&self) -> String {
        pretty(&self.header)
    }

    /// Payload as two-space indented JSON.
    pub fn payload_pretty(&self) -> String {
        pretty(&self.payload)
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Decode a compact JWT without verifying it.
///
/// Returns `None` for anything that is not a three-segment token whose first
/// two segments are Base64URL-encoded JSON. Use [`try_decode`] to learn why.
pub fn decode(token: &str) -> Option<DecodedToken> {
    match try_decode(token) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            debug!(error = %err, "Input is not a decodable JWT");
            None
        }
    }
}

/// Decode a compact JWT without verifying it, reporting the failure reason.
pub fn try_decode(token: &str) -> Result<DecodedToken, TokenError> {
    let parts: Vec<&str> = token
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .split('.')
        .collect();
    if parts.len() != 3 {
        return Err(TokenError::SegmentCount(parts.len()));
    }

    let header = decode_segment(parts[0], Segment::Header)?;
    let payload = decode_segment(parts[1], Segment::Payload)?;

    Ok(DecodedToken {
        header,
        payload,
        signature: parts[2].to_string(),
        raw: token.to_string(),
    })
}

/// Base64URL -> bytes -> UTF-8 -> JSON. ASCII whitespace inside the
/// segment is ignored, so tokens wrapped across lines still decode.
fn decode_segment(segment: &str, which: Segment) -> Result<Value, TokenError> {
    let standard: String = segment
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let bytes = FORGIVING
        .decode(standard.as_bytes())
        .map_err(|e| TokenError::Base64 {
            segment: which,
            reason: e.to_string(),
        })?;
    let text = String::from_utf8(bytes).map_err(|_| TokenError::Utf8(which))?;
    let value: Value = serde_json::from_str(&text).map_err(|e| TokenError::Json {
        segment: which,
        reason: e.to_string(),
    })?;

    if is_empty(&value) {
        return Err(TokenError::Empty(which));
    }
    Ok(value)
}

/// `null`, `false`, zero and the empty string carry no header or claims.
pub(crate) fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn forgiving_engine_accepts_both_paddings() {
        assert_eq!(FORGIVING.decode("e30").unwrap(), b"{}");
        assert_eq!(FORGIVING.decode("e30=").unwrap(), b"{}");
    }

    #[test]
    fn empty_values() {
        assert!(is_empty(&json!(null)));
        assert!(is_empty(&json!(false)));
        assert!(is_empty(&json!(0)));
        assert!(is_empty(&json!("")));
        assert!(!is_empty(&json!({})));
        assert!(!is_empty(&json!([])));
        assert!(!is_empty(&json!(true)));
    }

    #[test]
    fn segment_errors_name_the_segment() {
        let err = decode_segment("!!!", Segment::Payload).unwrap_err();
        assert!(matches!(err, TokenError::Base64 { segment: Segment::Payload, .. }));
    }
}
