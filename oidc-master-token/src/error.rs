/// Which JSON-bearing segment of a compact token failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Payload,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Header => f.write_str("header"),
            Segment::Payload => f.write_str("payload"),
        }
    }
}

/// Reasons a string is not a decodable compact JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token does not have exactly three dot-separated segments.
    SegmentCount(usize),

    /// A segment is not valid Base64URL.
    Base64 { segment: Segment, reason: String },

    /// The decoded bytes are not UTF-8 text.
    Utf8(Segment),

    /// The decoded text is not JSON.
    Json { segment: Segment, reason: String },

    /// The segment decoded to an empty JSON value (`null`, `false`, `0`, or `""`).
    Empty(Segment),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::SegmentCount(n) => {
                write!(f, "Expected 3 dot-separated segments, found {n}")
            }
            TokenError::Base64 { segment, reason } => {
                write!(f, "Invalid Base64URL in {segment}: {reason}")
            }
            TokenError::Utf8(segment) => write!(f, "The {segment} is not valid UTF-8"),
            TokenError::Json { segment, reason } => {
                write!(f, "The {segment} is not valid JSON: {reason}")
            }
            TokenError::Empty(segment) => write!(f, "The {segment} is empty"),
        }
    }
}

impl std::error::Error for TokenError {}

impl TokenError {
    /// Banner shown in place of a decoded token.
    pub fn public_message(&self) -> &'static str {
        crate::INVALID_FORMAT_MESSAGE
    }
}
