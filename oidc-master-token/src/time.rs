use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;

/// Rendered for absent, zero, or unrepresentable timestamps.
pub const NOT_AVAILABLE: &str = "N/A";

const FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Format Unix-epoch seconds as a local timestamp.
///
/// `None`, `0`, non-finite and out-of-range inputs all yield [`NOT_AVAILABLE`].
pub fn format_time(epoch_seconds: Option<f64>) -> String {
    format_time_in(epoch_seconds, &Local)
}

/// Format Unix-epoch seconds in the given time zone.
pub fn format_time_in<Tz>(epoch_seconds: Option<f64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    to_datetime(epoch_seconds)
        .map(|utc| utc.with_timezone(tz).format(FORMAT).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn to_datetime(epoch_seconds: Option<f64>) -> Option<DateTime<chrono::Utc>> {
    let secs = epoch_seconds.filter(|s| s.is_finite() && *s != 0.0)?;
    let whole = secs.floor();
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    let nanos = (((secs - whole) * 1e9) as u32).min(999_999_999);
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Numeric value of a time claim (`exp`, `iat`, `nbf`). Non-numbers yield `None`.
pub fn claim_epoch(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

/// Current time as Unix-epoch seconds.
pub fn now_epoch() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
