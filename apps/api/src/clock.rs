use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339 UTC with fixed microsecond precision, so stamps sort lexically.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn now() -> String {
    timestamp(Utc::now())
}
