// src/parse.rs
//
//! Field extraction from Combined Log Format lines.
//!
//! Two fields are consumed out of each line: the quoted request line and the
//! bracketed timestamp. The rest of the line (host, identity, user, status,
//! size, referrer, user agent) is ignored. Extraction is pattern-based
//! rather than a full grammar; Combined Log Format is rigid enough that the
//! two anchors below are unambiguous.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::APACHE_TIME_FORMAT;
use crate::types::HttpMethod;

/// Quoted request line: `"METHOD PATH PROTOCOL"`.
static REQUEST_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""(GET|POST|PUT|DELETE|HEAD|OPTIONS|PATCH) ([^ ]+) ([^"]+)""#)
        .expect("request-line pattern must compile")
});

/// Bracketed Apache timestamp: `[dd/Mon/yyyy:HH:MM:SS ±offset]`.
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d{2}/\w{3}/\d{4}:\d{2}:\d{2}:\d{2}) [^\]]+\]")
        .expect("timestamp pattern must compile")
});

/// Extract the quoted HTTP request line from a log line.
///
/// Returns the method plus the path and protocol exactly as they appeared
/// between the quotes, or `None` when the line carries no recognizable
/// request line (in which case the caller skips the whole line).
pub fn extract_request(line: &str) -> Option<(HttpMethod, &str, &str)> {
    let caps = REQUEST_LINE_RE.captures(line)?;
    let method = caps.get(1)?.as_str().parse::<HttpMethod>().ok()?;
    let path = caps.get(2)?.as_str();
    let protocol = caps.get(3)?.as_str();
    Some((method, path, protocol))
}

/// Extract the bracketed timestamp as nanoseconds since the Unix epoch.
///
/// The timezone offset inside the bracket is matched but discarded: the
/// date-time portion is parsed as a naive timestamp anchored to UTC, so logs
/// written by non-UTC servers replay at shifted absolute times. Known
/// limitation; downstream consumers may already compensate for it.
///
/// Returns zero when the field is absent, malformed, or outside chrono's
/// nanosecond range. A bad timestamp never rejects the line.
pub fn extract_timestamp_nanos(line: &str) -> i64 {
    TIMESTAMP_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| NaiveDateTime::parse_from_str(m.as_str(), APACHE_TIME_FORMAT).ok())
        .and_then(|dt| dt.and_utc().timestamp_nanos_opt())
        .unwrap_or(0)
}
