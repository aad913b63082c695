// src/constants.rs
//
// Centralized constants for clf2gor to avoid hardcoded values throughout the codebase

/// Payload delimiter goreplay expects between records in a `.gor` stream.
///
/// Three emoji code points chosen upstream precisely because they never show
/// up in HTTP traffic; the framing breaks if this ever changes.
pub const GOR_PAYLOAD_DELIMITER: &str = "🐵🙈🙉";

/// The Apache Combined Log Format line layout this tool consumes.
///
/// Only `%t` (the bracketed timestamp) and `%r` (the quoted request line)
/// are extracted; every other field is ignored.
pub const COMBINED_LOG_FORMAT: &str = r#"%h %l %u %t "%r" %>s %b "%{Referer}i" "%{User-Agent}i""#;

/// Record-type tag for a request payload in the goreplay header segment.
pub const PAYLOAD_TYPE_REQUEST: &str = "1";

/// Number of random bytes behind each request identifier.
pub const REQUEST_ID_BYTES: usize = 12;

/// Length of the hex-encoded request identifier (two characters per byte).
pub const REQUEST_ID_LEN: usize = REQUEST_ID_BYTES * 2;

/// strftime layout of the date-time portion of the bracketed timestamp,
/// e.g. `01/Oct/2025:12:30:11`. The offset that follows it is discarded.
pub const APACHE_TIME_FORMAT: &str = "%d/%b/%Y:%H:%M:%S";
