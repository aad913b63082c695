// src/types.rs
//
//! Core types for converted access-log entries.

use anyhow::{Result, bail};
use std::str::FromStr;

/// HTTP method of a request line.
///
/// The fixed set a Combined Log Format request line is allowed to carry;
/// anything else fails extraction and the line is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
}

impl FromStr for HttpMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            "PUT" => Ok(HttpMethod::PUT),
            "DELETE" => Ok(HttpMethod::DELETE),
            "HEAD" => Ok(HttpMethod::HEAD),
            "OPTIONS" => Ok(HttpMethod::OPTIONS),
            "PATCH" => Ok(HttpMethod::PATCH),
            _ => bail!("Unknown HTTP method: {}", s),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::GET => write!(f, "GET"),
            HttpMethod::POST => write!(f, "POST"),
            HttpMethod::PUT => write!(f, "PUT"),
            HttpMethod::DELETE => write!(f, "DELETE"),
            HttpMethod::HEAD => write!(f, "HEAD"),
            HttpMethod::OPTIONS => write!(f, "OPTIONS"),
            HttpMethod::PATCH => write!(f, "PATCH"),
        }
    }
}

/// One fully extracted access-log entry, ready for framing.
///
/// Only built when method, path, and protocol were all present; a line that
/// fails request-line extraction never produces a record. Nothing here is
/// mutated after construction and nothing survives the iteration that
/// created it.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// HTTP method from the quoted request line.
    pub method: HttpMethod,

    /// Request target exactly as it appeared between the quotes.
    pub path: String,

    /// Protocol token, e.g. `HTTP/1.1`. Opaque; not validated.
    pub protocol: String,

    /// Nanoseconds since the Unix epoch, zero when the bracketed timestamp
    /// was absent or unparseable.
    pub timestamp_nanos: i64,

    /// 24-character lowercase hex identifier, unique per record.
    pub request_id: String,
}

impl RequestRecord {
    /// The HTTP request line as it appears in the replay payload.
    pub fn request_line(&self) -> String {
        format!("{} {} {}", self.method, self.path, self.protocol)
    }
}
