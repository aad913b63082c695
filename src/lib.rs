// src/lib.rs
//
// Crate root — public re-exports for the converter and its CLI.

//! clf2gor: convert Apache Combined Log Format access logs into the `.gor`
//! replay format consumed by goreplay.
//!
//! The whole tool is one deterministic pass over an input stream: each
//! non-empty line has its quoted request line and bracketed timestamp
//! extracted, gets a random 24-hex-character request identifier, and is
//! written out as a three-segment record (header, request line, payload
//! delimiter). Lines without a recognizable request line are skipped and
//! logged; a missing or unparseable timestamp only zeroes the timestamp.
//!
//! # Usage
//!
//! ```
//! use clf2gor::Converter;
//! use std::io::Cursor;
//!
//! let log = r#"127.0.0.1 - - [01/Oct/2025:12:30:11 +0000] "GET /api/v1/users HTTP/1.1" 200 512 "-" "curl/8.0""#;
//! let mut out = Vec::new();
//!
//! let summary = Converter::new().convert(Cursor::new(log), &mut out).unwrap();
//! assert_eq!(summary.converted, 1);
//! assert!(String::from_utf8(out).unwrap().contains("GET /api/v1/users HTTP/1.1\r\n\r\n\n"));
//! ```

pub mod constants;
pub mod convert;
pub mod parse;
pub mod types;

// Re-export the main types for convenience
pub use constants::{COMBINED_LOG_FORMAT, GOR_PAYLOAD_DELIMITER, REQUEST_ID_LEN};
pub use convert::{ConvertError, ConvertSummary, Converter, Segment};
pub use parse::{extract_request, extract_timestamp_nanos};
pub use types::{HttpMethod, RequestRecord};
