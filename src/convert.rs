// src/convert.rs
//
//! Single-pass conversion from Combined Log Format lines to goreplay
//! request records.
//!
//! One logical thread of control: lines are read sequentially from the
//! input, each successfully extracted entry is framed and written to the
//! output immediately, and nothing is buffered across iterations. Malformed
//! lines are skipped and logged; only stream-level I/O failures abort the
//! pass, and they surface the partial count already written.

use std::fmt;
use std::io::{self, BufRead, Write};

use rand::TryRngCore;
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::{GOR_PAYLOAD_DELIMITER, PAYLOAD_TYPE_REQUEST, REQUEST_ID_BYTES};
use crate::parse::{extract_request, extract_timestamp_nanos};
use crate::types::RequestRecord;

/// The three segments of one framed record, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    RequestLine,
    Delimiter,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Header => write!(f, "header"),
            Segment::RequestLine => write!(f, "request line"),
            Segment::Delimiter => write!(f, "delimiter"),
        }
    }
}

/// Fatal conversion failure. Both variants carry the number of records
/// already written so callers can report the partial result.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read input line {line_no} after {converted} converted records: {source}")]
    Read {
        line_no: u64,
        converted: u64,
        source: io::Error,
    },
    #[error("failed to write {segment} segment after {converted} converted records: {source}")]
    Write {
        segment: Segment,
        converted: u64,
        source: io::Error,
    },
}

impl ConvertError {
    /// Records successfully written before the failure.
    pub fn converted(&self) -> u64 {
        match self {
            ConvertError::Read { converted, .. } | ConvertError::Write { converted, .. } => {
                *converted
            }
        }
    }
}

/// Outcome of a completed conversion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Records successfully framed and written.
    pub converted: u64,
    /// Non-empty lines dropped: no recognizable request line, or the random
    /// source failed while generating an identifier.
    pub skipped: u64,
}

/// Converts access-log lines into goreplay records.
///
/// The random source behind request identifiers is an injected capability:
/// [`Converter::new`] draws from the operating system RNG, while tests can
/// substitute any [`TryRngCore`] implementation (a seeded `ChaCha20Rng`
/// makes the whole pass deterministic).
pub struct Converter<R = OsRng> {
    rng: R,
}

impl Converter<OsRng> {
    /// Converter backed by the OS random source.
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for Converter<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TryRngCore> Converter<R> {
    /// Converter backed by a substitute random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Run the conversion pass from `input` to `output`.
    ///
    /// Reads the input to exhaustion and returns how many records were
    /// written and how many non-empty lines were dropped. Fails only on
    /// stream I/O errors; both streams stay owned by the caller, which is
    /// responsible for releasing them afterwards on every exit path.
    pub fn convert<I: BufRead, W: Write>(
        &mut self,
        input: I,
        mut output: W,
    ) -> Result<ConvertSummary, ConvertError> {
        let mut summary = ConvertSummary::default();
        let mut line_no: u64 = 0;

        for line in input.lines() {
            line_no += 1;
            let line = line.map_err(|source| ConvertError::Read {
                line_no,
                converted: summary.converted,
                source,
            })?;
            if line.is_empty() {
                continue;
            }

            let (method, path, protocol) = match extract_request(&line) {
                Some(parts) => parts,
                None => {
                    warn!("Skipping malformed line {}: {}", line_no, line);
                    summary.skipped += 1;
                    continue;
                }
            };

            // A bad timestamp does not reject the line; it replays at epoch
            let timestamp_nanos = extract_timestamp_nanos(&line);

            let request_id = match self.next_request_id() {
                Ok(id) => id,
                Err(e) => {
                    warn!("Skipping line {}, request id generation failed: {}", line_no, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            let record = RequestRecord {
                method,
                path: path.to_string(),
                protocol: protocol.to_string(),
                timestamp_nanos,
                request_id,
            };

            write_record(&mut output, &record, summary.converted)?;
            summary.converted += 1;
            debug!("Converted line {} as request {}", line_no, record.request_id);
        }

        debug!(
            "Conversion pass complete: {} converted, {} skipped",
            summary.converted, summary.skipped
        );
        Ok(summary)
    }

    /// Draw `REQUEST_ID_BYTES` from the random source, hex-encoded lowercase.
    fn next_request_id(&mut self) -> Result<String, R::Error> {
        let mut buf = [0u8; REQUEST_ID_BYTES];
        self.rng.try_fill_bytes(&mut buf)?;
        Ok(hex::encode(buf))
    }
}

/// Write one three-segment record. A failed segment aborts the pass; the
/// error names the segment and carries the count written so far.
fn write_record<W: Write>(
    output: &mut W,
    record: &RequestRecord,
    converted: u64,
) -> Result<(), ConvertError> {
    // Header: type tag, request id, epoch nanoseconds, latency placeholder.
    // Latency is filled in by the consumer, never computed here.
    writeln!(
        output,
        "{} {} {} 0",
        PAYLOAD_TYPE_REQUEST, record.request_id, record.timestamp_nanos
    )
    .map_err(|source| ConvertError::Write {
        segment: Segment::Header,
        converted,
        source,
    })?;

    // Request line plus an empty header block, then the payload-ending blank
    write!(output, "{}\r\n\r\n\n", record.request_line()).map_err(|source| {
        ConvertError::Write {
            segment: Segment::RequestLine,
            converted,
            source,
        }
    })?;

    writeln!(output, "{}", GOR_PAYLOAD_DELIMITER).map_err(|source| ConvertError::Write {
        segment: Segment::Delimiter,
        converted,
        source,
    })?;

    Ok(())
}
