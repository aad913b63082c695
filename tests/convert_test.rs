// tests/convert_test.rs
//
//! Integration tests for the log-to-gor conversion pipeline.
//!
//! These drive the public library API end-to-end over real files, the same
//! way the CLI does: open an access log, convert, read the `.gor` output
//! back, and check the framing byte for byte.

use std::fs::File;
use std::io::{BufReader, Read, Write};

use anyhow::Result;
use clf2gor::{ConvertSummary, Converter, GOR_PAYLOAD_DELIMITER, REQUEST_ID_LEN};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tempfile::NamedTempFile;

const ACCESS_LOG: &str = concat!(
    r#"127.0.0.1 - - [01/Oct/2025:12:30:11 +0000] "GET /api/v1/users HTTP/1.1" 200 512 "-" "curl/8.0""#,
    "\n",
    r#"10.1.2.3 - frank [01/Oct/2025:12:30:12 +0000] "POST /api/v1/users HTTP/1.1" 201 98 "https://example.com" "Mozilla/5.0""#,
    "\n",
    "garbage line without a request\n",
    "\n",
    r#"172.16.0.9 - - "DELETE /api/v1/users/7 HTTP/1.1" 204 0 "-" "curl/8.0""#,
    "\n",
);

/// Split a `.gor` stream into (header, payload) pairs, one per record.
fn split_records(text: &str) -> Vec<(String, String)> {
    let delim = format!("{}\n", GOR_PAYLOAD_DELIMITER);
    text.split_terminator(delim.as_str())
        .map(|chunk| {
            let (header, payload) = chunk.split_once('\n').expect("record has a header line");
            (header.to_string(), payload.to_string())
        })
        .collect()
}

fn convert_file(input: &NamedTempFile) -> Result<(ConvertSummary, String)> {
    let reader = BufReader::new(File::open(input.path())?);
    let output = NamedTempFile::with_suffix(".gor")?;
    let summary = Converter::new().convert(reader, output.as_file())?;

    let mut text = String::new();
    File::open(output.path())?.read_to_string(&mut text)?;
    Ok((summary, text))
}

#[test]
fn test_end_to_end_framing() -> Result<()> {
    let mut input = NamedTempFile::with_suffix(".log")?;
    write!(input, "{}", ACCESS_LOG)?;
    input.flush()?;

    let (summary, text) = convert_file(&input)?;
    assert_eq!(summary.converted, 3);
    assert_eq!(summary.skipped, 1); // the garbage line; the blank one is free

    let records = split_records(&text);
    assert_eq!(records.len(), 3);

    // First record, checked byte for byte
    let (header, payload) = &records[0];
    let fields: Vec<&str> = header.split(' ').collect();
    assert_eq!(fields[0], "1");
    assert_eq!(fields[1].len(), REQUEST_ID_LEN);
    assert!(fields[1].chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(fields[2], "1759321811000000000");
    assert_eq!(fields[3], "0");
    assert_eq!(payload, "GET /api/v1/users HTTP/1.1\r\n\r\n\n");

    // Second record is one second later
    assert_eq!(records[1].0.split(' ').nth(2), Some("1759321812000000000"));
    assert_eq!(records[1].1, "POST /api/v1/users HTTP/1.1\r\n\r\n\n");

    // Third record had no timestamp field; it converts with zero
    assert_eq!(records[2].0.split(' ').nth(2), Some("0"));
    assert_eq!(records[2].1, "DELETE /api/v1/users/7 HTTP/1.1\r\n\r\n\n");

    Ok(())
}

#[test]
fn test_empty_input_yields_empty_output() -> Result<()> {
    let input = NamedTempFile::with_suffix(".log")?;
    let (summary, text) = convert_file(&input)?;
    assert_eq!(summary, ConvertSummary::default());
    assert!(text.is_empty());
    Ok(())
}

#[test]
fn test_blank_lines_only_yields_zero_count() -> Result<()> {
    let mut input = NamedTempFile::with_suffix(".log")?;
    write!(input, "\n\n\n\n")?;
    input.flush()?;

    let (summary, text) = convert_file(&input)?;
    assert_eq!(summary.converted, 0);
    assert_eq!(summary.skipped, 0);
    assert!(text.is_empty());
    Ok(())
}

#[test]
fn test_reparse_is_idempotent_apart_from_ids() -> Result<()> {
    let mut input = NamedTempFile::with_suffix(".log")?;
    write!(input, "{}", ACCESS_LOG)?;
    input.flush()?;

    let (first_summary, first) = convert_file(&input)?;
    let (second_summary, second) = convert_file(&input)?;
    assert_eq!(first_summary, second_summary);

    let first_records = split_records(&first);
    let second_records = split_records(&second);
    assert_eq!(first_records.len(), second_records.len());

    for ((h1, p1), (h2, p2)) in first_records.iter().zip(&second_records) {
        // Identical payloads and timestamps, fresh identifiers each run
        assert_eq!(p1, p2);
        let f1: Vec<&str> = h1.split(' ').collect();
        let f2: Vec<&str> = h2.split(' ').collect();
        assert_eq!(f1[2], f2[2]);
        assert_ne!(f1[1], f2[1]);
    }
    Ok(())
}

#[test]
fn test_zstd_input_converts_identically() -> Result<()> {
    let compressed = zstd::stream::encode_all(ACCESS_LOG.as_bytes(), 1)?;
    let mut zst_input = NamedTempFile::with_suffix(".log.zst")?;
    zst_input.write_all(&compressed)?;
    zst_input.flush()?;

    // Same seeded rng for both passes, so the outputs must match exactly
    let convert_with_seed = |reader: Box<dyn std::io::BufRead>| -> Result<Vec<u8>> {
        let mut out = Vec::new();
        Converter::with_rng(ChaCha20Rng::seed_from_u64(7)).convert(reader, &mut out)?;
        Ok(out)
    };

    let decoder = zstd::stream::read::Decoder::new(File::open(zst_input.path())?)?;
    let from_zst = convert_with_seed(Box::new(BufReader::new(decoder)))?;
    let from_plain = convert_with_seed(Box::new(std::io::Cursor::new(ACCESS_LOG.as_bytes())))?;

    assert_eq!(from_zst, from_plain);
    assert!(!from_zst.is_empty());
    Ok(())
}
