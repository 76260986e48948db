//! Tests for logging configuration and format parsing
//!
//! The global subscriber can only be installed once per process, so these
//! tests exercise the parsing helpers and check that repeated
//! initialization and logging around the codec never panic.

mod test_helpers;

use test_helpers::{bytes, example_order};
use tracing::Level;
use vda5050::observability::logging::{init_logging, parse_level, LogFormat};
use vda5050::{decode, decode_span, validate_span, MessageKind, ProtocolVersion};

#[test]
fn test_log_format_parse_is_case_insensitive() {
    for raw in ["json", "JSON", "Json"] {
        assert_eq!(LogFormat::parse(raw), LogFormat::Json);
    }
    for raw in ["pretty", "PRETTY", "Pretty"] {
        assert_eq!(LogFormat::parse(raw), LogFormat::Pretty);
    }
    for raw in ["compact", "COMPACT", "Compact"] {
        assert_eq!(LogFormat::parse(raw), LogFormat::Compact);
    }
}

#[test]
fn test_log_format_unknown_defaults_to_json() {
    for raw in ["invalid", "", "xml", "123", " pretty", "compact\n"] {
        assert_eq!(LogFormat::parse(raw), LogFormat::Json, "input: {raw:?}");
    }
}

#[test]
fn test_level_names() {
    assert_eq!(parse_level("ERROR"), Level::ERROR);
    assert_eq!(parse_level("warn"), Level::WARN);
    assert_eq!(parse_level("Debug"), Level::DEBUG);
    assert_eq!(parse_level("trace"), Level::TRACE);
    assert_eq!(parse_level("INFO"), Level::INFO);
}

#[test]
fn test_unknown_level_defaults_to_info() {
    for raw in ["", "verbose", "warning", "5"] {
        assert_eq!(parse_level(raw), Level::INFO, "input: {raw:?}");
    }
}

#[test]
fn test_repeated_initialization_is_harmless() {
    init_logging(Level::DEBUG, LogFormat::Compact, true);
    init_logging(Level::TRACE, LogFormat::Json, false);

    // Decoding logs accepted and rejected messages inside its spans
    let span = decode_span!(source = "test");
    let _enter = span.enter();
    assert!(decode(
        MessageKind::Order,
        &bytes(&example_order("2.0.0")),
        ProtocolVersion::V2_0_0
    )
    .is_ok());
    assert!(decode(MessageKind::Order, b"{", ProtocolVersion::V2_0_0).is_err());

    let inner = validate_span!(source = "test");
    let _inner = inner.enter();
}
