//! Structured logging setup using the tracing crate
//!
//! Decoding and validation emit `debug!` events for accepted messages and
//! `warn!` events for rejected ones, inside the spans created by
//! [`decode_span!`] and [`validate_span!`].
//!
//! ## Log Format Options
//!
//! The `LOG_FORMAT` environment variable selects one of three outputs:
//!
//! - `json` - Structured JSON for log aggregation
//! - `pretty` - Human-readable, colored and indented
//! - `compact` - Colored single-line output for terminals
//!
//! ## Environment Variables
//!
//! - `LOG_LEVEL`: ERROR, WARN, INFO, DEBUG or TRACE (default INFO)
//! - `LOG_FORMAT`: json, pretty or compact (default json)
//! - `LOG_SPANS`: emit span open/close events (default false)
//! - `RUST_LOG`: overrides the filter entirely
//!
//! ## Examples
//!
//! ```bash
//! # Trace every rejected message of a fleet gateway
//! LOG_FORMAT=json LOG_LEVEL=WARN ./fleet-gateway
//!
//! # Watch decode spans while developing
//! LOG_FORMAT=pretty LOG_LEVEL=DEBUG LOG_SPANS=true ./fleet-gateway
//! ```

use std::env;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-line, colored
    Pretty,
    /// Single-line, colored, without targets
    Compact,
}

impl LogFormat {
    /// Parse a format name case-insensitively; unknown names select JSON
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Json,
        }
    }
}

/// Parse a level name case-insensitively; unknown names select INFO
pub fn parse_level(s: &str) -> Level {
    match s.to_ascii_uppercase().as_str() {
        "ERROR" => Level::ERROR,
        "WARN" => Level::WARN,
        "DEBUG" => Level::DEBUG,
        "TRACE" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Install a global subscriber with manual configuration
///
/// A second call is a no-op: the first installed subscriber stays active.
pub fn init_logging(level: Level, format: LogFormat, include_spans: bool) {
    // RUST_LOG wins over the requested level
    let filter = env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let span_events = if include_spans {
        fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE
    } else {
        fmt::format::FmtSpan::NONE
    };

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer().json().with_span_events(span_events);
            let _ = subscriber.with(fmt_layer).try_init();
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_ansi(true)
                .with_span_events(span_events);
            let _ = subscriber.with(fmt_layer).try_init();
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_ansi(true)
                .with_target(false)
                .with_span_events(span_events);
            let _ = subscriber.with(fmt_layer).try_init();
        }
    }
}

/// Install a global subscriber configured from `LOG_LEVEL`, `LOG_FORMAT`
/// and `LOG_SPANS`
pub fn init_default_logging() {
    let level = env::var("LOG_LEVEL").map_or(Level::INFO, |raw| parse_level(&raw));
    let format = env::var("LOG_FORMAT").map_or(LogFormat::Json, |raw| LogFormat::parse(&raw));
    let include_spans = env::var("LOG_SPANS").is_ok_and(|raw| raw.eq_ignore_ascii_case("true"));

    init_logging(level, format, include_spans);
}

/// Create a span covering one decode call
#[macro_export]
macro_rules! decode_span {
    ($($field:tt)*) => {
        tracing::info_span!("message_decode", $($field)*)
    };
}

/// Create a span covering one validator run
#[macro_export]
macro_rules! validate_span {
    ($($field:tt)*) => {
        tracing::debug_span!("message_validate", $($field)*)
    };
}

// Re-export macros for convenience
pub use {decode_span, validate_span};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("CoMpAcT"), LogFormat::Compact);
    }

    #[test]
    fn test_unknown_log_format_is_json() {
        for raw in ["", "xml", "yaml", "jsonl"] {
            assert_eq!(LogFormat::parse(raw), LogFormat::Json, "input: {raw:?}");
        }
    }

    #[test]
    fn test_parse_level() {
        let cases = [
            ("error", Level::ERROR),
            ("WARN", Level::WARN),
            ("Info", Level::INFO),
            ("debug", Level::DEBUG),
            ("TRACE", Level::TRACE),
            ("verbose", Level::INFO),
        ];
        for (raw, expected) in cases {
            assert_eq!(parse_level(raw), expected, "input: {raw:?}");
        }
    }

    #[test]
    fn test_spans_build_without_subscriber() {
        let span = decode_span!(kind = "order", version = "2.0.0");
        let _enter = span.enter();
        let inner = validate_span!(gaps = "reject");
        let _inner = inner.enter();
    }
}
