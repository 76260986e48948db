//! Observability for the codec and validator
//!
//! The core only emits `tracing` events and spans. Installing a subscriber is
//! left to the embedding application; [`logging`] offers a ready-made one.

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};

// Span macros for structured logging
pub use logging::{decode_span, validate_span};
