//! Structured logging setup for pinforge.
//!
//! Console output plus optional daily-rotated JSON files, with `RUST_LOG`
//! taking precedence over the configured level.

pub mod logger;

pub use logger::{init_logger, LogGuard, LoggingSettings};
