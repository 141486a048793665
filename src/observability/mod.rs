//! Observability: structured logging to stderr.

pub mod logging;

pub use logging::{LogFormat, init_logging};
