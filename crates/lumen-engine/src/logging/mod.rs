//! Logging utilities.
//!
//! Every binary in the workspace initializes logging through this module so
//! filter handling (`RUST_LOG`) behaves the same everywhere.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
