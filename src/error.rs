//! Error types.
//!
//! The blocksize selectors themselves never fail: their preconditions are checked with debug
//! assertions only. Errors are reserved for building the policy tables and for the CLI.

use crate::datatype::Datatype;

use thiserror::Error;

/// Errors that can occur while configuring or driving the selectors.
#[derive(Debug, Error)]
pub enum Error {
    /// A blocksize pair with a zero default or a default above its maximum.
    #[error("invalid {dt} blocksize: default {default} must be in 1..={max}")]
    InvalidBlocksize {
        dt: Datatype,
        default: usize,
        max: usize,
    },

    /// A zero register blocking factor in a tuning table.
    #[error("invalid {dt} register blocking: {which} must be non-zero")]
    ZeroTilingFactor { dt: Datatype, which: &'static str },

    /// Malformed blocksize override on the command line.
    #[error("malformed blocksize override `{0}`, expected `DT=DEFAULT:MAX`")]
    BlocksizeSpec(String),

    /// Unknown datatype name.
    #[error("unknown datatype `{0}`")]
    UnknownDatatype(String),

    /// Randomized verification found violated properties.
    #[error("{failed} of {total} configurations violated a blocksize property")]
    Violations { failed: usize, total: usize },

    /// Logger initialization failure.
    #[error("failed to initialize logger: {0}")]
    Logger(String),

    /// I/O failure while writing a report.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
