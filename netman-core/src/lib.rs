//! Core library for managing network interfaces and Wi-Fi/Ethernet
//! connections through the `nmcli` command-line tool.
//!
//! Each operation is a single subprocess round trip: build the argument
//! vector, run `nmcli`, parse its terse (`-t`) stdout on success or carry
//! the trimmed stderr on failure. The [`terse`] module decodes the
//! colon-delimited escape-aware output format, [`normalize`] folds the
//! decoded rows into typed records, and [`client::NetworkClient`] ties
//! both to a [`runner::CommandRunner`] implementation.

pub mod client;
pub mod envelope;
pub mod model;
pub mod normalize;
pub mod runner;
pub mod terse;

use thiserror::Error;

pub use client::NetworkClient;
pub use model::{AccessPoint, ConnectRequest, ConnectionEntry, InterfaceDetail, LinkType};

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required parameter was empty; no subprocess was started.
    #[error("invalid parameter")]
    InvalidParameter,

    /// `nmcli` exited non-zero. Carries its stderr, trimmed but otherwise
    /// verbatim.
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// A terse-output row did not have the field count the query expects.
    /// Indicates output-format drift in the external tool, not an
    /// operational failure.
    #[error("expected {expected} fields per row, got {got}")]
    FieldCount { expected: usize, got: usize },
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;
