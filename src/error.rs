//! Host-side error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::table::TableError;

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Errors that stop the programmer before it touches the synthesizers
#[derive(Error, Debug)]
pub enum HostError {
    /// Table file could not be read
    #[error("cannot read frequency table {}: {source}", path.display())]
    TableRead {
        /// Table file path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Table file is malformed
    #[error("invalid frequency table {}: {source}", path.display())]
    TableParse {
        /// Table file path
        path: PathBuf,
        /// Parse error with line number
        source: TableError,
    },

    /// GPIO block could not be mapped
    #[error("GPIO setup failed: {0}")]
    Gpio(#[source] io::Error),

    /// Signal handlers could not be installed
    #[error("cannot install signal handlers: {0}")]
    Signal(#[from] nix::Error),

    /// An environment setting has an unusable value
    #[error("invalid value {value:?} for {var}")]
    Config {
        /// Variable name
        var: &'static str,
        /// Value found
        value: String,
    },
}
