//! Error types for inkdash.

use thiserror::Error;

/// Errors that can occur while building dashboard URIs.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller-supplied buffer cannot hold the formatted URI
    #[error("URI does not fit in a {capacity}-byte buffer")]
    BufferTooSmall {
        /// Capacity of the buffer in bytes
        capacity: usize,
    },

    /// An overlay parameter could not be parsed
    #[error("Invalid overlay: {0}")]
    InvalidOverlay(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(String),
}
