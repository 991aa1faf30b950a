//! Error types for the image compressor.
//!
//! Every fallible operation in the app converges on [`CompressorError`]
//! before it reaches the update loop. The enum is `Clone` because
//! results travel inside UI messages; sources are rendered to strings
//! at the call site for the same reason.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug, Clone)]
pub enum CompressorError {
    /// Image decoding, probing, or encoding failed.
    #[error("Image error: {0}")]
    Image(String),

    /// File IO error (move, flush, metadata).
    #[error("IO error: {0}")]
    Io(String),

    /// Handing the file to the OS handler failed.
    #[error("Share error: {0}")]
    Share(String),

    /// A blocking task could not be joined.
    #[error("Task join error: {0}")]
    Task(String),
}

/// Convenience result type for compressor operations.
pub type CompressorResult<T> = Result<T, CompressorError>;

impl CompressorError {
    pub fn image<T: Into<String>>(msg: T) -> Self {
        Self::Image(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::Io(msg.into())
    }

    pub fn share<T: Into<String>>(msg: T) -> Self {
        Self::Share(msg.into())
    }
}
