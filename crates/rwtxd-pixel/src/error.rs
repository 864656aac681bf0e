//! Error types for pixel conversion.

use thiserror::Error;

/// Errors that can occur while converting pixel data.
#[derive(Debug, Error)]
pub enum Error {
    /// No decoder or encoder exists for the raster format.
    #[error("no converter for raster format {format:#06x}")]
    UnsupportedFormat { format: u32 },

    /// The palette generator could not produce a palette.
    #[error("palette generation failed: {0}")]
    QuantizerFailed(&'static str),

    /// The DXT codec could not produce output.
    #[error("DXT coding failed: {0}")]
    CompressorFailed(&'static str),

    /// A pixel buffer did not have the size its dimensions imply.
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}

/// Result type for pixel conversion.
pub type Result<T> = std::result::Result<T, Error>;
