//! Error types for dictionary and texture parsing.

use thiserror::Error;

/// Errors that can occur while reading or writing a texture dictionary.
#[derive(Debug, Error)]
pub enum Error {
    /// Stream read/write failed or was short.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The outer chunk is not a texture dictionary.
    #[error("not a texture dictionary: outer chunk type {found:#x}")]
    NotADictionary { found: u32 },

    /// A required child chunk is missing or mis-typed, a length window is
    /// impossible, or a fixed field could not be read.
    #[error("invalid structure: {0}")]
    InvalidStructure(String),

    /// The platform code is recognized but the requested operation is not
    /// implemented for it.
    #[error("unsupported platform code {0:#x}")]
    UnsupportedPlatform(u32),

    /// A texture with the same case-insensitive name already exists.
    #[error("a texture named {0:?} already exists")]
    DuplicateName(String),

    /// Pixel conversion failed.
    #[error(transparent)]
    Pixel(#[from] rwtxd_pixel::Error),
}

impl From<rwtxd_common::Error> for Error {
    fn from(err: rwtxd_common::Error) -> Self {
        match err {
            rwtxd_common::Error::Io(io) => Self::Io(io),
            other => Self::InvalidStructure(other.to_string()),
        }
    }
}

/// Result type for dictionary operations.
pub type Result<T> = std::result::Result<T, Error>;
