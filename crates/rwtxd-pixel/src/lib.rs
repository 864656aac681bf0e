//! Pixel conversion for GTA texture dictionaries.
//!
//! Every texture format that appears in a `.txd` file is decoded to one
//! canonical representation: tightly packed 8-bit-per-channel R,G,B,A in
//! row-major order. The reverse direction encodes a canonical buffer into
//! the on-disk direct formats, into DXT1/DXT3 block compression, or into a
//! 16/256-entry indexed palette.
//!
//! - [`convert`] - direct-format and palette decode/encode
//! - [`dxt`] - reference DXT1/DXT3 block codec
//! - [`quant`] - deterministic palette quantizer
//!
//! The disk byte order for color channels is B,G,R\[,A\]; the swap to the
//! canonical R,G,B,A happens here and nowhere else.

mod error;

pub mod convert;
pub mod dxt;
pub mod quant;

mod format;

pub use error::{Error, Result};
pub use format::{raster, Compression};
pub use quant::PaletteImage;

/// Bytes per pixel of the canonical RGBA representation.
pub const CANONICAL_BPP: usize = 4;
