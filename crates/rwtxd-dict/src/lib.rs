//! Texture-dictionary container codec.
//!
//! Reads and writes the chunked `.txd` dictionary format used by the
//! 3D-era GTA games:
//!
//! - [`chunk`] - the 12-byte chunk header and child-window walking
//! - [`texture`] - the D3D8/D3D9 native-texture codec
//! - [`dictionary`] - the dictionary container, lookup, and file I/O
//! - [`entry`] - the decoded presentation form interactive tools consume
//!
//! # Example
//!
//! ```no_run
//! use rwtxd_dict::TextureDictionary;
//!
//! let dictionary = TextureDictionary::load("infernus.txd")?;
//! for texture in dictionary.iter() {
//!     println!("{} {}x{}", texture.name, texture.width(), texture.height());
//! }
//! # Ok::<(), rwtxd_dict::Error>(())
//! ```

mod error;

pub mod chunk;
pub mod dictionary;
pub mod entry;
pub mod texture;

pub use chunk::{ChunkHeader, ChunkType};
pub use dictionary::{GameVersion, PartialLoad, TextureDictionary, DEFAULT_VERSION};
pub use entry::{derive_format, TextureEntry};
pub use error::{Error, Result};
pub use texture::{MipLevel, Platform, Texture, NAME_SIZE, TEXTURE_VERSION};
