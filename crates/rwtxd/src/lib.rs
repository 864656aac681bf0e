//! rwtxd - texture-dictionary reading, writing, and transcoding.
//!
//! This crate provides a unified interface to the rwtxd library ecosystem
//! for working with the `.txd` texture dictionaries of the 3D-era GTA
//! games.
//!
//! # Crates
//!
//! - [`rwtxd_common`] - byte-level reading and writing primitives
//! - [`rwtxd_dict`] - chunk framing, native textures, the dictionary container
//! - [`rwtxd_pixel`] - canonical-RGBA conversion, DXT codec, palette quantizer
//!
//! # Example
//!
//! ```no_run
//! use rwtxd::prelude::*;
//!
//! // Open a dictionary and decode its first texture.
//! let dictionary = TextureDictionary::load("infernus.txd")?;
//! if let Some(texture) = dictionary.get(0) {
//!     let entry = TextureEntry::from_texture(texture)?;
//!     println!("{}: {}x{} rgba", entry.name, entry.width, entry.height);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use rwtxd_common as common;
pub use rwtxd_dict as dict;
pub use rwtxd_pixel as pixel;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use rwtxd_common::{BinaryReader, BinaryWriter};
    pub use rwtxd_dict::{
        GameVersion, MipLevel, Platform, Texture, TextureDictionary, TextureEntry,
    };
    pub use rwtxd_pixel::{convert, dxt, quant, Compression};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
