//! Presentation form of a texture for interactive consumers.
//!
//! An editor works on decoded pixels and two booleans, not on raster
//! words: [`TextureEntry`] carries the level-0 canonical RGBA plus the
//! structural fields a property panel shows. Converting back re-derives
//! the raster format, depth, and compression scheme from the alpha and
//! compression choices, so the loaded format word is a display hint only.

use rwtxd_pixel::{convert, dxt, raster, Compression};

use crate::texture::{MipLevel, Platform, Texture};
use crate::{Error, Result};

/// A texture decoded for display and editing.
#[derive(Debug, Clone)]
pub struct TextureEntry {
    /// Texture name.
    pub name: String,
    /// Alpha-mask name.
    pub mask_name: String,
    /// Width of the top mipmap level.
    pub width: u32,
    /// Height of the top mipmap level.
    pub height: u32,
    /// Whether the alpha channel is meaningful.
    pub has_alpha: bool,
    /// Whether to block-compress on save.
    pub compression_on: bool,
    /// Number of mipmap levels the texture carried.
    pub mipmap_count: usize,
    /// Opaque render-state word.
    pub filter_flags: u32,
    /// Raster format as loaded; informational only.
    pub raster_format: u32,
    /// Target platform.
    pub platform: Platform,
    /// Canonical RGBA bytes of the top mipmap level.
    pub rgba: Vec<u8>,
}

/// Derive the on-disk encoding from the entry's two switches.
///
/// Returns `(raster_format, depth, compression)`.
pub const fn derive_format(has_alpha: bool, compression_on: bool) -> (u32, u8, Compression) {
    match (has_alpha, compression_on) {
        (false, false) => (raster::B8G8R8, 24, Compression::None),
        (true, false) => (raster::B8G8R8A8, 32, Compression::None),
        (false, true) => (raster::B8G8R8, 16, Compression::Dxt1),
        (true, true) => (raster::B8G8R8A8, 16, Compression::Dxt3),
    }
}

impl TextureEntry {
    /// Decode a parsed texture into its presentation form.
    pub fn from_texture(texture: &Texture) -> Result<Self> {
        let level = texture.mipmaps.first().ok_or_else(|| {
            Error::InvalidStructure("texture has no mipmap levels to decode".into())
        })?;

        let rgba = convert::decode(
            &level.bytes,
            texture.palette.as_deref(),
            level.width,
            level.height,
            texture.raster_format,
            texture.depth,
            texture.compression,
        )?;

        Ok(Self {
            name: texture.name.clone(),
            mask_name: texture.mask_name.clone(),
            width: level.width,
            height: level.height,
            has_alpha: texture.has_alpha,
            compression_on: texture.compression != Compression::None,
            mipmap_count: texture.mipmaps.len(),
            filter_flags: texture.filter_flags,
            raster_format: texture.raster_format,
            platform: texture.platform,
            rgba,
        })
    }

    /// Encode the entry back into a texture.
    ///
    /// The raster format, depth, and compression are re-derived from
    /// `has_alpha` and `compression_on`; `quality` steers the DXT
    /// endpoint search when compression is on.
    pub fn to_texture(&self, quality: f32) -> Result<Texture> {
        let (raster_format, depth, compression) = derive_format(self.has_alpha, self.compression_on);

        let bytes = match compression {
            Compression::None => {
                convert::encode_direct(&self.rgba, self.width, self.height, raster_format)?
            }
            _ => dxt::compress(&self.rgba, self.width, self.height, compression, quality)?,
        };

        Ok(Texture {
            platform: self.platform,
            name: self.name.clone(),
            mask_name: self.mask_name.clone(),
            filter_flags: self.filter_flags,
            raster_format,
            depth,
            has_alpha: self.has_alpha,
            compression,
            mipmaps: vec![MipLevel {
                width: self.width,
                height: self.height,
                bytes,
            }],
            palette: None,
            ..Texture::default()
        })
    }
}
