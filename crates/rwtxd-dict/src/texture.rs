//! Native-texture codec for the D3D8 and D3D9 platforms.
//!
//! A TEXTURENATIVE chunk holds one STRUCT child with the raster header,
//! the optional palette, and the mipmap payloads, followed by an EXTENSION
//! chunk. The D3D8 and D3D9 layouts differ only in how alpha and
//! compression are recorded; both are handled here. PS2, Xbox, and OpenGL
//! bodies are recognized far enough to carry them through a load, but
//! cannot be written back.

use rwtxd_common::{memchr, BinaryReader, BinaryWriter};
use rwtxd_pixel::{raster, Compression};
use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::chunk::{ChunkHeader, ChunkType, Children, HEADER_SIZE};
use crate::{Error, Result};

/// Size of an on-disk name slot: 31 user bytes plus the terminator.
pub const NAME_SIZE: usize = 32;

/// Library version written into child TEXTURENATIVE chunks.
pub const TEXTURE_VERSION: u32 = 0x34000;

/// Raster type byte; always 4 on the wire.
const RASTER_TYPE: u8 = 4;

/// D3D format code for A8R8G8B8, written by D3D9 when uncompressed.
const D3DFMT_A8R8G8B8: u32 = 0x15;
/// D3D format code for X8R8G8B8.
const D3DFMT_X8R8G8B8: u32 = 0x16;

/// Runtime graphics platform a native texture targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Direct3D 8 (GTA III, Vice City).
    #[default]
    D3d8,
    /// Direct3D 9 (San Andreas).
    D3d9,
    /// PlayStation 2.
    Ps2,
    /// Xbox.
    Xbox,
    /// OpenGL.
    Ogl,
}

impl Platform {
    /// Decode the on-disk platform word.
    ///
    /// PS2 dictionaries appear both with the plain code and with a
    /// "PS2\0" FourCC.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            2 => Some(Platform::Ogl),
            4 | 0x0032_5350 => Some(Platform::Ps2),
            5 => Some(Platform::Xbox),
            8 => Some(Platform::D3d8),
            9 => Some(Platform::D3d9),
            _ => None,
        }
    }

    /// The canonical on-disk code.
    pub const fn code(self) -> u32 {
        match self {
            Platform::Ogl => 2,
            Platform::Ps2 => 4,
            Platform::Xbox => 5,
            Platform::D3d8 => 8,
            Platform::D3d9 => 9,
        }
    }

    /// Whether this is one of the Direct3D platforms the codec can write.
    pub const fn is_d3d(self) -> bool {
        matches!(self, Platform::D3d8 | Platform::D3d9)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::D3d8 => "D3D8",
            Platform::D3d9 => "D3D9",
            Platform::Ps2 => "PS2",
            Platform::Xbox => "Xbox",
            Platform::Ogl => "OpenGL",
        };
        f.write_str(name)
    }
}

/// One mipmap level.
///
/// Dimensions of levels past the first are not stored on disk; the reader
/// derives them by halving with a floor of 1, raising values under 4 to 4
/// for block-compressed data. A level with an empty payload is a hole and
/// zeroes its own and every later level's dimensions.
#[derive(Debug, Clone, Default)]
pub struct MipLevel {
    /// Pixel width of this level.
    pub width: u32,
    /// Pixel height of this level.
    pub height: u32,
    /// Raw pixel payload exactly as stored.
    pub bytes: Vec<u8>,
}

impl MipLevel {
    /// The serialized payload size.
    pub fn byte_size(&self) -> u32 {
        self.bytes.len() as u32
    }
}

/// Fixed-layout portion of a D3D STRUCT payload after the platform word.
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct RasterHeader {
    filter_flags: U32,
    name: [u8; NAME_SIZE],
    mask_name: [u8; NAME_SIZE],
    raster_format: U32,
    /// D3D8: 32-bit alpha flag. D3D9: compression FourCC, or the D3D
    /// format code when uncompressed.
    format_word: [u8; 4],
    width: U16,
    height: U16,
    depth: u8,
    mipmap_count: u8,
    raster_type: u8,
    flags: u8,
}

/// A native texture and all the bytes it owns.
#[derive(Debug, Clone)]
pub struct Texture {
    /// Target platform.
    pub platform: Platform,
    /// Texture name, at most 31 ASCII bytes.
    pub name: String,
    /// Alpha-mask texture name, same limit.
    pub mask_name: String,
    /// Opaque render-state word (filtering and addressing modes).
    pub filter_flags: u32,
    /// On-disk raster format word. Informational after a load; rewritten
    /// from the alpha/compression choice when saving through the editor
    /// entry form.
    pub raster_format: u32,
    /// Bits per pixel as stored.
    pub depth: u8,
    /// Whether the alpha channel is meaningful.
    pub has_alpha: bool,
    /// Block-compression scheme of the mipmap payloads.
    pub compression: Compression,
    /// Mipmap chain, largest level first.
    pub mipmaps: Vec<MipLevel>,
    /// Palette in on-disk BGRA order; present iff a PAL bit is set in
    /// `raster_format`.
    pub palette: Option<Vec<u8>>,
    /// Library version for this texture's chunk headers.
    pub version: u32,
    /// Raw STRUCT payload of a non-D3D texture, kept for inspection.
    pub raw_struct: Option<Vec<u8>>,
}

impl Default for Texture {
    fn default() -> Self {
        Self {
            platform: Platform::D3d8,
            name: String::new(),
            mask_name: String::new(),
            filter_flags: 0,
            raster_format: raster::DEFAULT,
            depth: 32,
            has_alpha: false,
            compression: Compression::None,
            mipmaps: Vec::new(),
            palette: None,
            version: TEXTURE_VERSION,
            raw_struct: None,
        }
    }
}

impl Texture {
    /// Width of the top mipmap level, or 0 when there is none.
    pub fn width(&self) -> u32 {
        self.mipmaps.first().map_or(0, |m| m.width)
    }

    /// Height of the top mipmap level, or 0 when there is none.
    pub fn height(&self) -> u32 {
        self.mipmaps.first().map_or(0, |m| m.height)
    }

    /// Number of mipmap levels.
    pub fn mipmap_count(&self) -> usize {
        self.mipmaps.len()
    }

    /// Parse the body of a TEXTURENATIVE chunk.
    ///
    /// `reader` must be positioned just past the chunk's own header; on
    /// success it is left at the end of the chunk's length window.
    pub fn read_body(reader: &mut BinaryReader<'_>, header: &ChunkHeader) -> Result<Self> {
        let window = Children::new(reader, header.length);

        let child = window.next(reader).ok_or_else(|| {
            Error::InvalidStructure("texture chunk has no readable children".into())
        })?;
        if child.chunk_type != ChunkType::STRUCT {
            return Err(Error::InvalidStructure(format!(
                "texture chunk starts with type {:#x}, expected a STRUCT",
                child.chunk_type.0
            )));
        }
        let struct_end = reader.position() + child.length as usize;

        let platform_code = reader.read_u32()?;
        let platform = Platform::from_code(platform_code)
            .ok_or(Error::UnsupportedPlatform(platform_code))?;

        let mut texture = if platform.is_d3d() {
            Self::read_d3d_struct(reader, platform, header.version)?
        } else {
            // Recognized but undecoded platform: keep the payload around.
            let remaining = struct_end.saturating_sub(reader.position());
            Texture {
                platform,
                version: header.version,
                raw_struct: Some(reader.read_bytes(remaining)?.to_vec()),
                ..Texture::default()
            }
        };
        texture.version = header.version;

        // The STRUCT may carry trailing bytes this codec does not model;
        // skip them, then walk whatever siblings remain (extensions,
        // unknown chunks) to the end of the window.
        reader.seek(struct_end);
        while let Some(extra) = window.next(reader) {
            window.skip(reader, &extra);
        }
        reader.seek(window.end());

        Ok(texture)
    }

    fn read_d3d_struct(
        reader: &mut BinaryReader<'_>,
        platform: Platform,
        version: u32,
    ) -> Result<Self> {
        let header: RasterHeader = reader.read_struct()?;

        if header.mipmap_count == 0 {
            return Err(Error::InvalidStructure("texture has a mipmap count of zero".into()));
        }

        let raster_format = header.raster_format.get();

        let (has_alpha, compression) = match platform {
            Platform::D3d8 => (
                u32::from_le_bytes(header.format_word) == 1,
                Compression::from_code(header.flags).unwrap_or_default(),
            ),
            _ => {
                let compressed = header.flags & 0x8 != 0;
                let compression = if compressed {
                    Compression::from_fourcc(header.format_word).unwrap_or_default()
                } else {
                    Compression::None
                };
                (header.flags & 0x1 != 0, compression)
            }
        };

        let palette = match raster::palette_entries(raster_format) {
            Some(entries) => Some(reader.read_bytes(entries * 4)?.to_vec()),
            None => None,
        };

        let mut width = header.width.get() as u32;
        let mut height = header.height.get() as u32;
        let mut hole = false;
        let mut mipmaps = Vec::with_capacity(header.mipmap_count as usize);

        for level in 0..header.mipmap_count {
            if level > 0 && !hole {
                width = (width / 2).max(1);
                height = (height / 2).max(1);
                if compression != Compression::None {
                    width = width.max(4);
                    height = height.max(4);
                }
            }

            let byte_size = reader.read_u32()? as usize;
            if byte_size == 0 {
                hole = true;
            }
            if hole {
                width = 0;
                height = 0;
            }

            let bytes = if byte_size > 0 {
                reader.read_bytes(byte_size)?.to_vec()
            } else {
                Vec::new()
            };

            mipmaps.push(MipLevel {
                width,
                height,
                bytes,
            });
        }

        Ok(Texture {
            platform,
            name: name_from_slot(&header.name),
            mask_name: name_from_slot(&header.mask_name),
            filter_flags: header.filter_flags.get(),
            raster_format,
            depth: header.depth,
            has_alpha,
            compression,
            mipmaps,
            palette,
            version,
            raw_struct: None,
        })
    }

    /// Serialize as a complete TEXTURENATIVE chunk.
    pub fn write(&self, writer: &mut BinaryWriter) -> Result<()> {
        if !self.platform.is_d3d() {
            return Err(Error::UnsupportedPlatform(self.platform.code()));
        }
        if self.mipmaps.is_empty() {
            return Err(Error::InvalidStructure("texture has no mipmap levels".into()));
        }
        match (raster::palette_entries(self.raster_format), &self.palette) {
            (Some(entries), Some(palette)) if palette.len() != entries * 4 => {
                return Err(Error::InvalidStructure(format!(
                    "palette holds {} bytes, format requires {}",
                    palette.len(),
                    entries * 4
                )));
            }
            (Some(_), None) => {
                return Err(Error::InvalidStructure(
                    "raster format requires a palette but none is set".into(),
                ));
            }
            (None, Some(_)) => {
                return Err(Error::InvalidStructure(
                    "palette set but raster format has no palette bit".into(),
                ));
            }
            _ => {}
        }

        let native_start = writer.position();
        ChunkHeader::new(ChunkType::TEXTURE_NATIVE, 0, self.version).write(writer);

        let struct_start = writer.position();
        ChunkHeader::new(ChunkType::STRUCT, 0, self.version).write(writer);

        writer.write_u32(self.platform.code());

        let format_word = match self.platform {
            Platform::D3d8 => u32::to_le_bytes(self.has_alpha as u32),
            _ => match self.compression.fourcc() {
                Some(fourcc) => fourcc,
                None => {
                    let code = if self.has_alpha {
                        D3DFMT_A8R8G8B8
                    } else {
                        D3DFMT_X8R8G8B8
                    };
                    code.to_le_bytes()
                }
            },
        };

        let flags = match self.platform {
            Platform::D3d8 => self.compression.code(),
            _ => {
                let compressed = if self.compression != Compression::None {
                    0x8
                } else {
                    0
                };
                (self.has_alpha as u8) | compressed
            }
        };

        let header = RasterHeader {
            filter_flags: U32::new(self.filter_flags),
            name: name_to_slot(&self.name),
            mask_name: name_to_slot(&self.mask_name),
            raster_format: U32::new(self.raster_format),
            format_word,
            width: U16::new(self.width() as u16),
            height: U16::new(self.height() as u16),
            depth: self.depth,
            mipmap_count: self.mipmaps.len() as u8,
            raster_type: RASTER_TYPE,
            flags,
        };
        writer.write_bytes(header.as_bytes());

        if let Some(palette) = &self.palette {
            writer.write_bytes(palette);
        }

        for level in &self.mipmaps {
            writer.write_u32(level.byte_size());
            writer.write_bytes(&level.bytes);
        }

        let struct_length = writer.position() - struct_start - HEADER_SIZE;
        writer.patch_u32(struct_start + 4, struct_length as u32);

        ChunkHeader::new(ChunkType::EXTENSION, 0, self.version).write(writer);

        let native_length = writer.position() - native_start - HEADER_SIZE;
        writer.patch_u32(native_start + 4, native_length as u32);

        Ok(())
    }
}

/// Extract the name from a fixed 32-byte slot.
fn name_from_slot(slot: &[u8; NAME_SIZE]) -> String {
    let len = memchr::memchr(0, slot).unwrap_or(slot.len());
    String::from_utf8_lossy(&slot[..len]).into_owned()
}

/// Pack a name into a fixed slot, truncating to 31 bytes.
fn name_to_slot(name: &str) -> [u8; NAME_SIZE] {
    let mut slot = [0u8; NAME_SIZE];
    let bytes = name.as_bytes();
    let len = bytes.len().min(NAME_SIZE - 1);
    slot[..len].copy_from_slice(&bytes[..len]);
    slot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(texture: &Texture) -> Texture {
        let mut writer = BinaryWriter::new();
        texture.write(&mut writer).unwrap();
        let bytes = writer.into_bytes();

        let mut reader = BinaryReader::new(&bytes);
        let header = ChunkHeader::read(&mut reader).unwrap();
        assert_eq!(header.chunk_type, ChunkType::TEXTURE_NATIVE);
        let back = Texture::read_body(&mut reader, &header).unwrap();
        assert_eq!(reader.position(), bytes.len());
        back
    }

    fn flat_texture(platform: Platform) -> Texture {
        Texture {
            platform,
            name: "body".into(),
            mask_name: String::new(),
            filter_flags: 0x1106,
            raster_format: raster::B8G8R8A8,
            depth: 32,
            has_alpha: true,
            mipmaps: vec![MipLevel {
                width: 4,
                height: 2,
                bytes: vec![0xAB; 4 * 2 * 4],
            }],
            ..Texture::default()
        }
    }

    #[test]
    fn test_name_slot_round_trip() {
        for name in ["", "a", "wheel_rim", &"x".repeat(31)] {
            let slot = name_to_slot(name);
            assert_eq!(slot[NAME_SIZE - 1], 0);
            assert_eq!(name_from_slot(&slot), name);
        }
    }

    #[test]
    fn test_name_slot_truncates_long_names() {
        let slot = name_to_slot(&"y".repeat(40));
        assert_eq!(name_from_slot(&slot), "y".repeat(31));
    }

    #[test]
    fn test_d3d8_round_trip() {
        let texture = flat_texture(Platform::D3d8);
        let back = round_trip(&texture);

        assert_eq!(back.platform, Platform::D3d8);
        assert_eq!(back.name, "body");
        assert_eq!(back.filter_flags, 0x1106);
        assert_eq!(back.raster_format, raster::B8G8R8A8);
        assert_eq!(back.depth, 32);
        assert!(back.has_alpha);
        assert_eq!(back.compression, Compression::None);
        assert_eq!(back.mipmaps.len(), 1);
        assert_eq!(back.mipmaps[0].width, 4);
        assert_eq!(back.mipmaps[0].height, 2);
        assert_eq!(back.mipmaps[0].bytes, texture.mipmaps[0].bytes);
    }

    #[test]
    fn test_d3d9_compressed_round_trip() {
        let texture = Texture {
            platform: Platform::D3d9,
            name: "roof".into(),
            raster_format: raster::B8G8R8,
            depth: 16,
            has_alpha: false,
            compression: Compression::Dxt1,
            mipmaps: vec![MipLevel {
                width: 8,
                height: 8,
                bytes: vec![0x55; 32],
            }],
            ..Texture::default()
        };
        let back = round_trip(&texture);

        assert_eq!(back.platform, Platform::D3d9);
        assert_eq!(back.compression, Compression::Dxt1);
        assert!(!back.has_alpha);
        assert_eq!(back.mipmaps[0].bytes, texture.mipmaps[0].bytes);
    }

    #[test]
    fn test_d3d9_fourcc_flags_layout() {
        // platform=9, FourCC "DXT1", flags bit 3: the exact wire shape a
        // San Andreas dictionary uses for an 8x8 single-level texture.
        let texture = Texture {
            platform: Platform::D3d9,
            compression: Compression::Dxt1,
            raster_format: raster::B8G8R8,
            depth: 16,
            mipmaps: vec![MipLevel {
                width: 8,
                height: 8,
                bytes: vec![0; 32],
            }],
            ..Texture::default()
        };

        let mut writer = BinaryWriter::new();
        texture.write(&mut writer).unwrap();
        let bytes = writer.into_bytes();

        // Past both chunk headers: platform(4) + filter(4) + names(64) +
        // raster(4) puts the FourCC at offset 76 of the struct payload.
        let body = &bytes[2 * HEADER_SIZE..];
        assert_eq!(&body[76..80], b"DXT1");
        // width/height/depth sit at 80..85, then the count/type/flags run.
        assert_eq!(body[85], 1); // single mipmap
        assert_eq!(body[86], 4); // raster type
        assert_eq!(body[87] & 0x8, 0x8); // compressed bit
    }

    #[test]
    fn test_palette_round_trip() {
        let mut palette = vec![0u8; 64];
        for (i, b) in palette.iter_mut().enumerate() {
            *b = i as u8;
        }
        let texture = Texture {
            platform: Platform::D3d8,
            name: "ground".into(),
            raster_format: raster::PAL4 | raster::B8G8R8A8,
            depth: 8,
            palette: Some(palette.clone()),
            mipmaps: vec![MipLevel {
                width: 4,
                height: 4,
                bytes: vec![3; 16],
            }],
            ..Texture::default()
        };
        let back = round_trip(&texture);

        assert_eq!(back.palette.as_deref(), Some(&palette[..]));
        assert_eq!(back.mipmaps[0].bytes, texture.mipmaps[0].bytes);
    }

    #[test]
    fn test_mipmap_geometry_reconstruction() {
        // Five uncompressed levels from 16x8: 16x8, 8x4, 4x2, 2x1, 1x1.
        let sizes = [(16u32, 8u32), (8, 4), (4, 2), (2, 1), (1, 1)];
        let texture = Texture {
            platform: Platform::D3d8,
            raster_format: raster::B8G8R8A8,
            depth: 32,
            mipmaps: sizes
                .iter()
                .map(|&(w, h)| MipLevel {
                    width: w,
                    height: h,
                    bytes: vec![0; (w * h * 4) as usize],
                })
                .collect(),
            ..Texture::default()
        };
        let back = round_trip(&texture);

        for (level, &(w, h)) in back.mipmaps.iter().zip(sizes.iter()) {
            assert_eq!((level.width, level.height), (w, h));
        }
    }

    #[test]
    fn test_mipmap_geometry_dxt_clamps_to_four() {
        // Compressed levels never derive below 4x4.
        let dims = [(16u32, 16u32), (8, 8), (4, 4), (4, 4)];
        let texture = Texture {
            platform: Platform::D3d9,
            raster_format: raster::B8G8R8,
            depth: 16,
            compression: Compression::Dxt1,
            mipmaps: dims
                .iter()
                .map(|&(w, h)| MipLevel {
                    width: w,
                    height: h,
                    bytes: vec![0; ((w / 4) * (h / 4) * 8).max(8) as usize],
                })
                .collect(),
            ..Texture::default()
        };
        let back = round_trip(&texture);

        for (level, &(w, h)) in back.mipmaps.iter().zip(dims.iter()) {
            assert_eq!((level.width, level.height), (w, h));
        }
    }

    #[test]
    fn test_zero_sized_mipmap_is_a_hole() {
        let texture = Texture {
            platform: Platform::D3d8,
            raster_format: raster::B8G8R8A8,
            depth: 32,
            mipmaps: vec![
                MipLevel {
                    width: 8,
                    height: 8,
                    bytes: vec![0; 8 * 8 * 4],
                },
                MipLevel::default(),
                MipLevel::default(),
            ],
            ..Texture::default()
        };
        let back = round_trip(&texture);

        assert_eq!((back.mipmaps[0].width, back.mipmaps[0].height), (8, 8));
        for level in &back.mipmaps[1..] {
            assert_eq!((level.width, level.height), (0, 0));
            assert!(level.bytes.is_empty());
        }
    }

    #[test]
    fn test_non_struct_first_child_rejected() {
        let mut writer = BinaryWriter::new();
        let start = writer.position();
        ChunkHeader::new(ChunkType::TEXTURE_NATIVE, 0, TEXTURE_VERSION).write(&mut writer);
        ChunkHeader::new(ChunkType::STRING, 4, TEXTURE_VERSION).write(&mut writer);
        writer.write_u32(0);
        let length = (writer.position() - start - HEADER_SIZE) as u32;
        writer.patch_u32(start + 4, length);
        let bytes = writer.into_bytes();

        let mut reader = BinaryReader::new(&bytes);
        let header = ChunkHeader::read(&mut reader).unwrap();
        assert!(matches!(
            Texture::read_body(&mut reader, &header),
            Err(Error::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let mut writer = BinaryWriter::new();
        let start = writer.position();
        ChunkHeader::new(ChunkType::TEXTURE_NATIVE, 0, TEXTURE_VERSION).write(&mut writer);
        ChunkHeader::new(ChunkType::STRUCT, 4, TEXTURE_VERSION).write(&mut writer);
        writer.write_u32(0xDEAD);
        let length = (writer.position() - start - HEADER_SIZE) as u32;
        writer.patch_u32(start + 4, length);
        let bytes = writer.into_bytes();

        let mut reader = BinaryReader::new(&bytes);
        let header = ChunkHeader::read(&mut reader).unwrap();
        assert!(matches!(
            Texture::read_body(&mut reader, &header),
            Err(Error::UnsupportedPlatform(0xDEAD))
        ));
    }

    #[test]
    fn test_ps2_body_is_carried_but_not_writable() {
        let mut writer = BinaryWriter::new();
        let start = writer.position();
        ChunkHeader::new(ChunkType::TEXTURE_NATIVE, 0, TEXTURE_VERSION).write(&mut writer);
        let struct_start = writer.position();
        ChunkHeader::new(ChunkType::STRUCT, 0, TEXTURE_VERSION).write(&mut writer);
        writer.write_u32(Platform::Ps2.code());
        writer.write_bytes(&[0xEE; 24]);
        let struct_length = (writer.position() - struct_start - HEADER_SIZE) as u32;
        writer.patch_u32(struct_start + 4, struct_length);
        let length = (writer.position() - start - HEADER_SIZE) as u32;
        writer.patch_u32(start + 4, length);
        let bytes = writer.into_bytes();

        let mut reader = BinaryReader::new(&bytes);
        let header = ChunkHeader::read(&mut reader).unwrap();
        let texture = Texture::read_body(&mut reader, &header).unwrap();

        assert_eq!(texture.platform, Platform::Ps2);
        assert_eq!(texture.raw_struct.as_deref(), Some(&[0xEE; 24][..]));

        let mut out = BinaryWriter::new();
        assert!(matches!(
            texture.write(&mut out),
            Err(Error::UnsupportedPlatform(4))
        ));
    }

    #[test]
    fn test_write_rejects_missing_mipmaps() {
        let texture = Texture::default();
        let mut writer = BinaryWriter::new();
        assert!(matches!(
            texture.write(&mut writer),
            Err(Error::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_write_rejects_palette_mismatch() {
        let mut texture = flat_texture(Platform::D3d8);
        texture.raster_format = raster::PAL8 | raster::B8G8R8A8;
        texture.palette = Some(vec![0; 64]); // PAL8 needs 1024
        let mut writer = BinaryWriter::new();
        assert!(matches!(
            texture.write(&mut writer),
            Err(Error::InvalidStructure(_))
        ));
    }
}
