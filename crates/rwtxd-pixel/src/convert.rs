//! Direct-format and palette conversion to and from canonical RGBA.
//!
//! The on-disk channel order is B,G,R\[,A\] for the byte-per-channel
//! formats and little-endian packed words for the 16-bit formats. Both
//! directions go through here so no other module ever sees BGRA.

use crate::dxt;
use crate::format::{raster, Compression};
use crate::{Error, Result, CANONICAL_BPP};

/// Decode one mipmap level to canonical RGBA.
///
/// Dispatches on the palette bits, the compression scheme, and the
/// raster-format layout bits, in that order. `palette` must be the on-disk
/// BGRA palette when a palette bit is set and is ignored otherwise.
pub fn decode(
    data: &[u8],
    palette: Option<&[u8]>,
    width: u32,
    height: u32,
    raster_format: u32,
    depth: u8,
    compression: Compression,
) -> Result<Vec<u8>> {
    if let Some(entries) = raster::palette_entries(raster_format) {
        let palette = palette.ok_or(Error::UnsupportedFormat {
            format: raster_format,
        })?;
        return decode_palette(data, palette, entries, width, height);
    }

    match compression {
        Compression::None => decode_direct(data, width, height, raster_format, depth),
        Compression::Dxt1 | Compression::Dxt3 => dxt::decompress(data, width, height, compression),
    }
}

/// Decode an uncompressed direct-format buffer to canonical RGBA.
pub fn decode_direct(
    data: &[u8],
    width: u32,
    height: u32,
    raster_format: u32,
    depth: u8,
) -> Result<Vec<u8>> {
    let pixels = width as usize * height as usize;
    let layout = raster_format & raster::MASK;
    let min_bpp = match layout {
        raster::B8G8R8A8 => 4,
        raster::B8G8R8 => 3,
        raster::R5G6B5 | raster::A1R5G5B5 | raster::R4G4B4A4 => 2,
        raster::LUM8 => 1,
        _ => {
            return Err(Error::UnsupportedFormat {
                format: raster_format,
            })
        }
    };

    // The recorded depth sets the stride; a depth too small to hold the
    // format has no decoder.
    let bpp = match depth as usize / 8 {
        0 => min_bpp,
        n => n,
    };
    if bpp < min_bpp {
        return Err(Error::UnsupportedFormat {
            format: raster_format,
        });
    }

    let expected = pixels * bpp;
    if data.len() < expected {
        return Err(Error::BufferSize {
            expected,
            actual: data.len(),
        });
    }

    let mut out = vec![0u8; pixels * CANONICAL_BPP];

    for i in 0..pixels {
        let src = &data[i * bpp..];
        let dst = &mut out[i * CANONICAL_BPP..i * CANONICAL_BPP + 4];

        let (r, g, b, a) = match layout {
            raster::B8G8R8A8 => (src[2], src[1], src[0], src[3]),
            raster::B8G8R8 => (src[2], src[1], src[0], 255),
            raster::R5G6B5 => {
                let px = u16::from_le_bytes([src[0], src[1]]);
                (
                    (((px >> 11) & 0x1F) << 3) as u8,
                    (((px >> 5) & 0x3F) << 2) as u8,
                    ((px & 0x1F) << 3) as u8,
                    255,
                )
            }
            raster::A1R5G5B5 => {
                let px = u16::from_le_bytes([src[0], src[1]]);
                (
                    (((px >> 10) & 0x1F) << 3) as u8,
                    (((px >> 5) & 0x1F) << 3) as u8,
                    ((px & 0x1F) << 3) as u8,
                    if px >> 15 != 0 { 255 } else { 0 },
                )
            }
            raster::R4G4B4A4 => {
                let px = u16::from_le_bytes([src[0], src[1]]);
                (
                    (((px >> 12) & 0xF) << 4) as u8,
                    (((px >> 8) & 0xF) << 4) as u8,
                    (((px >> 4) & 0xF) << 4) as u8,
                    ((px & 0xF) << 4) as u8,
                )
            }
            raster::LUM8 => (src[0], src[0], src[0], 255),
            _ => {
                return Err(Error::UnsupportedFormat {
                    format: raster_format,
                })
            }
        };

        dst[0] = r;
        dst[1] = g;
        dst[2] = b;
        dst[3] = a;
    }

    Ok(out)
}

/// Encode canonical RGBA into an uncompressed direct-format buffer.
///
/// This is the exact inverse of [`decode_direct`] for every format it
/// accepts; sub-8-bit channels truncate the canonical value down.
pub fn encode_direct(rgba: &[u8], width: u32, height: u32, raster_format: u32) -> Result<Vec<u8>> {
    let pixels = width as usize * height as usize;
    let expected = pixels * CANONICAL_BPP;
    if rgba.len() < expected {
        return Err(Error::BufferSize {
            expected,
            actual: rgba.len(),
        });
    }

    let layout = raster_format & raster::MASK;
    let mut out = Vec::with_capacity(pixels * 4);

    for i in 0..pixels {
        let px = &rgba[i * CANONICAL_BPP..i * CANONICAL_BPP + 4];
        let (r, g, b, a) = (px[0], px[1], px[2], px[3]);

        match layout {
            raster::B8G8R8A8 => out.extend_from_slice(&[b, g, r, a]),
            raster::B8G8R8 => out.extend_from_slice(&[b, g, r]),
            raster::R5G6B5 => {
                let px =
                    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3);
                out.extend_from_slice(&px.to_le_bytes());
            }
            raster::A1R5G5B5 => {
                let px = (((a as u16 >> 7) & 1) << 15)
                    | ((r as u16 >> 3) << 10)
                    | ((g as u16 >> 3) << 5)
                    | (b as u16 >> 3);
                out.extend_from_slice(&px.to_le_bytes());
            }
            raster::R4G4B4A4 => {
                let px = ((r as u16 >> 4) << 12)
                    | ((g as u16 >> 4) << 8)
                    | ((b as u16 >> 4) << 4)
                    | (a as u16 >> 4);
                out.extend_from_slice(&px.to_le_bytes());
            }
            raster::LUM8 => out.push(r),
            _ => {
                return Err(Error::UnsupportedFormat {
                    format: raster_format,
                })
            }
        }
    }

    Ok(out)
}

/// Decode an indexed buffer through its on-disk BGRA palette.
pub fn decode_palette(
    indices: &[u8],
    palette: &[u8],
    entries: usize,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    let pixels = width as usize * height as usize;
    if indices.len() < pixels {
        return Err(Error::BufferSize {
            expected: pixels,
            actual: indices.len(),
        });
    }
    if palette.len() < entries * 4 {
        return Err(Error::BufferSize {
            expected: entries * 4,
            actual: palette.len(),
        });
    }

    let mut out = vec![0u8; pixels * CANONICAL_BPP];
    for (i, &index) in indices[..pixels].iter().enumerate() {
        let index = if (index as usize) < entries { index as usize } else { 0 };
        let entry = &palette[index * 4..index * 4 + 4];
        let dst = &mut out[i * CANONICAL_BPP..i * CANONICAL_BPP + 4];
        // Palette entries are B,G,R,A on disk.
        dst[0] = entry[2];
        dst[1] = entry[1];
        dst[2] = entry[0];
        dst[3] = entry[3];
    }

    Ok(out)
}

/// Reconstruct canonical RGBA from indices and an RGBA-ordered palette.
///
/// This is the in-memory counterpart of [`decode_palette`]: the quantizer
/// emits its palette in R,G,B,A order and this lookup performs no channel
/// swap. Out-of-range indices fall back to entry 0.
pub fn palette_to_rgba(
    indices: &[u8],
    palette: &[u8],
    entries: usize,
    width: u32,
    height: u32,
) -> Result<Vec<u8>> {
    let pixels = width as usize * height as usize;
    if indices.len() < pixels {
        return Err(Error::BufferSize {
            expected: pixels,
            actual: indices.len(),
        });
    }
    if palette.len() < entries * 4 {
        return Err(Error::BufferSize {
            expected: entries * 4,
            actual: palette.len(),
        });
    }

    let mut out = vec![0u8; pixels * CANONICAL_BPP];
    for (i, &index) in indices[..pixels].iter().enumerate() {
        let index = if (index as usize) < entries { index as usize } else { 0 };
        out[i * CANONICAL_BPP..i * CANONICAL_BPP + 4]
            .copy_from_slice(&palette[index * 4..index * 4 + 4]);
    }

    Ok(out)
}

/// Swap an RGBA palette to the on-disk BGRA order, or back.
///
/// The swap is its own inverse; callers apply it exactly once at the disk
/// boundary.
pub fn swap_palette_order(palette: &mut [u8]) {
    for entry in palette.chunks_exact_mut(4) {
        entry.swap(0, 2);
    }
}
