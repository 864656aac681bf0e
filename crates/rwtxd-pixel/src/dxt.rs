//! Reference DXT1/DXT3 block codec.
//!
//! Both schemes work on 4x4 pixel blocks. A DXT1 block is 8 bytes: two
//! R5G6B5 endpoints and a 32-bit table of 2-bit palette indices. A DXT3
//! block prepends 8 bytes holding a 4-bit alpha value per pixel. The
//! decoder reproduces exactly the palette rules game engines use; the
//! encoder offers two deterministic endpoint-search strategies selected by
//! a quality parameter.

use crate::format::Compression;
use crate::{Error, Result, CANONICAL_BPP};

/// Exact byte size of a compressed payload for the given dimensions.
///
/// Returns 0 for [`Compression::None`].
pub fn compressed_size(width: u32, height: u32, compression: Compression) -> usize {
    let blocks_x = width.div_ceil(4) as usize;
    let blocks_y = height.div_ceil(4) as usize;
    blocks_x * blocks_y * compression.block_bytes()
}

/// Expand a packed R5G6B5 value to 8-bit channels.
#[inline]
fn expand565(value: u16) -> [u8; 3] {
    [
        (((value >> 11) & 0x1F) << 3) as u8,
        (((value >> 5) & 0x3F) << 2) as u8,
        ((value & 0x1F) << 3) as u8,
    ]
}

/// Pack 8-bit channels into R5G6B5, truncating the low bits.
#[inline]
fn pack565(rgb: [u8; 3]) -> u16 {
    ((rgb[0] as u16 >> 3) << 11) | ((rgb[1] as u16 >> 2) << 5) | (rgb[2] as u16 >> 3)
}

#[inline]
fn interp_third(a: u8, b: u8) -> u8 {
    ((2 * a as u16 + b as u16) / 3) as u8
}

#[inline]
fn interp_half(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16) / 2) as u8
}

/// Build the 4-entry RGB palette of a color block.
///
/// `one_bit_alpha` selects the DXT1 rule where `c0 <= c1` switches to the
/// three-color mode with a transparent black fourth entry; DXT3 color
/// blocks are always four-color and always opaque.
fn color_palette(c0: u16, c1: u16, one_bit_alpha: bool) -> [[u8; 4]; 4] {
    let e0 = expand565(c0);
    let e1 = expand565(c1);

    let mut palette = [[0u8; 4]; 4];
    palette[0] = [e0[0], e0[1], e0[2], 255];
    palette[1] = [e1[0], e1[1], e1[2], 255];

    if !one_bit_alpha || c0 > c1 {
        palette[2] = [
            interp_third(e0[0], e1[0]),
            interp_third(e0[1], e1[1]),
            interp_third(e0[2], e1[2]),
            255,
        ];
        palette[3] = [
            interp_third(e1[0], e0[0]),
            interp_third(e1[1], e0[1]),
            interp_third(e1[2], e0[2]),
            255,
        ];
    } else {
        palette[2] = [
            interp_half(e0[0], e1[0]),
            interp_half(e0[1], e1[1]),
            interp_half(e0[2], e1[2]),
            255,
        ];
        palette[3] = [0, 0, 0, 0];
    }

    palette
}

/// Decompress a DXT payload into a canonical RGBA buffer.
///
/// The output is exactly `width * height * 4` bytes; the rows and columns
/// a partial edge block covers beyond the image are discarded.
pub fn decompress(
    data: &[u8],
    width: u32,
    height: u32,
    compression: Compression,
) -> Result<Vec<u8>> {
    if compression == Compression::None {
        return Err(Error::CompressorFailed("not a block-compressed format"));
    }

    let block_bytes = compression.block_bytes();
    let blocks_x = width.div_ceil(4) as usize;
    let blocks_y = height.div_ceil(4) as usize;

    let expected = blocks_x * blocks_y * block_bytes;
    if data.len() < expected {
        return Err(Error::BufferSize {
            expected,
            actual: data.len(),
        });
    }

    let width = width as usize;
    let height = height as usize;
    let mut out = vec![0u8; width * height * CANONICAL_BPP];

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let block = &data[(by * blocks_x + bx) * block_bytes..][..block_bytes];

            let (alpha_half, color_half) = match compression {
                Compression::Dxt3 => (Some(&block[..8]), &block[8..16]),
                _ => (None, &block[..8]),
            };

            let c0 = u16::from_le_bytes([color_half[0], color_half[1]]);
            let c1 = u16::from_le_bytes([color_half[2], color_half[3]]);
            let table = u32::from_le_bytes([
                color_half[4],
                color_half[5],
                color_half[6],
                color_half[7],
            ]);
            let palette = color_palette(c0, c1, compression == Compression::Dxt1);

            let alpha_bits = alpha_half.map(|half| {
                u64::from_le_bytes([
                    half[0], half[1], half[2], half[3], half[4], half[5], half[6], half[7],
                ])
            });

            for py in 0..4 {
                for px in 0..4 {
                    let x = bx * 4 + px;
                    let y = by * 4 + py;
                    if x >= width || y >= height {
                        continue;
                    }

                    let i = py * 4 + px;
                    let index = ((table >> (2 * i)) & 0x3) as usize;
                    let mut pixel = palette[index];

                    if let Some(bits) = alpha_bits {
                        let a4 = ((bits >> (4 * i)) & 0xF) as u8;
                        pixel[3] = (a4 << 4) | a4;
                    }

                    let offset = (y * width + x) * CANONICAL_BPP;
                    out[offset..offset + 4].copy_from_slice(&pixel);
                }
            }
        }
    }

    Ok(out)
}

/// Compress a canonical RGBA buffer into a DXT payload.
///
/// `quality` in `[0, 1]` selects the endpoint search: 0.5 and above runs a
/// cluster fit over the block's distinct colors, below that a faster range
/// fit over the channel extents. Both strategies are deterministic, so
/// identical input always produces identical output.
pub fn compress(
    rgba: &[u8],
    width: u32,
    height: u32,
    compression: Compression,
    quality: f32,
) -> Result<Vec<u8>> {
    if compression == Compression::None {
        return Err(Error::CompressorFailed("no block format selected"));
    }
    if width == 0 || height == 0 {
        return Err(Error::CompressorFailed("image has no pixels"));
    }

    let pixels = width as usize * height as usize;
    let expected = pixels * CANONICAL_BPP;
    if rgba.len() < expected {
        return Err(Error::BufferSize {
            expected,
            actual: rgba.len(),
        });
    }

    let blocks_x = width.div_ceil(4) as usize;
    let blocks_y = height.div_ceil(4) as usize;
    let cluster = quality >= 0.5;

    let mut out = Vec::with_capacity(blocks_x * blocks_y * compression.block_bytes());

    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let block = gather_block(rgba, width as usize, height as usize, bx, by);

            if compression == Compression::Dxt3 {
                let mut alpha_bits = 0u64;
                for (i, pixel) in block.iter().enumerate() {
                    let a4 = (pixel[3] as u64 + 0x8) / 0x11;
                    alpha_bits |= a4 << (4 * i);
                }
                out.extend_from_slice(&alpha_bits.to_le_bytes());
            }

            let (c0, c1) = if cluster {
                cluster_fit(&block)
            } else {
                range_fit(&block)
            };
            let (c0, c1, indices) = encode_color_block(&block, c0, c1);

            out.extend_from_slice(&c0.to_le_bytes());
            out.extend_from_slice(&c1.to_le_bytes());
            out.extend_from_slice(&indices.to_le_bytes());
        }
    }

    Ok(out)
}

/// Copy one 4x4 block out of the image, clamping reads at the edges.
fn gather_block(rgba: &[u8], width: usize, height: usize, bx: usize, by: usize) -> [[u8; 4]; 16] {
    let mut block = [[0u8; 4]; 16];
    for py in 0..4 {
        for px in 0..4 {
            let x = (bx * 4 + px).min(width - 1);
            let y = (by * 4 + py).min(height - 1);
            let offset = (y * width + x) * CANONICAL_BPP;
            block[py * 4 + px].copy_from_slice(&rgba[offset..offset + 4]);
        }
    }
    block
}

#[inline]
fn color_distance(a: [u8; 4], b: [u8; 4]) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Pick endpoints from the per-channel extents of the block.
fn range_fit(block: &[[u8; 4]; 16]) -> (u16, u16) {
    let mut lo = [255u8; 3];
    let mut hi = [0u8; 3];
    for pixel in block {
        for c in 0..3 {
            lo[c] = lo[c].min(pixel[c]);
            hi[c] = hi[c].max(pixel[c]);
        }
    }
    (pack565(hi), pack565(lo))
}

/// Exhaustive endpoint search over the block's distinct quantized colors.
///
/// Every unordered pair of distinct colors is scored as a pair of
/// endpoints by summing, over the block, the distance to the nearest of
/// the four palette entries it spans. Iteration order is fixed and only a
/// strictly smaller error replaces the best candidate, so the result is
/// deterministic.
fn cluster_fit(block: &[[u8; 4]; 16]) -> (u16, u16) {
    let mut colorspace: Vec<[u8; 4]> = Vec::with_capacity(16);
    for pixel in block {
        let rgb = expand565(pack565([pixel[0], pixel[1], pixel[2]]));
        let candidate = [rgb[0], rgb[1], rgb[2], 255];
        if !colorspace.contains(&candidate) {
            colorspace.push(candidate);
        }
    }

    if colorspace.len() == 1 {
        let packed = pack565([colorspace[0][0], colorspace[0][1], colorspace[0][2]]);
        return (packed, packed);
    }

    let mut best = (0u16, 0u16);
    let mut best_error = u32::MAX;

    for i in 0..colorspace.len() {
        for j in (i + 1)..colorspace.len() {
            let c0 = pack565([colorspace[i][0], colorspace[i][1], colorspace[i][2]]);
            let c1 = pack565([colorspace[j][0], colorspace[j][1], colorspace[j][2]]);
            let palette = color_palette(c0.max(c1), c0.min(c1), false);

            let error: u32 = block
                .iter()
                .map(|pixel| {
                    palette
                        .iter()
                        .map(|entry| color_distance(*pixel, *entry))
                        .min()
                        .unwrap_or(0)
                })
                .sum();

            if error < best_error {
                best_error = error;
                best = (c0, c1);
            }
        }
    }

    best
}

/// Assign indices against the chosen endpoints and fix their ordering.
///
/// The four-color palette requires `c0 > c1` on the wire; swapped
/// endpoints flip the index mapping (0 with 1, 2 with 3). Equal endpoints
/// collapse to index 0, which decodes to the exact endpoint color in
/// either mode.
fn encode_color_block(block: &[[u8; 4]; 16], c0: u16, c1: u16) -> (u16, u16, u32) {
    let (c0, c1) = if c0 >= c1 { (c0, c1) } else { (c1, c0) };

    if c0 == c1 {
        return (c0, c1, 0);
    }

    let palette = color_palette(c0, c1, false);
    let mut indices = 0u32;
    for (i, pixel) in block.iter().enumerate() {
        let mut index = 0usize;
        let mut nearest = u32::MAX;
        for (candidate, entry) in palette.iter().enumerate() {
            let distance = color_distance(*pixel, *entry);
            if distance < nearest {
                nearest = distance;
                index = candidate;
            }
        }
        indices |= (index as u32) << (2 * i);
    }

    (c0, c1, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let mut out = Vec::with_capacity((width * height) as usize * 4);
        for _ in 0..width * height {
            out.extend_from_slice(&rgba);
        }
        out
    }

    #[test]
    fn test_compressed_size() {
        assert_eq!(compressed_size(4, 4, Compression::Dxt1), 8);
        assert_eq!(compressed_size(8, 8, Compression::Dxt1), 32);
        assert_eq!(compressed_size(64, 64, Compression::Dxt1), 2048);
        assert_eq!(compressed_size(4, 4, Compression::Dxt3), 16);
        assert_eq!(compressed_size(64, 64, Compression::Dxt3), 4096);
        assert_eq!(compressed_size(64, 64, Compression::None), 0);
        // Non-multiple-of-4 dimensions round the block grid up.
        assert_eq!(compressed_size(5, 5, Compression::Dxt1), 32);
        assert_eq!(compressed_size(1, 1, Compression::Dxt3), 16);
    }

    #[test]
    fn test_solid_color_round_trip_within_tolerance() {
        for quality in [0.0, 1.0] {
            let image = solid(8, 8, [200, 100, 50, 255]);
            let compressed = compress(&image, 8, 8, Compression::Dxt1, quality).unwrap();
            assert_eq!(compressed.len(), 32);

            let decoded = decompress(&compressed, 8, 8, Compression::Dxt1).unwrap();
            for (got, want) in decoded.iter().zip(image.iter()) {
                assert!(
                    (*got as i32 - *want as i32).abs() <= 20,
                    "channel drifted: got {got}, want {want}"
                );
            }
        }
    }

    #[test]
    fn test_dxt3_preserves_explicit_alpha() {
        let image = solid(4, 4, [10, 20, 30, 0x88]);
        let compressed = compress(&image, 4, 4, Compression::Dxt3, 1.0).unwrap();
        assert_eq!(compressed.len(), 16);

        let decoded = decompress(&compressed, 4, 4, Compression::Dxt3).unwrap();
        for pixel in decoded.chunks_exact(4) {
            // 0x88 quantizes to the 4-bit value 8, expanded back as 0x88.
            assert_eq!(pixel[3], 0x88);
        }
    }

    #[test]
    fn test_dxt1_three_color_mode_transparent_black() {
        // c0 <= c1 selects the three-color palette; index 3 decodes to
        // transparent black.
        let mut block = Vec::new();
        block.extend_from_slice(&0x0000u16.to_le_bytes()); // c0
        block.extend_from_slice(&0xFFFFu16.to_le_bytes()); // c1
        block.extend_from_slice(&0xFFFFFFFFu32.to_le_bytes()); // all index 3

        let decoded = decompress(&block, 4, 4, Compression::Dxt1).unwrap();
        for pixel in decoded.chunks_exact(4) {
            assert_eq!(pixel, &[0, 0, 0, 0]);
        }
    }

    #[test]
    fn test_dxt3_color_block_ignores_endpoint_order() {
        // Same endpoint order as the DXT1 test above, but DXT3 color
        // blocks never switch modes: index 3 is an opaque interpolation.
        let mut block = Vec::new();
        block.extend_from_slice(&[0xFF; 8]); // opaque alpha grid
        block.extend_from_slice(&0x0000u16.to_le_bytes());
        block.extend_from_slice(&0xFFFFu16.to_le_bytes());
        block.extend_from_slice(&0xFFFFFFFFu32.to_le_bytes());

        let decoded = decompress(&block, 4, 4, Compression::Dxt3).unwrap();
        for pixel in decoded.chunks_exact(4) {
            assert_ne!(pixel, &[0, 0, 0, 0]);
            assert_eq!(pixel[3], 255);
        }
    }

    #[test]
    fn test_edge_blocks_truncate_to_stated_dimensions() {
        let image = solid(6, 6, [64, 128, 192, 255]);
        let compressed = compress(&image, 6, 6, Compression::Dxt1, 1.0).unwrap();
        assert_eq!(compressed.len(), compressed_size(6, 6, Compression::Dxt1));

        let decoded = decompress(&compressed, 6, 6, Compression::Dxt1).unwrap();
        assert_eq!(decoded.len(), 6 * 6 * 4);
    }

    #[test]
    fn test_compression_is_deterministic() {
        let mut image = Vec::new();
        for i in 0..8 * 8 {
            image.extend_from_slice(&[(i * 7) as u8, (i * 13) as u8, (i * 29) as u8, 255]);
        }

        for quality in [0.0, 0.25, 0.5, 1.0] {
            let a = compress(&image, 8, 8, Compression::Dxt3, quality).unwrap();
            let b = compress(&image, 8, 8, Compression::Dxt3, quality).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_two_color_block_is_exact_with_cluster_fit() {
        // Two colors that survive 565 quantization unchanged.
        let mut image = Vec::new();
        for i in 0..16 {
            if i % 2 == 0 {
                image.extend_from_slice(&[248, 252, 248, 255]);
            } else {
                image.extend_from_slice(&[0, 0, 0, 255]);
            }
        }

        let compressed = compress(&image, 4, 4, Compression::Dxt1, 1.0).unwrap();
        let decoded = decompress(&compressed, 4, 4, Compression::Dxt1).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_decompress_rejects_short_payload() {
        let err = decompress(&[0u8; 4], 4, 4, Compression::Dxt1).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSize {
                expected: 8,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_compress_rejects_uncompressed_scheme() {
        let image = solid(4, 4, [0, 0, 0, 255]);
        assert!(matches!(
            compress(&image, 4, 4, Compression::None, 1.0),
            Err(Error::CompressorFailed(_))
        ));
    }
}
