//! Deterministic palette quantizer.
//!
//! Indexed textures store 16 or 256 palette entries. When an image already
//! fits the budget the palette is just its distinct colors in first-seen
//! order, which round-trips the image exactly. Otherwise a weighted
//! median-cut reduces the color set. Pixels are always visited row-major
//! and every choice breaks ties by fixed order, so the same input yields
//! the same palette and indices on every run.

use std::hash::BuildHasherDefault;

use hashbrown::HashMap as FastHashMap;
use rustc_hash::FxHasher;

use crate::{Error, Result, CANONICAL_BPP};

type FxHashMap<K, V> = FastHashMap<K, V, BuildHasherDefault<FxHasher>>;

/// A quantized image: palette in R,G,B,A order plus one index byte per
/// pixel.
///
/// The palette is zero-padded to the requested entry count; callers swap
/// it to BGRA when writing to disk.
#[derive(Debug, Clone)]
pub struct PaletteImage {
    /// `entry_count * 4` bytes, R,G,B,A per entry.
    pub palette: Vec<u8>,
    /// `width * height` palette indices, row-major.
    pub indices: Vec<u8>,
    /// Number of palette entries actually used.
    pub used: usize,
}

/// Quantize a canonical RGBA image to an indexed palette.
///
/// `target` must be 16 (PAL4) or 256 (PAL8).
pub fn quantize(rgba: &[u8], width: u32, height: u32, target: usize) -> Result<PaletteImage> {
    if target != 16 && target != 256 {
        return Err(Error::QuantizerFailed("palette size must be 16 or 256"));
    }

    let pixels = width as usize * height as usize;
    if pixels == 0 {
        return Err(Error::QuantizerFailed("image has no pixels"));
    }

    let expected = pixels * CANONICAL_BPP;
    if rgba.len() < expected {
        return Err(Error::BufferSize {
            expected,
            actual: rgba.len(),
        });
    }

    // First-seen color census, row-major.
    let mut seen: FxHashMap<[u8; 4], usize> = FxHashMap::default();
    let mut colors: Vec<[u8; 4]> = Vec::new();
    let mut counts: Vec<u32> = Vec::new();
    let mut color_of_pixel: Vec<usize> = Vec::with_capacity(pixels);

    for pixel in rgba[..expected].chunks_exact(CANONICAL_BPP) {
        let color = [pixel[0], pixel[1], pixel[2], pixel[3]];
        let slot = *seen.entry(color).or_insert_with(|| {
            colors.push(color);
            counts.push(0);
            colors.len() - 1
        });
        counts[slot] += 1;
        color_of_pixel.push(slot);
    }

    let entry_of_color: Vec<u8> = if colors.len() <= target {
        // Exact: each distinct color becomes its own entry.
        (0..colors.len()).map(|i| i as u8).collect()
    } else {
        median_cut(&mut colors, &counts, target)
    };

    let mut palette = vec![0u8; target * 4];
    let used = colors.len().min(target);
    for (entry, color) in colors.iter().take(used).enumerate() {
        palette[entry * 4..entry * 4 + 4].copy_from_slice(color);
    }

    let indices = color_of_pixel
        .into_iter()
        .map(|slot| entry_of_color[slot])
        .collect();

    Ok(PaletteImage {
        palette,
        indices,
        used,
    })
}

/// Weighted median-cut reduction.
///
/// On return `colors` holds the reduced palette (its first `target`
/// entries); the returned vector maps each original color slot to its
/// palette entry.
fn median_cut(colors: &mut Vec<[u8; 4]>, counts: &[u32], target: usize) -> Vec<u8> {
    // Each box is a list of original color slots.
    let mut boxes: Vec<Vec<usize>> = vec![(0..colors.len()).collect()];

    while boxes.len() < target {
        // Widest box first; earlier boxes win ties.
        let mut pick = None;
        let mut widest = 0u8;
        for (i, b) in boxes.iter().enumerate() {
            if b.len() < 2 {
                continue;
            }
            let mut lo = [255u8; 4];
            let mut hi = [0u8; 4];
            for &slot in b {
                for c in 0..4 {
                    lo[c] = lo[c].min(colors[slot][c]);
                    hi[c] = hi[c].max(colors[slot][c]);
                }
            }
            let range = (0..4).map(|c| hi[c] - lo[c]).max().unwrap_or(0);
            if pick.is_none() || range > widest {
                pick = Some((i, extent_channel(&lo, &hi)));
                widest = range;
            }
        }

        let Some((index, channel)) = pick else {
            break;
        };

        let mut b = std::mem::take(&mut boxes[index]);
        b.sort_by_key(|&slot| colors[slot][channel]);

        // Split at the count-weighted median, keeping both halves non-empty.
        let total: u64 = b.iter().map(|&slot| counts[slot] as u64).sum();
        let mut acc = 0u64;
        let mut split = 1;
        for (i, &slot) in b.iter().enumerate() {
            acc += counts[slot] as u64;
            if acc * 2 >= total {
                split = (i + 1).min(b.len() - 1).max(1);
                break;
            }
        }

        let upper = b.split_off(split);
        boxes[index] = b;
        boxes.push(upper);
    }

    // Collapse each box to its weighted average color.
    let original = std::mem::take(colors);
    let mut entry_of_color = vec![0u8; original.len()];
    for (entry, b) in boxes.iter().enumerate() {
        let total: u64 = b.iter().map(|&slot| counts[slot] as u64).sum();
        let mut sums = [0u64; 4];
        for &slot in b {
            for c in 0..4 {
                sums[c] += original[slot][c] as u64 * counts[slot] as u64;
            }
            entry_of_color[slot] = entry as u8;
        }
        let mut average = [0u8; 4];
        for c in 0..4 {
            average[c] = ((sums[c] + total / 2) / total) as u8;
        }
        colors.push(average);
    }

    entry_of_color
}

/// Channel with the widest extent; earlier channels win ties.
fn extent_channel(lo: &[u8; 4], hi: &[u8; 4]) -> usize {
    let mut channel = 0;
    let mut widest = 0u8;
    for c in 0..4 {
        let range = hi[c] - lo[c];
        if range > widest {
            widest = range;
            channel = c;
        }
    }
    channel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::palette_to_rgba;

    #[test]
    fn test_exact_palette_round_trip() {
        // Four distinct colors in a 4x4 image reproduce exactly.
        let colors = [
            [255u8, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
            [255, 255, 255, 255],
        ];
        let mut image = Vec::new();
        for i in 0..16 {
            image.extend_from_slice(&colors[i % 4]);
        }

        let quantized = quantize(&image, 4, 4, 16).unwrap();
        assert_eq!(quantized.used, 4);
        assert_eq!(quantized.palette.len(), 16 * 4);
        assert_eq!(quantized.indices.len(), 16);

        let restored =
            palette_to_rgba(&quantized.indices, &quantized.palette, 16, 4, 4).unwrap();
        assert_eq!(restored, image);
    }

    #[test]
    fn test_exact_palette_first_seen_order() {
        let image = [
            9u8, 9, 9, 255, // first color
            1, 1, 1, 255, // second color
            9, 9, 9, 255,
            1, 1, 1, 255,
        ];
        let quantized = quantize(&image, 2, 2, 16).unwrap();
        assert_eq!(&quantized.palette[..4], &[9, 9, 9, 255]);
        assert_eq!(&quantized.palette[4..8], &[1, 1, 1, 255]);
        assert_eq!(quantized.indices, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_reduction_when_over_budget() {
        // A 16x16 gradient has more than 16 distinct colors.
        let mut image = Vec::new();
        for y in 0..16u32 {
            for x in 0..16u32 {
                image.extend_from_slice(&[(x * 16) as u8, (y * 16) as u8, 0, 255]);
            }
        }

        let quantized = quantize(&image, 16, 16, 16).unwrap();
        assert_eq!(quantized.used, 16);
        assert!(quantized.indices.iter().all(|&i| i < 16));
    }

    #[test]
    fn test_quantizer_is_deterministic() {
        let mut image = Vec::new();
        for i in 0u32..64 * 64 {
            image.extend_from_slice(&[
                (i % 251) as u8,
                (i % 241) as u8,
                (i % 239) as u8,
                255,
            ]);
        }

        let a = quantize(&image, 64, 64, 256).unwrap();
        let b = quantize(&image, 64, 64, 256).unwrap();
        assert_eq!(a.palette, b.palette);
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_invalid_target_rejected() {
        let image = [0u8; 4];
        assert!(matches!(
            quantize(&image, 1, 1, 64),
            Err(Error::QuantizerFailed(_))
        ));
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(matches!(
            quantize(&[], 0, 0, 16),
            Err(Error::QuantizerFailed(_))
        ));
    }
}
