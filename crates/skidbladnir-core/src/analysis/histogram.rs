//! 256-bin luminance histogram.

use rayon::prelude::*;

use crate::grid::{PixelGrid, Rgba};

/// Rec. 709 luminance weights.
pub const LUMA_REC709: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Pixels per rayon work item when binning.
const CHUNK_PIXELS: usize = 16 * 1024;

/// Rec. 709 luminance of an 8-bit pixel, unrounded.
pub fn luminance(px: &Rgba) -> f64 {
    LUMA_REC709[0] * px[0] as f64 + LUMA_REC709[1] * px[1] as f64 + LUMA_REC709[2] * px[2] as f64
}

/// Bin index of a pixel: luminance rounded to the nearest integer and clamped to `0..=255`.
pub fn luminance_bin(px: &Rgba) -> usize {
    luminance(px).round_ties_even().clamp(0.0, 255.0) as usize
}

/// Pixel counts per luminance level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceHistogram {
    /// Bin counts. `bins[i]` is the number of pixels whose rounded luminance is `i`.
    pub bins: [u32; 256],
    /// Total number of binned pixels.
    pub total: usize,
}

impl LuminanceHistogram {
    /// Bin every pixel of the grid.
    pub fn compute(grid: &PixelGrid) -> Self {
        let bins = grid
            .pixels
            .par_chunks(CHUNK_PIXELS)
            .map(|chunk| {
                let mut local = [0u32; 256];
                for px in chunk {
                    local[luminance_bin(px)] += 1;
                }
                local
            })
            .reduce(
                || [0u32; 256],
                |mut a, b| {
                    for (dst, src) in a.iter_mut().zip(b) {
                        *dst += src;
                    }
                    a
                },
            );

        Self {
            bins,
            total: grid.pixels.len(),
        }
    }

    /// First bin at which the running count reaches `count`, or `None` if it never does.
    ///
    /// A `count` of zero is reached at bin 0.
    pub fn cumulative_index(&self, count: usize) -> Option<usize> {
        let mut cumulative = 0usize;
        for (i, &n) in self.bins.iter().enumerate() {
            cumulative += n as usize;
            if cumulative >= count {
                return Some(i);
            }
        }
        None
    }
}
