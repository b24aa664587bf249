//! Per-channel mean of a grid.
//!
//! Sums are accumulated as integers so the result does not depend on how
//! rayon splits the buffer.

use rayon::prelude::*;

use crate::grid::PixelGrid;

/// Arithmetic mean of the R, G, and B channels over all pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelMeans {
    /// `[R, G, B]` means in the `0.0..=255.0` domain.
    pub mean: [f64; 3],
}

impl ChannelMeans {
    /// Reduce the whole grid to its channel means. An empty grid has all-zero means.
    pub fn compute(grid: &PixelGrid) -> Self {
        if grid.pixels.is_empty() {
            return Self { mean: [0.0; 3] };
        }

        let sum = grid
            .pixels
            .par_iter()
            .fold(
                || [0u64; 3],
                |mut acc, px| {
                    acc[0] += px[0] as u64;
                    acc[1] += px[1] as u64;
                    acc[2] += px[2] as u64;
                    acc
                },
            )
            .reduce(|| [0u64; 3], |a, b| [a[0] + b[0], a[1] + b[1], a[2] + b[2]]);

        let count = grid.pixels.len() as f64;
        Self {
            mean: sum.map(|s| s as f64 / count),
        }
    }

    /// Mean of the three channel means — the gray level every channel is pulled toward.
    pub fn target(&self) -> f64 {
        (self.mean[0] + self.mean[1] + self.mean[2]) / 3.0
    }
}
