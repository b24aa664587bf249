//! Channel normalization — removes a global colour cast.
//!
//! Each of R, G, B is scaled so its mean matches the mean of all three
//! channel means. Overall brightness is preserved; a sensor or light
//! pollution tint is neutralized.

use crate::analysis::ChannelMeans;
use crate::grid::PixelGrid;

use super::{clamp_to_u8, map_pixels};

/// Per-channel multipliers derived from [`ChannelMeans`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelScales {
    /// `[R, G, B]` multipliers.
    pub scale: [f64; 3],
}

impl ChannelScales {
    /// `target / mean` per channel; a channel with zero mean keeps scale 1.
    pub fn from_means(means: &ChannelMeans) -> Self {
        let target = means.target();
        Self {
            scale: means.mean.map(|m| if m > 0.0 { target / m } else { 1.0 }),
        }
    }
}

/// Scale R, G, B so their means converge on the common gray target.
pub fn normalize_channels(grid: &mut PixelGrid) {
    if grid.is_empty() {
        return;
    }

    let means = ChannelMeans::compute(grid);
    let scales = ChannelScales::from_means(&means);
    tracing::debug!(
        "normalize_channels: means={:?} scales={:?}",
        means.mean,
        scales.scale
    );

    map_pixels(grid, |px| {
        for c in 0..3 {
            px[c] = clamp_to_u8(px[c] as f64 * scales.scale[c]);
        }
    });
}
