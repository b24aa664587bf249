//! Saturation boost around each pixel's own gray point.
//!
//! ```text
//! gray = (R + G + B) / 3
//! out  = gray + (in − gray) × factor
//! ```
//!
//! The gray point is the plain channel average, not a luminance-weighted
//! one. `factor = 1.0` is a no-op; alpha is untouched.

use crate::grid::PixelGrid;

use super::{clamp_to_u8_f32, map_pixels};

/// Push R, G, B away from their per-pixel mean by `factor`.
pub fn boost_saturation(grid: &mut PixelGrid, factor: f32) {
    if grid.is_empty() {
        return;
    }
    tracing::debug!("boost_saturation: factor={factor}");

    map_pixels(grid, |px| {
        let gray = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
        for c in 0..3 {
            px[c] = clamp_to_u8_f32(gray + (px[c] as f32 - gray) * factor);
        }
    });
}
