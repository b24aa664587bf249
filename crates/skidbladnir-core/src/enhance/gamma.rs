//! Power-law tone curve.
//!
//! ```text
//! out = round((in / 255) ^ (1 / gamma) × 255)
//! ```
//!
//! The exponent is the reciprocal of the parameter, so `gamma < 1` darkens
//! midtones and `gamma > 1` brightens them. The pipeline defaults (0.85 per
//! frame, 0.9 after stacking) are tuned against exactly this curve.

use crate::grid::PixelGrid;

use super::{clamp_to_u8, map_pixels};

/// Apply the tone curve to R, G, B. Alpha is untouched.
///
/// Builds a 256-entry lookup table once, so the per-pixel pass is a table read.
pub fn apply_gamma(grid: &mut PixelGrid, gamma: f64) {
    if grid.is_empty() {
        return;
    }

    let lut = gamma_lut(gamma);
    tracing::debug!("apply_gamma: gamma={gamma} exponent={:.4}", 1.0 / gamma);

    map_pixels(grid, |px| {
        for c in 0..3 {
            px[c] = lut[px[c] as usize];
        }
    });
}

/// Output level for every input level.
pub fn gamma_lut(gamma: f64) -> [u8; 256] {
    let inverse = 1.0 / gamma;
    std::array::from_fn(|v| {
        let normalized = v as f64 / 255.0;
        clamp_to_u8(normalized.powf(inverse) * 255.0)
    })
}
