//! Single-frame enhancement stages.
//!
//! Every stage takes exclusive access to a [`PixelGrid`] for one call,
//! writes only clamped values, and keeps nothing once it returns. Stages
//! that need a whole-grid scalar first reduce the grid to an immutable
//! parameter value, then run a per-row mapping pass driven by it.
//!
//! Rounding is round-half-to-even throughout.

pub mod denoise;
pub mod gamma;
pub mod normalize;
pub mod saturation;
pub mod stretch;

pub use denoise::reduce_noise;
pub use gamma::apply_gamma;
pub use normalize::{ChannelScales, normalize_channels};
pub use saturation::boost_saturation;
pub use stretch::{StretchRange, stretch_histogram};

use rayon::prelude::*;

use crate::grid::{PixelGrid, Rgba};

/// Round to nearest (ties to even) and clamp into the 8-bit channel domain.
#[inline]
pub(crate) fn clamp_to_u8(value: f64) -> u8 {
    // NaN saturates to 0 through the `as` cast.
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Single-precision variant of [`clamp_to_u8`].
#[inline]
pub(crate) fn clamp_to_u8_f32(value: f32) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Apply `f` to every pixel, rows in parallel.
pub(crate) fn map_pixels<F>(grid: &mut PixelGrid, f: F)
where
    F: Fn(&mut Rgba) + Sync,
{
    if grid.is_empty() {
        return;
    }
    let width = grid.width as usize;
    grid.pixels.par_chunks_mut(width).for_each(|row| row.iter_mut().for_each(&f));
}
