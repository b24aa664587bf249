//! Percentile-based contrast stretch.
//!
//! The luminance levels at the low and high percentiles are mapped to 0 and
//! 255 respectively, and every channel is remapped linearly. Using
//! percentiles instead of min/max keeps a handful of hot or dead pixels
//! from pinning the range.
//!
//! # Algorithm
//! 1. Bin rounded Rec. 709 luminance into 256 buckets
//! 2. `low` = first bucket where the running count reaches `floor(n × low_pct)`
//! 3. `high` = first bucket where it reaches `floor(n × high_pct)`, else 255
//! 4. Widen a zero-width range to one level
//! 5. `out = clamp(round((v − low) × 255 / (high − low)))` for R, G, B

use crate::analysis::LuminanceHistogram;
use crate::grid::PixelGrid;

use super::{clamp_to_u8_f32, map_pixels};

/// Default lower cutoff (1st percentile).
pub const DEFAULT_LOW_PERCENTILE: f64 = 0.01;
/// Default upper cutoff (99th percentile).
pub const DEFAULT_HIGH_PERCENTILE: f64 = 0.99;

/// Black point, white point, and the gain between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchRange {
    /// Luminance level mapped to 0.
    pub low: i32,
    /// Luminance level mapped to 255.
    pub high: i32,
    /// `255 / (high − low)`.
    pub scale: f32,
}

impl StretchRange {
    /// Derive the range from a histogram and percentile cutoffs in `0.0..=1.0`.
    pub fn from_histogram(hist: &LuminanceHistogram, low_pct: f64, high_pct: f64) -> Self {
        let low_count = (hist.total as f64 * low_pct).floor() as usize;
        let high_count = (hist.total as f64 * high_pct).floor() as usize;

        let mut low = hist.cumulative_index(low_count).unwrap_or(0) as i32;
        let mut high = hist.cumulative_index(high_count).unwrap_or(255) as i32;

        if high <= low {
            tracing::warn!(
                "stretch_histogram: degenerate luminance range {low}..={high}, \
                 widening to one level"
            );
            high = (low + 1).min(255);
            low = (high - 1).max(0);
        }

        Self {
            low,
            high,
            scale: 255.0 / (high - low).max(1) as f32,
        }
    }

    /// Remap one channel value.
    #[inline]
    pub fn apply(&self, value: u8) -> u8 {
        clamp_to_u8_f32((value as i32 - self.low) as f32 * self.scale)
    }
}

/// Stretch the 1st–99th luminance percentile to the full channel range.
pub fn stretch_histogram(grid: &mut PixelGrid) {
    stretch_histogram_with(grid, DEFAULT_LOW_PERCENTILE, DEFAULT_HIGH_PERCENTILE);
}

/// [`stretch_histogram`] with explicit percentile cutoffs.
pub fn stretch_histogram_with(grid: &mut PixelGrid, low_pct: f64, high_pct: f64) {
    if grid.is_empty() {
        return;
    }

    let hist = LuminanceHistogram::compute(grid);
    let range = StretchRange::from_histogram(&hist, low_pct, high_pct);
    tracing::debug!(
        "stretch_histogram: low={} high={} scale={:.4}",
        range.low,
        range.high,
        range.scale
    );

    map_pixels(grid, |px| {
        for c in 0..3 {
            px[c] = range.apply(px[c]);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance::test_support::uniform;

    fn default_range(hist: &LuminanceHistogram) -> StretchRange {
        StretchRange::from_histogram(hist, DEFAULT_LOW_PERCENTILE, DEFAULT_HIGH_PERCENTILE)
    }

    #[test]
    fn test_outliers_do_not_pin_the_range() {
        // 300 px: 2 dead, 2 hot, 148 at level 20, 148 at level 220.
        let mut pixels = vec![[0, 0, 0, 255]; 2];
        pixels.extend(vec![[255, 255, 255, 255]; 2]);
        pixels.extend(vec![[20, 20, 20, 255]; 148]);
        pixels.extend(vec![[220, 220, 220, 255]; 148]);
        let mut grid = PixelGrid::new(30, 10, pixels).unwrap();

        let hist = LuminanceHistogram::compute(&grid);
        let range = default_range(&hist);
        assert_eq!((range.low, range.high), (20, 220));

        stretch_histogram(&mut grid);
        assert_eq!(grid.pixels[0], [0, 0, 0, 255]);
        assert_eq!(grid.pixels[2], [255, 255, 255, 255]);
        assert_eq!(grid.pixels[4], [0, 0, 0, 255]);
        assert_eq!(grid.pixels[299], [255, 255, 255, 255]);
    }

    #[test]
    fn test_single_colour_grid_gets_one_level_range() {
        // 100 px so the 1st percentile lands on the only populated bucket.
        let mut grid = uniform([100, 100, 100, 77], 10, 10);
        let hist = LuminanceHistogram::compute(&grid);
        let range = default_range(&hist);
        assert_eq!((range.low, range.high), (100, 101));
        assert_eq!(range.scale, 255.0);

        stretch_histogram(&mut grid);
        assert!(grid.pixels.iter().all(|px| *px == [0, 0, 0, 77]));
    }

    #[test]
    fn test_degenerate_range_at_white_stays_in_bounds() {
        let mut grid = uniform([255, 255, 255, 255], 10, 10);
        let hist = LuminanceHistogram::compute(&grid);
        let range = default_range(&hist);
        assert_eq!((range.low, range.high), (254, 255));

        stretch_histogram(&mut grid);
        assert!(grid.pixels.iter().all(|px| *px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_all_black_stays_black() {
        let mut grid = uniform([0, 0, 0, 255], 10, 10);
        stretch_histogram(&mut grid);
        assert!(grid.pixels.iter().all(|px| *px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_small_grid_uses_zero_low_count() {
        // 9 px: floor(0.09) = 0 so low is bucket 0; floor(8.91) = 8 reaches bucket 100.
        let mut grid = uniform([100, 100, 100, 255], 3, 3);
        stretch_histogram(&mut grid);
        assert!(grid.pixels.iter().all(|px| *px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_alpha_is_untouched() {
        let mut grid = PixelGrid::new(2, 1, vec![[10, 10, 10, 3], [200, 200, 200, 9]]).unwrap();
        stretch_histogram(&mut grid);
        assert_eq!(grid.pixels[0][3], 3);
        assert_eq!(grid.pixels[1][3], 9);
    }
}
