//! 3×3 box-blur noise reduction, blended with the original.
//!
//! Neighbors are read from a snapshot taken before the pass so that
//! already-smoothed pixels never feed into their neighbors. At the image
//! border the neighborhood is truncated: out-of-range samples are skipped
//! and the mean is taken over the in-bounds samples only.
//!
//! ```text
//! out = 0.4 × in + 0.6 × mean(in-bounds 3×3 neighborhood)
//! ```
//!
//! Alpha is forced to 255.

use glam::Vec3;
use rayon::prelude::*;

use crate::grid::{PixelGrid, Rgba};

use super::clamp_to_u8_f32;

/// Weight of the original pixel in the blend.
const ORIGINAL_WEIGHT: f32 = 0.4;
/// Weight of the neighborhood mean in the blend.
const SMOOTHED_WEIGHT: f32 = 0.6;

/// Smooth R, G, B with the 3×3 neighborhood mean and set alpha opaque.
pub fn reduce_noise(grid: &mut PixelGrid) {
    if grid.is_empty() {
        return;
    }

    let width = grid.width as usize;
    let height = grid.pixels.len() / width;
    let snapshot = grid.pixels.clone();
    tracing::debug!("reduce_noise: {}x{}", width, height);

    // A trailing partial row has no full neighborhood and is left as is.
    grid.pixels[..width * height]
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.iter_mut().enumerate() {
                let smoothed = neighborhood_mean(&snapshot, width, height, x, y);
                let original = rgb(&snapshot[y * width + x]);
                let blended = original * ORIGINAL_WEIGHT + smoothed * SMOOTHED_WEIGHT;
                *px = [
                    clamp_to_u8_f32(blended.x),
                    clamp_to_u8_f32(blended.y),
                    clamp_to_u8_f32(blended.z),
                    255,
                ];
            }
        });
}

/// Mean RGB over the in-bounds cells of the 3×3 window centred on `(x, y)`.
fn neighborhood_mean(pixels: &[Rgba], width: usize, height: usize, x: usize, y: usize) -> Vec3 {
    let mut sum = Vec3::ZERO;
    let mut count = 0u32;

    for sy in y.saturating_sub(1)..=(y + 1).min(height - 1) {
        let row = &pixels[sy * width..(sy + 1) * width];
        for sx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
            sum += rgb(&row[sx]);
            count += 1;
        }
    }

    // The centre cell is always in bounds, so count >= 1.
    sum / count as f32
}

#[inline]
fn rgb(px: &Rgba) -> Vec3 {
    Vec3::new(px[0] as f32, px[1] as f32, px[2] as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance::test_support::uniform;

    fn gray(v: u8) -> Rgba {
        [v, v, v, 255]
    }

    #[test]
    fn test_two_by_two_corners_average_four_samples() {
        let mut grid = PixelGrid::new(2, 2, vec![gray(0), gray(40), gray(80), gray(120)]).unwrap();
        reduce_noise(&mut grid);
        // Every pixel sees all four samples: mean 60, contributing 36.
        // Zero-padding would give 240 / 9 instead.
        assert_eq!(grid.pixels, vec![gray(36), gray(52), gray(68), gray(84)]);
    }

    #[test]
    fn test_border_truncation_counts() {
        // A single bright centre: corners divide by 4, edges by 6, centre by 9.
        let mut pixels = vec![gray(0); 9];
        pixels[4] = gray(120);
        let mut grid = PixelGrid::new(3, 3, pixels).unwrap();
        reduce_noise(&mut grid);

        assert_eq!(grid.get(0, 0), Some(gray(18)));
        assert_eq!(grid.get(2, 2), Some(gray(18)));
        assert_eq!(grid.get(1, 0), Some(gray(12)));
        assert_eq!(grid.get(0, 1), Some(gray(12)));
        assert_eq!(grid.get(1, 1), Some(gray(56)));
    }

    #[test]
    fn test_reads_snapshot_not_partial_output() {
        // A horizontal ramp: if row 0 were smoothed in place before row 1 read
        // it, the two rows would diverge. Identical rows must stay identical.
        let row: Vec<Rgba> = (0..6).map(|x| gray(x * 40)).collect();
        let mut pixels = row.clone();
        pixels.extend(row);
        let mut grid = PixelGrid::new(6, 2, pixels).unwrap();
        reduce_noise(&mut grid);
        assert_eq!(grid.pixels[..6], grid.pixels[6..]);
    }

    #[test]
    fn test_forces_alpha_opaque() {
        let mut grid = uniform([10, 20, 30, 0], 3, 2);
        reduce_noise(&mut grid);
        assert!(grid.pixels.iter().all(|px| *px == [10, 20, 30, 255]));
    }

    #[test]
    fn test_single_pixel_is_unchanged() {
        let mut grid = uniform([200, 100, 50, 255], 1, 1);
        reduce_noise(&mut grid);
        assert_eq!(grid.pixels[0], [200, 100, 50, 255]);
    }

    #[test]
    fn test_extremes_stay_in_range() {
        let mut white = uniform([255, 255, 255, 255], 4, 4);
        reduce_noise(&mut white);
        assert!(white.pixels.iter().all(|px| *px == [255, 255, 255, 255]));

        let mut black = uniform([0, 0, 0, 0], 4, 4);
        reduce_noise(&mut black);
        assert!(black.pixels.iter().all(|px| *px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_buffer_shorter_than_a_row_is_left_alone() {
        let mut grid = PixelGrid {
            width: 4,
            height: 1,
            pixels: vec![[7, 8, 9, 0]; 2],
        };
        reduce_noise(&mut grid);
        assert_eq!(grid.pixels, vec![[7, 8, 9, 0]; 2]);
    }

    #[test]
    fn test_trailing_partial_row_is_left_alone() {
        let mut pixels = vec![[10, 20, 30, 0]; 4];
        pixels.push([1, 2, 3, 0]);
        let mut grid = PixelGrid {
            width: 2,
            height: 3,
            pixels,
        };
        reduce_noise(&mut grid);
        assert!(grid.pixels[..4].iter().all(|px| *px == [10, 20, 30, 255]));
        assert_eq!(grid.pixels[4], [1, 2, 3, 0]);
    }
}
