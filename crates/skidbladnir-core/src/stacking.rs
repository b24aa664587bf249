//! Average stacking of pre-aligned frames.
//!
//! Every output pixel is the mean of the R, G, B values at the same position
//! across all frames. Frames must already be registered and identically
//! sized; nothing is cropped, padded, or resampled.
//!
//! # Algorithm
//! 1. Reject an empty sequence or any frame whose size differs from frame 0
//! 2. Per output row, zero a scratch row of `u32` sums
//! 3. Add each frame's row into the scratch
//! 4. `out = clamp(round(sum / n))`, alpha 255

use rayon::prelude::*;

use crate::enhance::clamp_to_u8;
use crate::error::{Error, Result};
use crate::grid::PixelGrid;
use crate::pipeline::FramePipeline;

/// Average `frames` into a newly allocated grid. Inputs are only read.
///
/// Fails with [`Error::InvalidInput`] on an empty sequence and with
/// [`Error::DimensionMismatch`] if any frame differs in size from the first.
/// Both checks run before any pixel work.
pub fn average_stack(frames: &[PixelGrid]) -> Result<PixelGrid> {
    let first = frames
        .first()
        .ok_or_else(|| Error::InvalidInput("provide at least one frame to stack".into()))?;
    let expected = first.dimensions();

    for (index, frame) in frames.iter().enumerate() {
        if frame.dimensions() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                found: frame.dimensions(),
                index,
            });
        }
        if frame.pixels.len() != expected.0 as usize * expected.1 as usize {
            return Err(Error::InvalidInput(format!(
                "frame {index} holds {} pixels, {}x{} needs {}",
                frame.pixels.len(),
                expected.0,
                expected.1,
                expected.0 as usize * expected.1 as usize
            )));
        }
    }

    let mut stacked = PixelGrid::filled(expected.0, expected.1, [0, 0, 0, 255])?;
    let width = expected.0 as usize;
    let count = frames.len() as f64;
    tracing::info!("Stacking {} frame(s) at {}x{}", frames.len(), expected.0, expected.1);

    stacked
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each_init(
            || vec![[0u32; 3]; width],
            |totals, (y, row)| {
                totals.fill([0; 3]);
                for frame in frames {
                    let source = &frame.pixels[y * width..(y + 1) * width];
                    for (total, px) in totals.iter_mut().zip(source) {
                        total[0] += px[0] as u32;
                        total[1] += px[1] as u32;
                        total[2] += px[2] as u32;
                    }
                }
                for (out, total) in row.iter_mut().zip(totals.iter()) {
                    *out = [
                        clamp_to_u8(total[0] as f64 / count),
                        clamp_to_u8(total[1] as f64 / count),
                        clamp_to_u8(total[2] as f64 / count),
                        255,
                    ];
                }
            },
        );

    Ok(stacked)
}

/// Average the frames and run the refinement pass on the result.
pub fn stack_and_refine(pipeline: &FramePipeline, frames: &[PixelGrid]) -> Result<PixelGrid> {
    let mut stacked = average_stack(frames)?;
    pipeline.refine(&mut stacked);
    Ok(stacked)
}
