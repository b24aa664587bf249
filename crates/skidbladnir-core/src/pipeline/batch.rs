//! Parallel per-frame processing.
//!
//! Frames own disjoint buffers and the pipeline carries no mutable state,
//! so a batch needs no coordination beyond rayon's work splitting. Output
//! is identical to processing the frames one after another.

use rayon::prelude::*;

use crate::grid::PixelGrid;

use super::FramePipeline;

/// Run [`FramePipeline::process`] over every frame, in parallel.
pub fn process_batch(pipeline: &FramePipeline, frames: &mut [PixelGrid]) {
    tracing::info!("Processing {} frame(s)", frames.len());
    frames.par_iter_mut().for_each(|grid| pipeline.process(grid));
}
