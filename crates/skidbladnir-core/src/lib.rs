//! Skidbladnir Core — pixel-level processing for astrophotography frames.
//!
//! This crate contains the single-frame enhancement stages, the frame
//! pipeline that orders them, and average stacking. No file formats, no
//! display conversion, no I/O of any kind.

pub mod analysis;
pub mod enhance;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod stacking;

// Re-exports for convenience.
pub use error::{Error, Result};
pub use grid::PixelGrid;
pub use pipeline::FramePipeline;
pub use pipeline::batch::process_batch;
pub use pipeline::params::{PipelineParams, StageParams, StretchParams};
pub use stacking::{average_stack, stack_and_refine};
