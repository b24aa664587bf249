//! Whole-grid reductions — channel means and the luminance histogram.
//!
//! These are the first phase of the two-phase stages: each reduction runs
//! over the full grid and produces a plain value that the mapping pass reads.

pub mod channel_stats;
pub mod histogram;

pub use channel_stats::ChannelMeans;
pub use histogram::LuminanceHistogram;
