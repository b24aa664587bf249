//! Error types for grid construction and stacking.

/// Errors raised by the core. Enhancement stages never fail on a valid grid;
/// only construction, parameter validation, and stacking can.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An argument is structurally invalid (no frames, zero-sized grid,
    /// buffer length mismatch, out-of-range parameter).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Stacking inputs disagree on width/height.
    #[error(
        "frame {index} is {}x{} but frame 0 is {}x{}",
        found.0, found.1, expected.0, expected.1
    )]
    DimensionMismatch {
        /// Dimensions of the first frame.
        expected: (u32, u32),
        /// Dimensions of the offending frame.
        found: (u32, u32),
        /// Position of the offending frame in the input sequence.
        index: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
