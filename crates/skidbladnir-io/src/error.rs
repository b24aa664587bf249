use std::path::PathBuf;

/// Errors raised while reading or writing frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameIoError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("unsupported output format: {0:?} (expected png, jpg, jpeg, tif, or tiff)")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Grid(#[from] skidbladnir_core::Error),
}
