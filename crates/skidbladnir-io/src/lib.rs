//! Skidbladnir I/O — getting frames in and out of image containers.
//!
//! Loading decodes any container the `image` crate recognises, applies the
//! EXIF orientation so the grid is upright, and converts to RGBA8. Saving
//! picks the container from the file extension.

mod error;

pub use error::FrameIoError;

use std::path::Path;

use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbaImage};
use skidbladnir_core::PixelGrid;

/// Default file name for a stacked composite.
pub const DEFAULT_STACK_FILE_NAME: &str = "StackedResult.tif";

/// Containers a frame can be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    /// JPEG has no alpha channel; alpha is dropped on write.
    Jpeg,
    Tiff,
}

impl OutputFormat {
    /// Pick the container from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, FrameIoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "tif" | "tiff" => Ok(Self::Tiff),
            _ => Err(FrameIoError::UnsupportedFormat(ext)),
        }
    }

    /// Canonical file extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Tiff => "tif",
        }
    }

    const fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

/// Decode a frame from disk, upright and in RGBA8.
pub fn load_frame(path: &Path) -> Result<PixelGrid, FrameIoError> {
    let io_err = |source| FrameIoError::Io {
        path: path.to_path_buf(),
        source,
    };
    let decode_err = |source| FrameIoError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let mut decoder = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .into_decoder()
        .map_err(decode_err)?;
    let orientation = decoder.orientation().map_err(decode_err)?;

    let mut img = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
    img.apply_orientation(orientation);

    let grid = grid_from_image(img.into_rgba8())?;
    tracing::info!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        grid.width,
        grid.height,
        orientation
    );
    Ok(grid)
}

/// Encode a frame to disk in the container named by the extension.
pub fn save_frame(grid: &PixelGrid, path: &Path) -> Result<(), FrameIoError> {
    let format = OutputFormat::from_path(path)?;
    let rgba = grid_to_image(grid)?;

    let result = match format {
        OutputFormat::Jpeg => DynamicImage::ImageRgba8(rgba)
            .to_rgb8()
            .save_with_format(path, format.image_format()),
        OutputFormat::Png | OutputFormat::Tiff => {
            rgba.save_with_format(path, format.image_format())
        }
    };
    result.map_err(|source| FrameIoError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Saved {} as {:?}", path.display(), format);
    Ok(())
}

/// Copy an `image` buffer into a grid.
pub fn grid_from_image(img: RgbaImage) -> Result<PixelGrid, FrameIoError> {
    let (width, height) = img.dimensions();
    Ok(PixelGrid::from_rgba_bytes(width, height, img.as_raw())?)
}

/// Copy a grid into an `image` buffer.
pub fn grid_to_image(grid: &PixelGrid) -> Result<RgbaImage, FrameIoError> {
    RgbaImage::from_raw(grid.width, grid.height, grid.as_bytes().to_vec()).ok_or_else(|| {
        FrameIoError::Grid(skidbladnir_core::Error::InvalidInput(format!(
            "{}x{} grid holds {} pixels",
            grid.width,
            grid.height,
            grid.pixel_count()
        )))
    })
}
