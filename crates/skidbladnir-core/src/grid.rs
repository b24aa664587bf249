//! Pixel buffer shared by every stage of the pipeline.

use std::fmt;

use crate::error::{Error, Result};

/// One RGBA pixel, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Rectangular RGBA8 image buffer, stored row-major.
///
/// Every stage borrows the grid mutably for the duration of one call and
/// writes clamped values only, so channels are always within `0..=255`.
/// A grid built through [`PixelGrid::new`] always satisfies
/// `pixels.len() == width * height` with both dimensions positive.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data, row-major, `[R, G, B, A]`.
    pub pixels: Vec<Rgba>,
}

impl PixelGrid {
    /// Build a grid from an existing pixel buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(Error::InvalidInput(format!(
                "{width}x{height} grid needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Build a grid where every pixel has the same value.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self { width, height, pixels: vec![pixel; len] })
    }

    /// Build a grid from tightly packed RGBA bytes.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let pixels: &[Rgba] = bytemuck::try_cast_slice(bytes).map_err(|e| {
            Error::InvalidInput(format!("RGBA buffer of {} bytes: {e}", bytes.len()))
        })?;
        Self::new(width, height, pixels.to_vec())
    }

    /// Pixel data as tightly packed RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// True when the grid holds no complete row. Stages treat such a grid as a no-op.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.len() < self.width as usize
    }

    /// Pixel at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }
}

impl fmt::Debug for PixelGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full pixel dumps are useless in test failures on anything but 1x1.
        f.debug_struct("PixelGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format_args!("[{} px]", self.pixels.len()))
            .finish()
    }
}

fn checked_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "grid dimensions must be positive, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::InvalidInput(format!("{width}x{height} grid is too large")))
}
