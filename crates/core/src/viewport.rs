//! Drawing area dimensions shared by every sketch.

use crate::error::SketchError;
use glam::DVec2;
use serde::Serialize;

/// Default viewport width in pixels.
pub const DEFAULT_WIDTH: usize = 800;
/// Default viewport height in pixels.
pub const DEFAULT_HEIGHT: usize = 600;

/// Width and height of the drawing area, both non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Viewport {
    width: usize,
    height: usize,
}

impl Viewport {
    /// Returns `SketchError::InvalidDimensions` if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, SketchError> {
        if width == 0 || height == 0 {
            return Err(SketchError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }

    pub fn center(&self) -> DVec2 {
        self.size() * 0.5
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}
