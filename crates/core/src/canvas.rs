//! The drawing surface the texture is defined over.
//!
//! A [`Canvas`] is a fixed width and height in user units. The same numbers
//! are used for the document's `viewBox` and its pixel size.

use serde::{Deserialize, Serialize};

use crate::error::TextureError;

/// Default edge length of the square moon texture.
pub const DEFAULT_SIZE: u32 = 1024;

/// Fixed-size drawing surface. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    width: u32,
    height: u32,
}

impl Canvas {
    /// Creates a canvas with the given dimensions.
    ///
    /// Returns `TextureError::InvalidDimensions` if width or height is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    /// Creates a square canvas.
    pub fn square(size: u32) -> Result<Self, TextureError> {
        Self::new(size, size)
    }

    /// Returns the canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether a point lies on the closed rectangle `[0, width] x [0, height]`.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x <= self.width && y <= self.height
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }
}
