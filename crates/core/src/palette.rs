//! The three-color palette of the moon surface.

use serde::{Deserialize, Serialize};

use crate::color::Srgb;
use crate::error::TextureError;

/// Background, shadow and highlight colors of the texture.
///
/// Craters are filled with the background color so they blend into the
/// base; depth comes entirely from the crater filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Srgb,
    pub shadow: Srgb,
    pub highlight: Srgb,
}

impl Palette {
    /// Builds a palette from three hex strings.
    pub fn from_hex(background: &str, shadow: &str, highlight: &str) -> Result<Self, TextureError> {
        Ok(Self {
            background: Srgb::from_hex(background)?,
            shadow: Srgb::from_hex(shadow)?,
            highlight: Srgb::from_hex(highlight)?,
        })
    }

    /// Pale grey-blue regolith: `#e0e5ec`, `#a3b1c6`, `#ffffff`.
    pub fn moon() -> Self {
        Self {
            background: Srgb {
                r: 224.0 / 255.0,
                g: 229.0 / 255.0,
                b: 236.0 / 255.0,
            },
            shadow: Srgb {
                r: 163.0 / 255.0,
                g: 177.0 / 255.0,
                b: 198.0 / 255.0,
            },
            highlight: Srgb::WHITE,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::moon()
    }
}
