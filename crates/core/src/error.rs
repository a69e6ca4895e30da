//! Error types for the moon texture generator.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while configuring or persisting a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    /// Canvas width or height was zero.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A crater layer had `min > max`.
    #[error("invalid crater layer {index}: min radius {min} exceeds max radius {max}")]
    InvalidLayer { index: usize, min: u32, max: u32 },

    /// An opacity value fell outside [0, 1] or was not a number.
    #[error("invalid opacity for '{name}': {value} is not within [0, 1]")]
    InvalidOpacity { name: String, value: f64 },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A configuration object could not be decoded.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Writing the output document failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
