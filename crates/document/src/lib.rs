#![deny(unsafe_code)]
//! SVG document assembly for the moon texture generator.
//!
//! This crate sits between `moon-texture-core` (which models the canvas,
//! craters and filter effects) and the CLI. [`Document::build`] turns a
//! [`TextureConfig`] and a PRNG into markup; [`snapshot::write_svg`]
//! persists it; [`generate`] does both and reports what it did.

pub mod document;
pub mod encode;
pub mod snapshot;

use std::path::{Path, PathBuf};

use moon_texture_core::{TextureConfig, TextureError, Xorshift64};
use tracing::debug;

pub use document::Document;

/// Default output location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "public/moon-texture.svg";

/// What a call to [`generate`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Seed the PRNG was built from; pass it back in to reproduce the file.
    pub seed: u64,
    pub size: u32,
    pub craters: usize,
    pub bytes: usize,
    pub output: PathBuf,
}

/// Builds the texture described by `config` and writes it to `output`.
///
/// Uses `config.seed` when set, otherwise draws a fresh seed.
pub fn generate(config: &TextureConfig, output: &Path) -> Result<Summary, TextureError> {
    let (mut rng, seed) = match config.seed {
        Some(seed) => (Xorshift64::new(seed), seed),
        None => Xorshift64::from_entropy(),
    };
    debug!(seed, seeded = config.seed.is_some(), "generating moon texture");
    let doc = Document::build(config, &mut rng)?;
    let bytes = snapshot::write_svg(&doc, output)?;
    Ok(Summary {
        seed,
        size: config.size,
        craters: doc.circle_count(),
        bytes,
        output: output.to_path_buf(),
    })
}
