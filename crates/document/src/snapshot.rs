//! Persisting a rendered [`Document`] to disk.

use std::path::Path;

use moon_texture_core::TextureError;
use tracing::info;

use crate::document::Document;

/// Writes the document to `path`, creating or truncating the file.
///
/// Parent directories are not created; a missing directory surfaces as
/// `TextureError::Io`. Returns the number of bytes written.
pub fn write_svg(doc: &Document, path: &Path) -> Result<usize, TextureError> {
    let svg = doc.render();
    std::fs::write(path, &svg).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        bytes = svg.len(),
        craters = doc.circle_count(),
        "wrote moon texture"
    );
    Ok(svg.len())
}
