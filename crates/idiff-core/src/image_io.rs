use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::{info, warn};

use crate::error::{IdiffError, Result};

/// A decoded input image, immutable after loading.
#[derive(Debug, Clone)]
pub struct SourceImage {
    path: PathBuf,
    rgba: RgbaImage,
}

impl SourceImage {
    pub fn new(path: impl Into<PathBuf>, rgba: RgbaImage) -> Self {
        Self {
            path: path.into(),
            rgba,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    /// File name for titles and dialogs, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Load an image by path, falling back to content sniffing when the
/// extension is missing or wrong.
pub fn load_image(path: &Path) -> Result<SourceImage> {
    let decoded = match image::open(path) {
        Ok(img) => img,
        Err(primary) => {
            warn!(path = %path.display(), error = %primary, "Direct decode failed, sniffing content");
            decode_sniffed(path).map_err(|fallback| IdiffError::ImageNotRecognized {
                path: path.to_path_buf(),
                info: format!("{primary}; {fallback}"),
            })?
        }
    };

    let rgba = decoded.to_rgba8();
    info!(
        path = %path.display(),
        width = rgba.width(),
        height = rgba.height(),
        "Image loaded"
    );
    Ok(SourceImage::new(path, rgba))
}

/// Load every path in order, stopping at the first failure.
pub fn load_images<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Arc<SourceImage>>> {
    paths
        .iter()
        .map(|path| load_image(path.as_ref()).map(Arc::new))
        .collect()
}

/// Guess the format from the bytes, decode, and round-trip through an
/// in-memory PNG so every accepted input ends up in one canonical form.
fn decode_sniffed(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)?;
    let format = image::guess_format(&bytes)?;
    let img = image::load_from_memory_with_format(&bytes, format)?;

    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png)?;
    let img = image::load_from_memory_with_format(png.get_ref(), ImageFormat::Png)?;

    info!(path = %path.display(), format = ?format, "Image decoded from sniffed content");
    Ok(img)
}
