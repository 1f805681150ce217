//! Image Source Layer
//!
//! Chooses between the drawing and a picked gallery image, and resolves the
//! choice into a bitmap.

pub mod gallery;
pub mod selector;

use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::debug;

pub use gallery::{GalleryEntry, GalleryPicker};
pub use selector::{ActiveImage, ImageState};

/// Failure resolving the active image into a bitmap
#[derive(Debug, thiserror::Error)]
pub enum ImageSourceError {
    /// Nothing drawn or picked
    #[error("no image selected")]
    NoImage,
    /// The picked file could not be read or decoded
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decode an image file into RGBA
pub fn decode_image(path: &Path) -> Result<RgbaImage, ImageSourceError> {
    let image = image::open(path).map_err(|source| ImageSourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Decoded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_missing_file() {
        let err = decode_image(Path::new("/nonexistent/picture.png")).unwrap_err();

        assert!(matches!(err, ImageSourceError::Decode { .. }));
        assert!(err.to_string().contains("/nonexistent/picture.png"));
    }
}
