//! Active image selection
//!
//! The picked gallery image wins over the drawing, the drawing wins over the
//! placeholder. One tagged state replaces separate "picked path" and
//! "drawn bitmap" slots, so the two can never disagree.

use image::RgbaImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::ImageSourceError;
use crate::drawing::RasterCanvas;

/// Which image is currently selected
#[derive(Debug, Clone, Default)]
pub enum ImageState {
    /// Nothing drawn or picked yet
    #[default]
    NoImage,
    /// Latest raster of the drawing
    Drawn(RasterCanvas),
    /// Image picked from the gallery
    Picked(PathBuf),
}

/// Borrowed view of the image to show or recognize
#[derive(Debug, Clone, Copy)]
pub enum ActiveImage<'a> {
    Placeholder,
    Drawing(&'a RasterCanvas),
    Gallery(&'a Path),
}

impl ImageState {
    /// A fresh raster of the drawing is available
    pub fn on_raster(&mut self, canvas: RasterCanvas) {
        match self {
            ImageState::Picked(_) => {}
            _ => *self = ImageState::Drawn(canvas),
        }
    }

    /// The picker returned; `None` means the user cancelled
    pub fn on_pick(&mut self, pick: Option<PathBuf>) {
        match pick {
            Some(path) => {
                info!("Selected gallery image {}", path.display());
                *self = ImageState::Picked(path);
            }
            None => debug!("Gallery pick cancelled"),
        }
    }

    /// Resolve the image to present, by priority
    pub fn current(&self) -> ActiveImage<'_> {
        match self {
            ImageState::NoImage => ActiveImage::Placeholder,
            ImageState::Drawn(canvas) => ActiveImage::Drawing(canvas),
            ImageState::Picked(path) => ActiveImage::Gallery(path),
        }
    }

    pub fn picked_path(&self) -> Option<&Path> {
        match self {
            ImageState::Picked(path) => Some(path),
            _ => None,
        }
    }

    /// Decode the active image into a bitmap for recognition
    pub fn load_bitmap(&self) -> Result<RgbaImage, ImageSourceError> {
        match self.current() {
            ActiveImage::Placeholder => Err(ImageSourceError::NoImage),
            ActiveImage::Drawing(canvas) => Ok(canvas.clone()),
            ActiveImage::Gallery(path) => super::decode_image(path),
        }
    }
}
