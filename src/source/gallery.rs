//! Gallery picker
//!
//! Lists the images in a directory for the user to choose from. Any file the
//! `image` crate recognizes by extension counts as an image.

use anyhow::{Context, Result};
use image::ImageFormat;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One pickable image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// File name shown to the user
    pub name: String,
    /// Full path
    pub path: PathBuf,
}

/// Directory-backed image picker
#[derive(Debug, Clone)]
pub struct GalleryPicker {
    directory: PathBuf,
    entries: Vec<GalleryEntry>,
}

impl GalleryPicker {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            entries: Vec::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Re-read the directory
    pub fn refresh(&mut self) -> Result<()> {
        self.entries = list_images(&self.directory)?;
        info!(
            "Gallery {}: {} images",
            self.directory.display(),
            self.entries.len()
        );
        Ok(())
    }

    /// Resolve the user's choice; `None` when the picker was dismissed
    pub fn pick(&self, index: Option<usize>) -> Option<PathBuf> {
        let entry = self.entries.get(index?)?;
        Some(entry.path.clone())
    }
}

/// Whether a path passes the "any image" filter
pub fn is_image_file(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

/// Image files directly inside `directory`, sorted by name
pub fn list_images(directory: &Path) -> Result<Vec<GalleryEntry>> {
    let read_dir = std::fs::read_dir(directory)
        .with_context(|| format!("Failed to read gallery directory {}", directory.display()))?;

    let entries = collect_images(read_dir.map(|entry| entry.map(|e| e.path())));
    debug!("Listed {} images in {}", entries.len(), directory.display());
    Ok(entries)
}

/// Keep the image files among `paths`, sorted by name.
///
/// Entries that cannot be read are skipped.
fn collect_images(paths: impl Iterator<Item = io::Result<PathBuf>>) -> Vec<GalleryEntry> {
    let mut entries = Vec::new();
    for path in paths {
        let path = match path {
            Ok(path) => path,
            Err(e) => {
                debug!("Skipping unreadable gallery entry: {}", e);
                continue;
            }
        };
        if !path.is_file() || !is_image_file(&path) {
            continue;
        }
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        entries.push(GalleryEntry { name, path });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
