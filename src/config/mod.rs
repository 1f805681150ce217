//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::drawing::raster::DEFAULT_DENSITY;
use crate::drawing::segment::DEFAULT_STROKE_WIDTH;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Drawing canvas settings
    pub canvas: CanvasSettings,
    /// Text recognition settings
    pub recognition: RecognitionSettings,
    /// Gallery picker settings
    pub gallery: GallerySettings,
}

/// Drawing canvas settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Height of the drawing region in points
    pub height: f32,
    /// Stroke width in device-independent units
    pub stroke_width: f32,
    /// Stroke color as unmultiplied RGBA
    pub stroke_color: [u8; 4],
    /// Pixels per device-independent unit when rasterizing
    pub density: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            height: 300.0,
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_color: [0, 0, 0, 255],
            density: DEFAULT_DENSITY,
        }
    }
}

impl CanvasSettings {
    /// Stroke color as an egui color
    pub fn color(&self) -> egui::Color32 {
        let [r, g, b, a] = self.stroke_color;
        egui::Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// Which text recognition collaborator to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerBackend {
    /// Local `tesseract` executable
    #[default]
    Tesseract,
    /// HTTP recognition endpoint
    Remote,
}

/// Text recognition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    /// Backend to use
    pub backend: RecognizerBackend,
    /// Path or name of the tesseract executable
    pub tesseract_path: String,
    /// Recognition language (tesseract language code)
    pub language: String,
    /// Endpoint for the remote backend
    pub endpoint: Option<String>,
    /// Image preprocessing before recognition
    pub preprocessing: OcrPreprocessing,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            backend: RecognizerBackend::Tesseract,
            tesseract_path: "tesseract".to_string(),
            language: "eng".to_string(),
            endpoint: None,
            preprocessing: OcrPreprocessing::default(),
        }
    }
}

/// Optional image filters applied before recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrPreprocessing {
    /// Master switch for the optional filters (alpha flattening always runs)
    pub enabled: bool,
    /// Integer upscale factor (1 = unchanged)
    pub scale: u32,
    /// Contrast factor around mid gray (1.0 = unchanged)
    pub contrast: f32,
    /// Sharpen strength (0.0 = off)
    pub sharpen: f32,
    /// Convert to grayscale
    pub grayscale: bool,
    /// Invert colors
    pub invert: bool,
}

impl Default for OcrPreprocessing {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 1,
            contrast: 1.0,
            sharpen: 0.0,
            grayscale: false,
            invert: false,
        }
    }
}

/// Gallery picker settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    /// Directory to browse; the user's pictures directory when unset
    pub directory: Option<PathBuf>,
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();

        // Check canvas defaults
        assert!((config.canvas.height - 300.0).abs() < 0.01);
        assert!((config.canvas.stroke_width - 12.0).abs() < 0.01);
        assert_eq!(config.canvas.stroke_color, [0, 0, 0, 255]);
        assert!((config.canvas.density - 1.5).abs() < 0.01);
        assert_eq!(config.canvas.color(), egui::Color32::BLACK);

        // Check recognition defaults
        assert_eq!(config.recognition.backend, RecognizerBackend::Tesseract);
        assert_eq!(config.recognition.tesseract_path, "tesseract");
        assert_eq!(config.recognition.language, "eng");
        assert!(config.recognition.endpoint.is_none());
        assert!(config.recognition.preprocessing.enabled);
        assert_eq!(config.recognition.preprocessing.scale, 1);

        // Check gallery defaults
        assert!(config.gallery.directory.is_none());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = AppConfig::default();
        config.recognition.backend = RecognizerBackend::Remote;
        config.recognition.endpoint = Some("http://localhost:8080/recognize".to_string());
        config.canvas.stroke_color = [255, 0, 0, 255];

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.recognition.backend, RecognizerBackend::Remote);
        assert_eq!(parsed.recognition.endpoint, config.recognition.endpoint);
        assert_eq!(parsed.canvas.stroke_color, [255, 0, 0, 255]);
        assert_eq!(parsed.recognition.preprocessing, config.recognition.preprocessing);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [recognition]
            language = "deu"

            [canvas]
            density = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(parsed.recognition.language, "deu");
        assert_eq!(parsed.recognition.tesseract_path, "tesseract");
        assert!((parsed.canvas.density - 2.0).abs() < 0.01);
        assert!((parsed.canvas.height - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_save_and_load_config() {
        let mut config = AppConfig::default();
        config.gallery.directory = Some(PathBuf::from("/tmp/pictures"));

        let temp_file = NamedTempFile::new().unwrap();
        save_config(&config, temp_file.path()).unwrap();
        let loaded = load_config(temp_file.path()).unwrap();

        assert_eq!(loaded.gallery.directory, config.gallery.directory);
        assert_eq!(loaded.recognition.language, config.recognition.language);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "this is not valid toml {{{{").unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
