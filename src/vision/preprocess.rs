//! Image preprocessing before recognition
//!
//! Drawn canvases are transparent, so alpha is always flattened onto white
//! first. The remaining filters are optional and mostly help with faint or
//! low contrast gallery pictures.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::filter::filter3x3;
use tracing::debug;

use crate::config::OcrPreprocessing;

/// Largest upscale factor honored
const MAX_SCALE: u32 = 4;

/// Flatten onto white, then apply the configured filters
///
/// Order: upscale, contrast, sharpen, grayscale, invert.
pub fn apply_preprocessing(image: &RgbaImage, settings: &OcrPreprocessing) -> RgbaImage {
    let mut result = flatten_onto_white(image);

    if !settings.enabled {
        debug!("OCR preprocessing disabled");
        return result;
    }

    debug!(
        "OCR preprocessing: grayscale={}, invert={}, contrast={}, sharpen={}, scale={}",
        settings.grayscale, settings.invert, settings.contrast, settings.sharpen, settings.scale
    );

    let scale = settings.scale.clamp(1, MAX_SCALE);
    if scale > 1 && result.width() > 0 && result.height() > 0 {
        result = imageops::resize(
            &result,
            result.width() * scale,
            result.height() * scale,
            FilterType::Triangle,
        );
    }

    if (settings.contrast - 1.0).abs() > 0.01 {
        apply_contrast(&mut result, settings.contrast);
    }

    if settings.sharpen > 0.01 && result.width() >= 3 && result.height() >= 3 {
        result = apply_sharpen(&result, settings.sharpen);
    }

    if settings.grayscale {
        apply_grayscale(&mut result);
    }

    if settings.invert {
        imageops::invert(&mut result);
    }

    result
}

/// Composite every pixel over an opaque white background
pub fn flatten_onto_white(image: &RgbaImage) -> RgbaImage {
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        let alpha = pixel[3] as f32 / 255.0;
        for c in 0..3 {
            let value = pixel[c] as f32 * alpha + 255.0 * (1.0 - alpha);
            pixel[c] = value.round().clamp(0.0, 255.0) as u8;
        }
        pixel[3] = 255;
    }
    result
}

/// Stretch colors around mid gray; factor > 1.0 increases contrast
fn apply_contrast(image: &mut RgbaImage, factor: f32) {
    for pixel in image.pixels_mut() {
        for c in 0..3 {
            let value = (pixel[c] as f32 - 128.0) * factor + 128.0;
            pixel[c] = value.clamp(0.0, 255.0) as u8;
        }
    }
}

/// 3x3 sharpen: center 1 + 4s, direct neighbors -s
fn apply_sharpen(image: &RgbaImage, strength: f32) -> RgbaImage {
    let s = strength;
    let kernel = [0.0, -s, 0.0, -s, 1.0 + 4.0 * s, -s, 0.0, -s, 0.0];
    filter3x3::<Rgba<u8>, f32, u8>(image, &kernel)
}

/// Luminance grayscale, kept in RGBA layout
fn apply_grayscale(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let gray = (0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32) as u8;
        pixel[0] = gray;
        pixel[1] = gray;
        pixel[2] = gray;
    }
}
