//! Stroke replay onto an RGBA pixel buffer
//!
//! Each segment is drawn as a round-capped thick line: every pixel whose
//! center lies within half the stroke width of the segment is covered, with a
//! one pixel anti-aliasing ramp at the edge. The whole history is replayed on
//! every call, there is no incremental path.

use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};

use super::segment::LineSegment;
use super::strokes::StrokeAccumulator;

/// Pixels per device-independent unit used by default
pub const DEFAULT_DENSITY: f32 = 1.5;

/// Pixel buffer produced from the stroke history
pub type RasterCanvas = RgbaImage;

/// Deterministic stroke rasterizer
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    /// Pixels per device-independent unit, applied to stroke widths
    density: f32,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_DENSITY)
    }
}

impl Rasterizer {
    pub fn new(density: f32) -> Self {
        Self { density }
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    /// Replay every segment, in order, onto a blank buffer of the given size
    pub fn rasterize(&self, strokes: &StrokeAccumulator, width: u32, height: u32) -> RasterCanvas {
        let mut canvas = RgbaImage::new(width, height);
        for segment in strokes {
            self.draw_segment(&mut canvas, segment);
        }
        canvas
    }

    /// Composite a single segment onto an existing buffer
    pub fn draw_segment(&self, canvas: &mut RasterCanvas, segment: &LineSegment) {
        let (width, height) = canvas.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        let radius = (segment.stroke_width * self.density / 2.0).max(0.0);
        if radius == 0.0 {
            return;
        }

        let Some((x0, y0, x1, y1)) = covered_pixels(segment, radius, width, height) else {
            return;
        };

        let Rgba([r, g, b, a]) = color_to_rgba(segment.color);
        if a == 0 {
            return;
        }

        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = distance_to_segment(center, segment.start, segment.end);
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }

                let alpha = (a as f32 / 255.0) * coverage;
                let pixel = canvas.get_pixel_mut(x, y);
                *pixel = blend_over(*pixel, [r, g, b], alpha);
            }
        }
    }
}

/// Inclusive pixel bounds a capsule can touch, clipped to the buffer
fn covered_pixels(segment: &LineSegment, radius: f32, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let reach = radius + 1.0;
    let min_x = segment.start.x.min(segment.end.x) - reach;
    let min_y = segment.start.y.min(segment.end.y) - reach;
    let max_x = segment.start.x.max(segment.end.x) + reach;
    let max_y = segment.start.y.max(segment.end.y) + reach;

    if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_x < 0.0 || max_y < 0.0 || min_x >= width as f32 || min_y >= height as f32 {
        return None;
    }

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil() as u32).min(width - 1);
    let y1 = (max_y.ceil() as u32).min(height - 1);
    Some((x0, y0, x1, y1))
}

/// Euclidean distance from `p` to the closed segment `a`-`b`
fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Source-over composite of an unmultiplied color onto an unmultiplied pixel
fn blend_over(dst: Rgba<u8>, src: [u8; 3], src_alpha: f32) -> Rgba<u8> {
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = src[c] as f32;
        let d = dst[c] as f32;
        let value = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        out[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Convert a raster into an egui image for texture upload
pub fn to_color_image(canvas: &RasterCanvas) -> egui::ColorImage {
    let size = [canvas.width() as usize, canvas.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, canvas.as_raw())
}

/// Unmultiplied RGBA bytes of a color, as stored in the raster
pub fn color_to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}
