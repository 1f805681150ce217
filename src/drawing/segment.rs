//! Line segment value type

use egui::{Color32, Pos2};

/// Default stroke width in device-independent units
pub const DEFAULT_STROKE_WIDTH: f32 = 12.0;

/// One straight stroke segment produced by a drag gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Previous pointer sample
    pub start: Pos2,
    /// Current pointer sample
    pub end: Pos2,
    /// Stroke color
    pub color: Color32,
    /// Stroke width in device-independent units
    pub stroke_width: f32,
}

impl LineSegment {
    /// Create a segment with the default color and width
    pub fn new(start: Pos2, end: Pos2) -> Self {
        Self {
            start,
            end,
            color: Color32::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    /// Builder-style color override
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    /// Builder-style width override
    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Segment length in canvas units
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let segment = LineSegment::new(Pos2::new(0.0, 0.0), Pos2::new(3.0, 4.0));

        assert_eq!(segment.color, Color32::BLACK);
        assert_eq!(segment.stroke_width, DEFAULT_STROKE_WIDTH);
        assert!((segment.length() - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_builder_overrides() {
        let segment = LineSegment::new(Pos2::ZERO, Pos2::ZERO)
            .with_color(Color32::RED)
            .with_stroke_width(2.0);

        assert_eq!(segment.color, Color32::RED);
        assert_eq!(segment.stroke_width, 2.0);
        assert_eq!(segment.length(), 0.0);
    }
}
