//! Drag gesture to segment translation

use egui::{Color32, Pos2, Vec2};

use super::segment::{LineSegment, DEFAULT_STROKE_WIDTH};
use super::strokes::StrokeAccumulator;

/// Pointer-drag listener over the drawing region
///
/// Every drag delta becomes exactly one segment ending at the current pointer
/// position. No smoothing, no distance filtering.
#[derive(Debug, Clone)]
pub struct InputSurface {
    color: Color32,
    stroke_width: f32,
}

impl Default for InputSurface {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl InputSurface {
    pub fn new(color: Color32, stroke_width: f32) -> Self {
        Self { color, stroke_width }
    }

    /// Handle one incremental drag callback.
    ///
    /// `position` is the current pointer position local to the drawing region,
    /// `delta` the motion since the previous callback.
    pub fn drag(&self, strokes: &mut StrokeAccumulator, position: Pos2, delta: Vec2) -> LineSegment {
        let segment = LineSegment::new(position - delta, position)
            .with_color(self.color)
            .with_stroke_width(self.stroke_width);
        strokes.push(segment);
        segment
    }

    /// Replay a polyline as consecutive drag callbacks.
    ///
    /// The first point is the press position, so `points.len() - 1` segments
    /// are produced.
    pub fn drag_through(&self, strokes: &mut StrokeAccumulator, points: &[Pos2]) {
        for pair in points.windows(2) {
            self.drag(strokes, pair[1], pair[1] - pair[0]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_builds_segment_from_delta() {
        let surface = InputSurface::default();
        let mut strokes = StrokeAccumulator::new();

        let segment = surface.drag(&mut strokes, Pos2::new(10.0, 5.0), Vec2::new(4.0, 1.0));

        assert_eq!(segment.start, Pos2::new(6.0, 4.0));
        assert_eq!(segment.end, Pos2::new(10.0, 5.0));
        assert_eq!(segment.color, Color32::BLACK);
        assert_eq!(strokes.segments(), &[segment]);
    }

    #[test]
    fn test_n_deltas_give_n_connected_segments() {
        let surface = InputSurface::new(Color32::BLUE, 3.0);
        let mut strokes = StrokeAccumulator::new();

        let first = Pos2::new(2.0, 3.0);
        let deltas = [
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(-3.0, 1.0),
            Vec2::new(5.0, -4.0),
            Vec2::new(0.0, 0.0),
        ];

        let mut position = first;
        for delta in deltas {
            position += delta;
            surface.drag(&mut strokes, position, delta);
        }

        assert_eq!(strokes.len(), deltas.len());
        assert_eq!(strokes.segments()[0].start, first);
        for pair in strokes.segments().windows(2) {
            assert_eq!(pair[1].start, pair[0].end);
        }
        assert!(strokes.iter().all(|s| s.color == Color32::BLUE && s.stroke_width == 3.0));
    }

    #[test]
    fn test_single_delta_starts_at_first_sample() {
        let surface = InputSurface::default();
        let mut strokes = StrokeAccumulator::new();

        surface.drag(&mut strokes, Pos2::new(7.0, 7.0), Vec2::new(2.0, 2.0));

        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes.segments()[0].start, Pos2::new(5.0, 5.0));
    }

    #[test]
    fn test_perpendicular_drag_scenario() {
        let surface = InputSurface::default();
        let mut strokes = StrokeAccumulator::new();

        surface.drag_through(
            &mut strokes,
            &[Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0), Pos2::new(10.0, 10.0)],
        );

        let segments = strokes.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!((segments[0].start, segments[0].end), (Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)));
        assert_eq!((segments[1].start, segments[1].end), (Pos2::new(10.0, 0.0), Pos2::new(10.0, 10.0)));
    }
}
