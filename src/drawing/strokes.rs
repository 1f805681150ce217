//! Append-only stroke history

use super::segment::LineSegment;

/// Ordered history of every segment drawn in the current session.
///
/// Insertion order is drawing order is rendering order. There is no clear or
/// undo; the history lives as long as the window.
#[derive(Debug, Clone, Default)]
pub struct StrokeAccumulator {
    segments: Vec<LineSegment>,
}

impl StrokeAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one segment
    pub fn push(&mut self, segment: LineSegment) {
        self.segments.push(segment);
    }

    /// All segments in drawing order
    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineSegment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Monotonic revision, bumps on every append
    pub fn revision(&self) -> u64 {
        self.segments.len() as u64
    }
}

impl<'a> IntoIterator for &'a StrokeAccumulator {
    type Item = &'a LineSegment;
    type IntoIter = std::slice::Iter<'a, LineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
