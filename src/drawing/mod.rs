//! Drawing Layer
//!
//! Freehand drawing pipeline: drag gestures become line segments, segments
//! accumulate in drawing order, and the rasterizer replays the full history
//! into a pixel buffer that can be handed to text recognition.

pub mod input;
pub mod raster;
pub mod segment;
pub mod strokes;

pub use input::InputSurface;
pub use raster::{RasterCanvas, Rasterizer};
pub use segment::LineSegment;
pub use strokes::StrokeAccumulator;
