//! InkRead - draw a character or pick an image, then read it back
//!
//! Freehand strokes are rasterized and sent, together with gallery images,
//! to a text recognition backend. Recognized text blocks are logged.

pub mod config;
pub mod drawing;
pub mod source;
pub mod storage;
pub mod ui;
pub mod vision;
