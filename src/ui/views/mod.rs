//! Screen views

pub mod canvas;
pub mod gallery;
pub mod preview;

pub use canvas::render_canvas;
pub use gallery::render_gallery_window;
pub use preview::render_preview;
