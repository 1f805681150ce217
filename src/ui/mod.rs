//! UI Module
//!
//! Single screen: drawing canvas, active image preview, recognition and
//! gallery buttons, and the recognition status.

pub mod app;
pub mod state;
pub mod theme;
pub mod views;

pub use app::{run_app, InkReadApp};
pub use state::ScreenState;
