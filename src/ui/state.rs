//! Screen state management
//!
//! Everything the single recognition screen owns, kept free of egui so the
//! behavior can be exercised without a window.

use egui::{Pos2, Vec2};
use std::path::PathBuf;
use tracing::{debug, error, warn};

use crate::config::{AppConfig, OcrPreprocessing};
use crate::drawing::{InputSurface, RasterCanvas, Rasterizer, StrokeAccumulator};
use crate::source::{GalleryPicker, ImageState};
use crate::vision::invoker::SubmitError;
use crate::vision::{apply_preprocessing, RecognitionInvoker, RecognitionState};

/// Gallery picker window state
#[derive(Debug)]
pub struct GalleryViewState {
    /// Whether the picker window is showing
    pub open: bool,
    /// Directory listing
    pub picker: GalleryPicker,
    /// Listing error shown in the window
    pub error: Option<String>,
}

/// State of the drawing and recognition screen
pub struct ScreenState {
    /// Drawn segments
    pub strokes: StrokeAccumulator,
    /// Drag translation
    pub input: InputSurface,
    /// Stroke replay
    pub rasterizer: Rasterizer,
    /// Latest raster of the drawing, shown on the canvas
    pub raster: Option<RasterCanvas>,
    /// Currently selected image
    pub image: ImageState,
    /// Gallery picker window
    pub gallery: GalleryViewState,
    /// Recognition requests
    pub invoker: RecognitionInvoker,
    /// Filters applied before recognition
    pub preprocessing: OcrPreprocessing,
    /// Height of the drawing region in points
    pub canvas_height: f32,
    /// Text of the last successful recognition
    pub recognized_text: String,
    /// Last error (if any)
    pub last_error: Option<String>,
    /// (revision, width, height) of the current raster
    raster_key: Option<(u64, u32, u32)>,
}

impl ScreenState {
    /// Create screen state from configuration
    pub fn new(config: &AppConfig, gallery_dir: PathBuf, invoker: RecognitionInvoker) -> Self {
        Self {
            strokes: StrokeAccumulator::new(),
            input: InputSurface::new(config.canvas.color(), config.canvas.stroke_width),
            rasterizer: Rasterizer::new(config.canvas.density),
            raster: None,
            image: ImageState::default(),
            gallery: GalleryViewState {
                open: false,
                picker: GalleryPicker::new(gallery_dir),
                error: None,
            },
            invoker,
            preprocessing: config.recognition.preprocessing.clone(),
            canvas_height: config.canvas.height,
            recognized_text: String::new(),
            last_error: None,
            raster_key: None,
        }
    }

    /// Feed one drag callback from the canvas.
    ///
    /// egui keeps reporting a drag while the pointer is held still; those
    /// frames carry no motion and add nothing. Returns true when a segment
    /// was added.
    pub fn handle_drag(&mut self, position: Pos2, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        self.input.drag(&mut self.strokes, position, delta);
        true
    }

    /// Re-rasterize if the strokes or the canvas size changed.
    ///
    /// Returns true when a new raster was produced.
    pub fn refresh_raster(&mut self, width: u32, height: u32) -> bool {
        let key = (self.strokes.revision(), width, height);
        if self.raster_key == Some(key) {
            return false;
        }

        let raster = self.rasterizer.rasterize(&self.strokes, width, height);
        debug!(
            "Rasterized {} segments onto {}x{} at density {}",
            self.strokes.len(),
            width,
            height,
            self.rasterizer.density()
        );
        if self.image.picked_path().is_none() {
            self.image.on_raster(raster.clone());
        }
        self.raster = Some(raster);
        self.raster_key = Some(key);
        true
    }

    /// Open the gallery picker, re-reading its directory
    pub fn open_gallery(&mut self) {
        self.gallery.error = match self.gallery.picker.refresh() {
            Ok(()) => None,
            Err(e) => {
                warn!("Gallery unavailable: {:#}", e);
                Some(format!("{:#}", e))
            }
        };
        self.gallery.open = true;
    }

    /// Close the picker with the user's choice (`None` = cancelled)
    pub fn close_gallery(&mut self, choice: Option<usize>) {
        let pick = self.gallery.picker.pick(choice);
        self.image.on_pick(pick);
        self.gallery.open = false;
    }

    /// Select an image by path, e.g. from the command line or a file drop
    pub fn select_image(&mut self, path: PathBuf) {
        self.image.on_pick(Some(path));
    }

    /// Recognise the active image.
    ///
    /// Decode failures abort the action; they are logged and shown, nothing
    /// is submitted.
    pub fn recognize(&mut self) {
        let bitmap = match self.image.load_bitmap() {
            Ok(bitmap) => bitmap,
            Err(e) => {
                error!("Cannot recognise: {}", e);
                self.last_error = Some(e.to_string());
                return;
            }
        };

        let prepared = apply_preprocessing(&bitmap, &self.preprocessing);
        match self.invoker.submit(prepared) {
            Ok(()) => self.last_error = None,
            Err(SubmitError::Busy) => warn!("Recognition already in progress"),
        }
    }

    /// Pick up a finished recognition, if any
    pub fn poll_recognition(&mut self) -> bool {
        if self.invoker.poll().is_none() {
            return false;
        }
        match self.invoker.state() {
            RecognitionState::Completed(blocks) => {
                self.recognized_text = blocks
                    .iter()
                    .map(|b| b.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
            }
            RecognitionState::Failed(_) => self.recognized_text.clear(),
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ActiveImage;
    use crate::vision::{RecognitionError, TextBlock, TextRecognizer};
    use image::{Rgba, RgbaImage};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    /// Records the size of every image it sees
    struct RecordingRecognizer {
        seen: Arc<Mutex<Vec<(u32, u32)>>>,
    }

    impl TextRecognizer for RecordingRecognizer {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn recognize(&self, image: &RgbaImage) -> Result<Vec<TextBlock>, RecognitionError> {
            self.seen.lock().unwrap().push(image.dimensions());
            Ok(vec![TextBlock::new("A"), TextBlock::new("B")])
        }
    }

    /// Succeeds on the first call, fails on every later one
    struct FlakyRecognizer {
        calls: Mutex<usize>,
    }

    impl TextRecognizer for FlakyRecognizer {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn recognize(&self, _image: &RgbaImage) -> Result<Vec<TextBlock>, RecognitionError> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            if *calls == 1 {
                Ok(vec![TextBlock::new("A")])
            } else {
                Err(RecognitionError::Service("offline".to_string()))
            }
        }
    }

    fn screen(gallery_dir: PathBuf) -> (ScreenState, Arc<Mutex<Vec<(u32, u32)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let invoker = RecognitionInvoker::new(Arc::new(RecordingRecognizer { seen: Arc::clone(&seen) }));
        (ScreenState::new(&AppConfig::default(), gallery_dir, invoker), seen)
    }

    fn poll_until_settled(state: &mut ScreenState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !state.poll_recognition() {
            assert!(Instant::now() < deadline, "recognition never settled");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_refresh_raster_only_when_changed() {
        let (mut state, _) = screen(PathBuf::from("."));

        assert!(state.refresh_raster(40, 30));
        assert!(!state.refresh_raster(40, 30));

        state.input.drag_through(&mut state.strokes, &[Pos2::new(1.0, 1.0), Pos2::new(20.0, 20.0)]);
        assert!(state.refresh_raster(40, 30));

        // resize alone triggers a replay too
        assert!(state.refresh_raster(50, 30));
        assert_eq!(state.raster.as_ref().unwrap().dimensions(), (50, 30));
        assert!(matches!(state.image.current(), ActiveImage::Drawing(_)));
    }

    #[test]
    fn test_held_pointer_adds_no_segments() {
        let (mut state, _) = screen(PathBuf::from("."));

        assert!(state.handle_drag(Pos2::new(5.0, 5.0), Vec2::new(2.0, 0.0)));
        state.refresh_raster(20, 20);
        let revision = state.strokes.revision();

        // pointer held still for many frames
        for _ in 0..60 {
            assert!(!state.handle_drag(Pos2::new(5.0, 5.0), Vec2::ZERO));
        }

        assert_eq!(state.strokes.len(), 1);
        assert_eq!(state.strokes.revision(), revision);
        assert!(!state.refresh_raster(20, 20));
    }

    #[test]
    fn test_failure_clears_previous_text() {
        let invoker = RecognitionInvoker::new(Arc::new(FlakyRecognizer { calls: Mutex::new(0) }));
        let mut state = ScreenState::new(&AppConfig::default(), PathBuf::from("."), invoker);
        state.handle_drag(Pos2::new(4.0, 4.0), Vec2::new(3.0, 3.0));
        state.refresh_raster(12, 12);

        state.recognize();
        poll_until_settled(&mut state);
        assert_eq!(state.recognized_text, "A");

        state.recognize();
        poll_until_settled(&mut state);
        assert!(state.recognized_text.is_empty());
        assert!(matches!(state.invoker.state(), RecognitionState::Failed(_)));
    }

    #[test]
    fn test_recognize_drawing_logs_text() {
        let (mut state, seen) = screen(PathBuf::from("."));
        state.input.drag_through(&mut state.strokes, &[Pos2::new(2.0, 2.0), Pos2::new(10.0, 10.0)]);
        state.refresh_raster(16, 12);

        state.recognize();
        poll_until_settled(&mut state);

        assert_eq!(state.recognized_text, "A\nB");
        assert_eq!(seen.lock().unwrap().as_slice(), &[(16, 12)]);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_recognize_without_image_is_error() {
        let (mut state, seen) = screen(PathBuf::from("."));

        state.recognize();

        assert!(state.last_error.is_some());
        assert!(!state.invoker.state().is_pending());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_undecodable_pick_aborts_recognition() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"garbage").unwrap();

        let (mut state, seen) = screen(dir.path().to_path_buf());
        state.refresh_raster(8, 8);
        state.select_image(path);
        state.recognize();

        assert!(state.last_error.as_deref().unwrap().contains("broken.png"));
        assert!(!state.invoker.state().is_pending());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_gallery_pick_takes_priority() {
        let dir = TempDir::new().unwrap();
        RgbaImage::from_pixel(9, 7, Rgba([0, 0, 0, 255]))
            .save(dir.path().join("glyph.png"))
            .unwrap();

        let (mut state, seen) = screen(dir.path().to_path_buf());
        state.refresh_raster(16, 12);

        state.open_gallery();
        assert!(state.gallery.open);
        assert!(state.gallery.error.is_none());
        assert_eq!(state.gallery.picker.entries().len(), 1);

        state.close_gallery(Some(0));
        assert!(!state.gallery.open);

        // drawing more does not displace the picked image
        state.input.drag_through(&mut state.strokes, &[Pos2::new(0.0, 0.0), Pos2::new(5.0, 5.0)]);
        state.refresh_raster(16, 12);
        assert!(matches!(state.image.current(), ActiveImage::Gallery(_)));

        state.recognize();
        poll_until_settled(&mut state);
        assert_eq!(seen.lock().unwrap().as_slice(), &[(9, 7)]);
    }

    #[test]
    fn test_cancelled_gallery_keeps_drawing() {
        let dir = TempDir::new().unwrap();
        let (mut state, _) = screen(dir.path().to_path_buf());
        state.refresh_raster(16, 12);

        state.open_gallery();
        state.close_gallery(None);

        assert!(matches!(state.image.current(), ActiveImage::Drawing(_)));
    }

    #[test]
    fn test_missing_gallery_directory_reports_error() {
        let (mut state, _) = screen(PathBuf::from("/nonexistent/gallery"));

        state.open_gallery();

        assert!(state.gallery.open);
        assert!(state.gallery.error.is_some());
    }
}
