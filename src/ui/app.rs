//! Recognition screen entry point

use eframe::egui;
use egui::{Color32, RichText, TextureHandle};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::source::gallery::is_image_file;
use crate::ui::state::ScreenState;
use crate::ui::theme::{self, ThemeColors};
use crate::ui::views::{render_canvas, render_gallery_window, render_preview};
use crate::vision::{RecognitionInvoker, RecognitionState, TextRecognizer};

/// The drawing and recognition application
pub struct InkReadApp {
    /// Screen state
    state: ScreenState,
    /// Texture holding the drawing raster
    drawing_texture: Option<TextureHandle>,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl InkReadApp {
    /// Create the application; the invoker wakes the UI when a result lands
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        gallery_dir: PathBuf,
        recognizer: Arc<dyn TextRecognizer>,
        initial_image: Option<PathBuf>,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let ctx = cc.egui_ctx.clone();
        let invoker = RecognitionInvoker::new(recognizer).with_waker(Arc::new(move || ctx.request_repaint()));

        let mut state = ScreenState::new(config, gallery_dir, invoker);
        if let Some(path) = initial_image {
            state.select_image(path);
        }

        Self {
            state,
            drawing_texture: None,
            theme_applied: false,
        }
    }

    /// Create eframe options for the window
    pub fn options(config: &AppConfig) -> eframe::NativeOptions {
        // canvas + preview + buttons + status
        let height = config.canvas.height * 2.0 + 220.0;
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, height])
                .with_min_inner_size([320.0, 400.0])
                .with_title("InkRead"),
            ..Default::default()
        }
    }

    /// Take the first dropped image file as a gallery pick
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        if let Some(path) = dropped.into_iter().find(|p| is_image_file(p)) {
            info!("Image dropped: {}", path.display());
            self.state.select_image(path);
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| match self.state.invoker.state() {
            RecognitionState::Idle => {
                ui.label(RichText::new(format!("Ready ({})", self.state.invoker.backend_name())).color(ThemeColors::TEXT_MUTED));
            }
            RecognitionState::Pending => {
                ui.spinner();
                ui.label(RichText::new("Recognising...").color(ThemeColors::ACCENT_WARNING));
            }
            RecognitionState::Completed(blocks) if blocks.is_empty() => {
                ui.label(RichText::new("No text found").color(ThemeColors::TEXT_MUTED));
            }
            RecognitionState::Completed(blocks) => {
                ui.label(RichText::new(format!("{} block(s) recognised", blocks.len())).color(ThemeColors::ACCENT_SUCCESS));
            }
            RecognitionState::Failed(message) => {
                ui.label(RichText::new("⚠").color(Color32::RED));
                ui.label(RichText::new(message).color(ThemeColors::ACCENT_ERROR));
            }
        });

        if let Some(ref error) = self.state.last_error {
            ui.label(RichText::new(error).color(ThemeColors::ACCENT_ERROR));
        }

        if !self.state.recognized_text.is_empty() {
            ui.add_space(4.0);
            ui.label(RichText::new(&self.state.recognized_text).size(20.0).strong());
        }
    }
}

impl eframe::App for InkReadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.state.poll_recognition();
        self.handle_dropped_files(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none().inner_margin(12.0).show(ui, |ui| {
                ui.vertical(|ui| {
                    render_canvas(ui, &mut self.state, &mut self.drawing_texture);
                    ui.add_space(8.0);
                    render_preview(ui, &self.state, self.drawing_texture.as_ref());
                    ui.add_space(8.0);

                    let button_size = egui::vec2(ui.available_width(), 40.0);
                    let busy = self.state.invoker.state().is_pending();
                    if ui
                        .add_enabled(!busy, egui::Button::new("Recognise Character").min_size(button_size))
                        .clicked()
                    {
                        self.state.recognize();
                    }
                    if ui.add(egui::Button::new("Open Gallery").min_size(button_size)).clicked() {
                        self.state.open_gallery();
                    }

                    ui.add_space(8.0);
                    self.render_status(ui);
                });
            });
        });

        render_gallery_window(ctx, &mut self.state);
    }
}

/// Run the application window
pub fn run_app(
    config: AppConfig,
    gallery_dir: PathBuf,
    recognizer: Arc<dyn TextRecognizer>,
    initial_image: Option<PathBuf>,
) -> Result<(), eframe::Error> {
    let options = InkReadApp::options(&config);
    eframe::run_native(
        "InkRead",
        options,
        Box::new(move |cc| {
            Ok(Box::new(InkReadApp::new(
                cc,
                &config,
                gallery_dir,
                recognizer,
                initial_image,
            )))
        }),
    )
}
