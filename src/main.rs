//! InkRead command-line entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use inkread::config::{self, AppConfig, RecognizerBackend};
use inkread::vision::{self, RecognitionInvoker, RecognitionState, TextRecognizer};
use inkread::{source, storage, ui};

/// How long headless recognition waits for the backend
const HEADLESS_TIMEOUT: Duration = Duration::from_secs(120);

/// InkRead - handwriting and image text recognition
#[derive(Parser, Debug)]
#[command(name = "inkread")]
#[command(about = "Draw a character or pick an image and recognise its text")]
struct Args {
    /// Configuration file (defaults to config.toml in the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with this image selected instead of the drawing
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Override the recognition backend
    #[arg(short, long, value_enum)]
    backend: Option<RecognizerBackend>,

    /// Recognise this image without opening a window, then exit
    #[arg(long, value_name = "PATH")]
    recognize: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = load_or_create_config(args.config.as_deref())?;
    if let Some(backend) = args.backend {
        config.recognition.backend = backend;
    }

    let recognizer = vision::create_recognizer(&config.recognition)?;

    if let Some(path) = args.recognize {
        return run_headless(&config, recognizer, &path);
    }

    info!("InkRead starting...");

    let gallery_dir = config
        .gallery
        .directory
        .clone()
        .unwrap_or_else(storage::default_gallery_dir);

    if let Err(e) = ui::run_app(config, gallery_dir, recognizer, args.image) {
        error!("UI error: {}", e);
    }

    info!("InkRead shutdown complete");
    Ok(())
}

/// Load configuration from file or fall back to defaults
///
/// An explicitly given path must exist; the default location is optional.
fn load_or_create_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let config = config::load_config(path)?;
        info!("Loaded configuration from {:?}", path);
        return Ok(config);
    }

    if let Ok(config_path) = storage::get_config_path() {
        if config_path.exists() {
            match config::load_config(&config_path) {
                Ok(config) => {
                    info!("Loaded configuration from {:?}", config_path);
                    return Ok(config);
                }
                Err(e) => error!("Ignoring unreadable configuration: {:#}", e),
            }
        }
    }

    info!("Using default configuration");
    Ok(AppConfig::default())
}

/// Recognise one image file and log the result
fn run_headless(
    config: &AppConfig,
    recognizer: Arc<dyn TextRecognizer>,
    path: &Path,
) -> Result<()> {
    let bitmap = source::decode_image(path)?;
    let prepared = vision::apply_preprocessing(&bitmap, &config.recognition.preprocessing);

    let mut invoker = RecognitionInvoker::new(recognizer);
    invoker.submit(prepared)?;
    invoker
        .wait(HEADLESS_TIMEOUT)
        .context("Recognition did not finish in time")?;

    match invoker.state() {
        RecognitionState::Failed(message) => anyhow::bail!("Recognition failed: {}", message),
        _ => Ok(()),
    }
}
