//! Recognition request lifecycle
//!
//! Runs the recognizer on a worker thread and hands the outcome back to the
//! UI thread through a channel. One request at a time:
//! `Idle -> Pending -> Completed | Failed`, and a new request may only start
//! once the previous one has settled.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use image::RgbaImage;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{RecognitionError, TextBlock, TextRecognizer};

/// Log target for recognition results
pub const LOG_TARGET: &str = "image_recognition";

/// Callback fired from the worker thread once an outcome is ready
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Result of one recognition request
#[derive(Debug)]
pub enum RecognitionOutcome {
    /// The recognizer returned these blocks (possibly none)
    Completed(Vec<TextBlock>),
    /// The recognizer failed with this message
    Failed(String),
}

impl From<Result<Vec<TextBlock>, RecognitionError>> for RecognitionOutcome {
    fn from(result: Result<Vec<TextBlock>, RecognitionError>) -> Self {
        match result {
            Ok(blocks) => RecognitionOutcome::Completed(blocks),
            Err(e) => RecognitionOutcome::Failed(e.to_string()),
        }
    }
}

/// Where the current request stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecognitionState {
    #[default]
    Idle,
    Pending,
    Completed(Vec<TextBlock>),
    Failed(String),
}

impl RecognitionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RecognitionState::Pending)
    }
}

/// Submit was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("a recognition request is already in flight")]
    Busy,
}

/// Drives one recognizer, one request at a time
pub struct RecognitionInvoker {
    recognizer: Arc<dyn TextRecognizer>,
    state: RecognitionState,
    outcome_tx: Sender<RecognitionOutcome>,
    outcome_rx: Receiver<RecognitionOutcome>,
    waker: Option<Waker>,
    submitted_at: Option<Instant>,
}

impl RecognitionInvoker {
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        let (outcome_tx, outcome_rx) = unbounded();
        Self {
            recognizer,
            state: RecognitionState::Idle,
            outcome_tx,
            outcome_rx,
            waker: None,
            submitted_at: None,
        }
    }

    /// Fire `waker` whenever an outcome becomes available
    pub fn with_waker(mut self, waker: Waker) -> Self {
        self.waker = Some(waker);
        self
    }

    pub fn state(&self) -> &RecognitionState {
        &self.state
    }

    pub fn backend_name(&self) -> &'static str {
        self.recognizer.name()
    }

    /// Start recognizing `image` on a worker thread
    pub fn submit(&mut self, image: RgbaImage) -> Result<(), SubmitError> {
        if self.state.is_pending() {
            debug!("Recognition request ignored, previous one still pending");
            return Err(SubmitError::Busy);
        }

        info!(
            "Submitting {}x{} image to {} recognizer",
            image.width(),
            image.height(),
            self.recognizer.name()
        );

        let recognizer = Arc::clone(&self.recognizer);
        let tx = self.outcome_tx.clone();
        let waker = self.waker.clone();

        std::thread::spawn(move || {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(|| recognizer.recognize(&image))) {
                Ok(result) => RecognitionOutcome::from(result),
                Err(payload) => RecognitionOutcome::Failed(panic_message(payload.as_ref())),
            };
            // The receiver is gone if the window closed mid-request
            if tx.send(outcome).is_ok() {
                if let Some(waker) = waker {
                    waker();
                }
            }
        });

        self.state = RecognitionState::Pending;
        self.submitted_at = Some(Instant::now());
        Ok(())
    }

    /// Consume a finished outcome without blocking.
    ///
    /// Returns the log lines written for it, or `None` if nothing settled.
    pub fn poll(&mut self) -> Option<Vec<String>> {
        let outcome = self.outcome_rx.try_recv().ok()?;
        Some(self.settle(outcome))
    }

    /// Block until the pending request settles or `timeout` passes
    pub fn wait(&mut self, timeout: Duration) -> Option<Vec<String>> {
        if !self.state.is_pending() {
            return None;
        }
        match self.outcome_rx.recv_timeout(timeout) {
            Ok(outcome) => Some(self.settle(outcome)),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn settle(&mut self, outcome: RecognitionOutcome) -> Vec<String> {
        if let Some(started) = self.submitted_at.take() {
            debug!("Recognition settled in {:?}", started.elapsed());
        }

        let lines = log_outcome(&outcome);
        self.state = match outcome {
            RecognitionOutcome::Completed(blocks) => RecognitionState::Completed(blocks),
            RecognitionOutcome::Failed(message) => RecognitionState::Failed(message),
        };
        lines
    }
}

/// Failure message for a recognizer that panicked
fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    format!("recognizer panicked: {}", detail)
}

/// Log an outcome and return the lines written
pub fn log_outcome(outcome: &RecognitionOutcome) -> Vec<String> {
    let lines = outcome_lines(outcome);
    for line in &lines {
        match outcome {
            RecognitionOutcome::Completed(_) => info!(target: LOG_TARGET, "{}", line),
            RecognitionOutcome::Failed(_) => warn!(target: LOG_TARGET, "{}", line),
        }
    }
    lines
}

/// Log lines for an outcome, in order
pub fn outcome_lines(outcome: &RecognitionOutcome) -> Vec<String> {
    match outcome {
        RecognitionOutcome::Completed(blocks) if blocks.is_empty() => vec!["No text found".to_string()],
        RecognitionOutcome::Completed(blocks) => blocks
            .iter()
            .map(|block| format!("Block text: {}", block.text))
            .collect(),
        RecognitionOutcome::Failed(message) => vec![format!("Error: {}", message)],
    }
}
