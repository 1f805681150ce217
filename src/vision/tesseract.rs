//! Tesseract OCR backend
//!
//! Pipes a PNG-encoded image into the `tesseract` executable and reads the
//! plain text result from stdout. Blank lines separate text blocks.

use image::RgbaImage;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

use super::{encode_png, RecognitionError, TextBlock, TextRecognizer};

/// Tesseract command-line engine wrapper
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    program: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(program: &str, language: &str) -> Self {
        Self {
            program: program.to_string(),
            language: language.to_string(),
        }
    }

    /// Get the recognition language
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn recognize(&self, image: &RgbaImage) -> Result<Vec<TextBlock>, RecognitionError> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(vec![]);
        }

        let png = encode_png(image)?;
        debug!(
            "Tesseract: processing {}x{} image ({} bytes)",
            image.width(),
            image.height(),
            png.len()
        );

        let mut child = Command::new(&self.program)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RecognitionError::Service(format!("failed to start {}: {}", self.program, e)))?;

        // Feed stdin from a separate thread so a full stdout pipe can't deadlock us
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RecognitionError::Service("tesseract stdin unavailable".to_string()))?;
        let writer = std::thread::spawn(move || stdin.write_all(&png));

        let output = child
            .wait_with_output()
            .map_err(|e| RecognitionError::Service(format!("tesseract did not finish: {}", e)))?;

        let write_result = writer.join();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::Service(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        match write_result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(RecognitionError::Service(format!("failed to send image to tesseract: {}", e)))
            }
            Err(_) => return Err(RecognitionError::Service("tesseract writer thread panicked".to_string())),
        }

        let blocks = parse_blocks(&String::from_utf8_lossy(&output.stdout));
        debug!("Tesseract: found {} text blocks", blocks.len());
        Ok(blocks)
    }
}

/// Split tesseract plain text output into blocks at blank lines
pub fn parse_blocks(output: &str) -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in output.lines() {
        // trim also strips the trailing form feed tesseract emits per page
        let line = line.trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(TextBlock::new(current.join("\n")));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(TextBlock::new(current.join("\n")));
    }

    blocks
}
