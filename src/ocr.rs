// src/ocr.rs
//
// Seam for the external OCR engine. Engines are acquired per batch and
// released through OcrSession, never held in global state.

use log::{debug, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct OcrOutput {
    pub text: String,
    /// Engine confidence, 0-100
    pub confidence: f64,
}

pub trait OcrEngine {
    /// Reads the text out of an image or PDF buffer.
    fn recognize(&mut self, bytes: &[u8]) -> Result<OcrOutput>;

    /// Releases engine resources. Called exactly once per session.
    fn terminate(&mut self) -> Result<()>;
}

/// Scoped handle on an OCR engine. The engine is terminated on `close` or,
/// failing that, when the session is dropped.
pub struct OcrSession<E: OcrEngine> {
    engine: Option<E>,
    processed: usize,
}

impl<E: OcrEngine> OcrSession<E> {
    pub fn new(engine: E) -> Self {
        Self { engine: Some(engine), processed: 0 }
    }

    pub fn recognize(&mut self, bytes: &[u8]) -> Result<OcrOutput> {
        let engine = self
            .engine
            .as_mut()
            .ok_or_else(|| Error::ocr("OCR session already closed"))?;
        let output = engine.recognize(bytes)?;
        self.processed += 1;
        debug!(
            "OCR read {} chars from {} bytes (confidence {:.1})",
            output.text.len(),
            bytes.len(),
            output.confidence
        );
        Ok(output)
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Terminates the engine and reports any failure to do so.
    pub fn close(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        match self.engine.take() {
            Some(mut engine) => {
                debug!("terminating OCR engine after {} documents", self.processed);
                engine.terminate()
            }
            None => Ok(()),
        }
    }
}

impl<E: OcrEngine> Drop for OcrSession<E> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("Error terminating OCR engine: {}", e);
        }
    }
}

/// Acquires an engine, runs `work` against it and terminates the engine on
/// every exit path. An error from `work` takes precedence over one from
/// termination.
pub fn with_ocr_session<E, A, F, T>(acquire: A, work: F) -> Result<T>
where
    E: OcrEngine,
    A: FnOnce() -> Result<E>,
    F: FnOnce(&mut OcrSession<E>) -> Result<T>,
{
    let mut session = OcrSession::new(acquire()?);
    let result = work(&mut session);
    let closed = session.close();
    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Err(e), _) => Err(e),
        (Ok(_), Err(e)) => Err(e),
    }
}

/// Treats the input bytes as text that has already been extracted.
#[derive(Debug, Default)]
pub struct PlainTextEngine;

impl OcrEngine for PlainTextEngine {
    fn recognize(&mut self, bytes: &[u8]) -> Result<OcrOutput> {
        let text = String::from_utf8_lossy(bytes).into_owned();
        let confidence = if text.trim().is_empty() { 0.0 } else { 100.0 };
        Ok(OcrOutput { text, confidence })
    }

    fn terminate(&mut self) -> Result<()> {
        Ok(())
    }
}
