//! JSON-lines frame recorder.
//!
//! Each rendered [`Frame`] becomes one line of JSON. The log can be replayed
//! by any external rasterizer or diffed between runs.

use sketchbook_core::{Frame, Renderer, SketchError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// [`Renderer`] that serializes frames to a writer, one per line.
pub struct FrameLog<W: Write> {
    writer: W,
    frames: u64,
}

impl FrameLog<BufWriter<File>> {
    /// Creates (or truncates) `path` and logs frames into it.
    ///
    /// Returns `SketchError::Io` if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, SketchError> {
        let file = File::create(path)
            .map_err(|e| SketchError::Io(format!("{}: {e}", path.display())))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> FrameLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    /// Frames written so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> Result<(), SketchError> {
        self.writer
            .flush()
            .map_err(|e| SketchError::Io(e.to_string()))
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W, SketchError> {
        self.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Renderer for FrameLog<W> {
    type Error = SketchError;

    fn render(&mut self, frame: &Frame) -> Result<(), SketchError> {
        serde_json::to_writer(&mut self.writer, frame)
            .map_err(|e| SketchError::Io(e.to_string()))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| SketchError::Io(e.to_string()))?;
        self.frames += 1;
        Ok(())
    }
}
