#![deny(unsafe_code)]
//! Sketch registry: maps sketch names to implementations, plus the frame
//! driver and a JSON-lines frame recorder.
//!
//! This crate sits between `sketchbook-core` (which defines the `Sketch`
//! trait) and the individual sketch crates (`sketchbook-waves`, etc.). The
//! CLI depends on this crate rather than on each sketch directly.

pub mod animator;
pub mod frame_log;

pub use animator::{Animator, ParamSender};
pub use frame_log::FrameLog;

use serde_json::Value;
use sketchbook_core::{
    Frame, FrameClock, InputState, ParamStore, Sketch, SketchError, Viewport,
};
use sketchbook_grid::Grid;
use sketchbook_particles::Particles;
use sketchbook_spiral::Spiral;
use sketchbook_trail::Trail;
use sketchbook_waves::Waves;

/// All available sketch names.
const SKETCH_NAMES: &[&str] = &["waves", "particles", "spiral", "grid", "trail"];

/// Enumeration of all available sketches.
///
/// Wraps each sketch implementation and delegates `Sketch` trait methods.
/// Use [`SketchKind::from_name`] for string-based construction.
pub enum SketchKind {
    /// Layered sinusoid polylines.
    Waves(Waves),
    /// Fading particles attracted to the pointer.
    Particles(Particles),
    /// Archimedean spiral history.
    Spiral(Spiral),
    /// Rotating noise-driven squares.
    Grid(Grid),
    /// Smoothed pointer trail.
    Trail(Trail),
}

impl SketchKind {
    /// Constructs a sketch by name.
    ///
    /// Returns `SketchError::UnknownSketch` if the name is not recognized.
    pub fn from_name(
        name: &str,
        viewport: Viewport,
        seed: u64,
        params: &Value,
    ) -> Result<Self, SketchError> {
        match name {
            "waves" => Ok(SketchKind::Waves(Waves::from_json(viewport, params)?)),
            "particles" => Ok(SketchKind::Particles(Particles::from_json(seed, params)?)),
            "spiral" => Ok(SketchKind::Spiral(Spiral::from_json(viewport, params)?)),
            "grid" => Ok(SketchKind::Grid(Grid::from_json(viewport, seed, params)?)),
            "trail" => Ok(SketchKind::Trail(Trail::from_json(viewport, params)?)),
            _ => Err(SketchError::UnknownSketch(name.to_string())),
        }
    }

    /// Returns a slice of all recognized sketch names.
    pub fn list_sketches() -> &'static [&'static str] {
        SKETCH_NAMES
    }

    fn inner(&self) -> &dyn Sketch {
        match self {
            SketchKind::Waves(s) => s,
            SketchKind::Particles(s) => s,
            SketchKind::Spiral(s) => s,
            SketchKind::Grid(s) => s,
            SketchKind::Trail(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Sketch {
        match self {
            SketchKind::Waves(s) => s,
            SketchKind::Particles(s) => s,
            SketchKind::Spiral(s) => s,
            SketchKind::Grid(s) => s,
            SketchKind::Trail(s) => s,
        }
    }
}

impl Sketch for SketchKind {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn step(&mut self, clock: &FrameClock, input: &InputState) -> Frame {
        self.inner_mut().step(clock, input)
    }

    fn params(&self) -> &ParamStore {
        self.inner().params()
    }

    fn update_params(&mut self, partial: &Value) -> Result<(), SketchError> {
        self.inner_mut().update_params(partial)
    }

    fn param_schema(&self) -> Value {
        self.inner().param_schema()
    }

    fn population(&self) -> usize {
        self.inner().population()
    }

    fn verify(&self) -> Result<(), SketchError> {
        self.inner().verify()
    }
}
