//! The `Sketch` trait every generator strategy implements, and the
//! `Renderer` trait on the consuming side.
//!
//! Both traits are object-safe so a frame loop can switch between
//! `Box<dyn Sketch>` values at runtime.

use crate::clock::FrameClock;
use crate::error::SketchError;
use crate::input::InputState;
use crate::params::ParamStore;
use crate::primitive::Frame;
use serde_json::Value;

/// A frame-driven procedural animation.
///
/// A sketch owns its parameters and all of its mutable state. The driver
/// calls [`Sketch::step`] exactly once per frame, after advancing the shared
/// clock; parameter merges happen strictly between steps.
pub trait Sketch {
    /// Registry name, e.g. `"spiral"`.
    fn name(&self) -> &'static str;

    /// Advances internal state by one tick and returns what to draw.
    ///
    /// Never fails for a validated parameter set.
    fn step(&mut self, clock: &FrameClock, input: &InputState) -> Frame;

    /// Current parameter store.
    fn params(&self) -> &ParamStore;

    /// Validates and merges a partial JSON object into the parameters.
    ///
    /// All keys are applied or none. State derived from specific keys is
    /// recomputed before this returns.
    fn update_params(&mut self, partial: &Value) -> Result<(), SketchError>;

    /// Schema describing every option: type, range, default, description.
    fn param_schema(&self) -> Value {
        self.params().schema()
    }

    /// Number of live entities (zero for stateless sketches).
    fn population(&self) -> usize {
        0
    }

    /// Checks internal invariants. A failure is a programming error.
    fn verify(&self) -> Result<(), SketchError> {
        Ok(())
    }
}

/// Consumer of finished frames (rasterizer, recorder, network sink).
pub trait Renderer {
    type Error;

    fn render(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}
