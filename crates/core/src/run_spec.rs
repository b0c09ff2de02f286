//! Reproducible description of a sketch run.
//!
//! A [`RunSpec`] names the sketch, the viewport, parameter overrides, the
//! seed, and how many frames to produce. Two identical specs driven with the
//! same input produce identical frames within one build.

use crate::error::SketchError;
use crate::viewport::{Viewport, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSpec {
    pub sketch: String,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_height() -> usize {
    DEFAULT_HEIGHT
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl RunSpec {
    /// A spec with the default viewport, no overrides and zero frames.
    pub fn new(sketch: &str, seed: u64) -> Self {
        Self {
            sketch: sketch.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            params: empty_params(),
            seed,
            frames: 0,
        }
    }

    /// Validated viewport for this spec.
    pub fn viewport(&self) -> Result<Viewport, SketchError> {
        Viewport::new(self.width, self.height)
    }

    /// Parses a spec from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SketchError> {
        serde_json::from_str(text).map_err(|e| SketchError::Io(format!("invalid run spec: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_uses_defaults() {
        let s = RunSpec::new("spiral", 42);
        assert_eq!(s.sketch, "spiral");
        assert_eq!((s.width, s.height), (800, 600));
        assert_eq!(s.params, json!({}));
        assert_eq!(s.frames, 0);
    }

    #[test]
    fn json_round_trip_with_overrides() {
        let mut s = RunSpec::new("grid", 7);
        s.params = json!({"cols": 30, "noise_scale": 0.2});
        s.frames = 120;
        let text = serde_json::to_string_pretty(&s).unwrap();
        assert_eq!(RunSpec::from_json_str(&text).unwrap(), s);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let s = RunSpec::from_json_str(r#"{"sketch": "waves"}"#).unwrap();
        assert_eq!(s, RunSpec::new("waves", 0));
    }

    #[test]
    fn missing_sketch_is_an_error() {
        assert!(RunSpec::from_json_str(r#"{"width": 10}"#).is_err());
    }

    #[test]
    fn viewport_validates_dimensions() {
        let mut s = RunSpec::new("trail", 1);
        assert!(s.viewport().is_ok());
        s.width = 0;
        assert_eq!(s.viewport(), Err(SketchError::InvalidDimensions));
    }
}
