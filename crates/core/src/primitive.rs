//! Renderer-agnostic descriptions of what to draw for one frame.
//!
//! Sketches never draw. Each `step` returns a [`Frame`]: an optional
//! translucent background [`Overlay`] followed by an ordered list of
//! [`RenderPrimitive`]s. Frames are owned values; a renderer can keep one
//! for as long as it likes without racing the next tick.

use crate::color::{Hsba, Srgb, ALPHA_OPAQUE};
use glam::DVec2;
use serde::Serialize;

/// Geometry of one primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Filled circle.
    Point { center: DVec2, diameter: f64 },
    /// Straight stroked segment.
    Line { from: DVec2, to: DVec2 },
    /// Open stroked path through the vertices in order.
    Polyline { vertices: Vec<DVec2> },
    /// Filled square of side `size` centered on `center`, rotated by
    /// `rotation` radians.
    Rect {
        center: DVec2,
        size: f64,
        rotation: f64,
        corner_radius: f64,
    },
}

/// One drawable shape with its color and optional stroke weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPrimitive {
    #[serde(flatten)]
    pub shape: Shape,
    pub color: Hsba,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_weight: Option<f64>,
}

impl RenderPrimitive {
    pub fn point(center: DVec2, diameter: f64, color: Hsba) -> Self {
        Self {
            shape: Shape::Point { center, diameter },
            color,
            stroke_weight: None,
        }
    }

    pub fn line(from: DVec2, to: DVec2, color: Hsba, weight: f64) -> Self {
        Self {
            shape: Shape::Line { from, to },
            color,
            stroke_weight: Some(weight),
        }
    }

    pub fn polyline(vertices: Vec<DVec2>, color: Hsba, weight: f64) -> Self {
        Self {
            shape: Shape::Polyline { vertices },
            color,
            stroke_weight: Some(weight),
        }
    }

    pub fn rect(center: DVec2, size: f64, rotation: f64, corner_radius: f64, color: Hsba) -> Self {
        Self {
            shape: Shape::Rect {
                center,
                size,
                rotation,
                corner_radius,
            },
            color,
            stroke_weight: None,
        }
    }
}

/// Background painted before the primitives. An alpha below 255 leaves a
/// fading trail of previous frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overlay {
    pub color: Srgb,
    pub alpha: f64,
}

impl Overlay {
    /// Fully opaque background that clears the previous frame.
    pub fn opaque(color: Srgb) -> Self {
        Self {
            color,
            alpha: ALPHA_OPAQUE,
        }
    }

    /// Translucent background; alpha is clamped to [0, 255].
    pub fn translucent(color: Srgb, alpha: f64) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, ALPHA_OPAQUE),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Index of the tick that produced this frame.
    pub tick: u64,
    pub overlay: Option<Overlay>,
    pub primitives: Vec<RenderPrimitive>,
}

impl Frame {
    pub fn new(tick: u64, overlay: Option<Overlay>) -> Self {
        Self {
            tick,
            overlay,
            primitives: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: RenderPrimitive) {
        self.primitives.push(primitive);
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
