//! External input sampled once at the start of every tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pointer state supplied by whoever drives the frame loop.
///
/// Sketches only read it. Before any pointer movement is known the pointer
/// sits at the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub pointer: DVec2,
}

impl InputState {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            pointer: DVec2::new(x, y),
        }
    }
}
