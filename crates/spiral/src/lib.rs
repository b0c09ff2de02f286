#![deny(unsafe_code)]
//! Expanding spiral sketch.
//!
//! Each tick places one point on an Archimedean spiral around the viewport
//! center (`radius = angle * spiral_tightness`), then advances the angle by
//! `spiral_speed`. Points are kept in a [`BoundedCollection`] of capacity
//! `max_points`; the oldest falls off once the history is full. Hue cycles
//! with the angle, size pulses slowly with it, and alpha fades with age.

use glam::DVec2;
use serde_json::Value;
use sketchbook_core::gradient::lerp;
use sketchbook_core::params::{ParamSpec, ParamStore};
use sketchbook_core::{
    BoundedCollection, Entity, Frame, FrameClock, Hsba, InputState, Overlay, RenderPrimitive,
    Sketch, SketchError, SpawnPolicy, Srgb, Viewport,
};
use tracing::debug;

const SATURATION: f64 = 80.0;
const BRIGHTNESS: f64 = 100.0;
/// Alpha of the oldest point.
const OLDEST_ALPHA: f64 = 50.0;
/// Alpha the newest point approaches.
const NEWEST_ALPHA: f64 = 255.0;
/// Angular frequency of the size pulse.
const SIZE_PULSE: f64 = 0.1;

/// Recognized options.
pub const PARAM_SPECS: &[ParamSpec] = &[
    ParamSpec::number("spiral_speed", 0.1, 0.0, 1.0, "Angle added per frame, in radians"),
    ParamSpec::number(
        "spiral_tightness",
        0.5,
        0.0,
        10.0,
        "Radius gained per radian; lower is tighter",
    ),
    ParamSpec::count("max_points", 500.0, 1.0, 10_000.0, "Points kept in the history"),
    ParamSpec::number("min_size", 2.0, 0.0, 100.0, "Smallest point diameter"),
    ParamSpec::number("max_size", 8.0, 0.0, 100.0, "Largest point diameter"),
    ParamSpec::number("color_speed", 10.0, 0.0, 100.0, "Hue degrees per radian"),
    ParamSpec::number("fade_alpha", 10.0, 0.0, 255.0, "Background alpha; lower leaves longer trails"),
];

/// Typed view of the current parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralParams {
    pub spiral_speed: f64,
    pub spiral_tightness: f64,
    pub max_points: usize,
    pub min_size: f64,
    pub max_size: f64,
    pub color_speed: f64,
    pub fade_alpha: f64,
}

impl SpiralParams {
    pub fn from_store(store: &ParamStore) -> Self {
        Self {
            spiral_speed: store.number("spiral_speed"),
            spiral_tightness: store.number("spiral_tightness"),
            max_points: store.count("max_points"),
            min_size: store.number("min_size"),
            max_size: store.number("max_size"),
            color_speed: store.number("color_speed"),
            fade_alpha: store.number("fade_alpha"),
        }
    }
}

/// Point on the spiral at `angle`, relative to its center.
pub fn spiral_offset(angle: f64, tightness: f64) -> DVec2 {
    DVec2::from_angle(angle) * (angle * tightness)
}

/// Archimedean spiral trail.
pub struct Spiral {
    center: DVec2,
    params: ParamStore,
    angle: FrameClock,
    points: BoundedCollection,
}

impl Spiral {
    /// Creates the sketch with defaults overridden by `params`.
    pub fn from_json(viewport: Viewport, params: &Value) -> Result<Self, SketchError> {
        let params = ParamStore::from_json(PARAM_SPECS, params)?;
        let capacity = params.count("max_points");
        debug!(capacity, "spiral sketch created");
        Ok(Self {
            center: viewport.center(),
            params,
            angle: FrameClock::new(),
            points: BoundedCollection::new(capacity),
        })
    }

    /// Angle the next point will be placed at.
    pub fn angle(&self) -> f64 {
        self.angle.time()
    }

    /// Spiral radius at the current angle.
    pub fn radius(&self) -> f64 {
        self.angle() * self.params.number("spiral_tightness")
    }

    /// History points, oldest first.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.points.snapshot()
    }
}

impl Sketch for Spiral {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn step(&mut self, clock: &FrameClock, _input: &InputState) -> Frame {
        let p = SpiralParams::from_store(&self.params);
        let angle = self.angle.time();

        let position = self.center + spiral_offset(angle, p.spiral_tightness);
        let hue = (angle * p.color_speed) % 360.0;
        let size = lerp((angle * SIZE_PULSE).sin(), -1.0, 1.0, p.min_size, p.max_size);
        self.points.spawn(SpawnPolicy::Always, clock.ticks(), || {
            Entity::at(position, size, Hsba::opaque(hue, SATURATION, BRIGHTNESS))
        });

        let mut frame = Frame::new(
            clock.ticks(),
            Some(Overlay::translucent(Srgb::from_rgb8(15, 15, 25), p.fade_alpha)),
        );
        let len = self.points.len() as f64;
        for (i, e) in self.points.iter().enumerate() {
            let alpha = lerp(i as f64, 0.0, len, OLDEST_ALPHA, NEWEST_ALPHA);
            frame.push(RenderPrimitive::point(
                e.position,
                e.size,
                e.color.with_alpha(alpha),
            ));
        }

        self.angle.advance(p.spiral_speed);
        frame
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn update_params(&mut self, partial: &Value) -> Result<(), SketchError> {
        let update = self.params.merge(partial)?;
        if update.contains("max_points") {
            let capacity = self.params.count("max_points");
            let dropped = self.points.set_capacity(capacity);
            debug!(capacity, dropped, "spiral history capacity changed");
        }
        Ok(())
    }

    fn population(&self) -> usize {
        self.points.len()
    }

    fn verify(&self) -> Result<(), SketchError> {
        self.points.verify()
    }
}
