#![deny(unsafe_code)]
//! Smoothed pointer trail sketch.
//!
//! A cursor eases toward the pointer by `smooth_amount` of the remaining
//! gap each tick and its position is recorded into a history of at most
//! `max_trail` points. The history is drawn as tapering line segments,
//! then circles, then a two-layer cursor marker on top.

use glam::DVec2;
use serde_json::Value;
use sketchbook_core::entity::update;
use sketchbook_core::gradient::lerp;
use sketchbook_core::params::{ParamSpec, ParamStore};
use sketchbook_core::{
    BoundedCollection, Entity, Frame, FrameClock, Hsba, InputState, Overlay, RenderPrimitive,
    Sketch, SketchError, SpawnPolicy, Srgb, UpdatePolicy, Viewport,
};
use tracing::{debug, trace};

/// Tick length handed to the smoothing update.
const TICK: f64 = 1.0;
const SATURATION: f64 = 80.0;
const BRIGHTNESS: f64 = 100.0;
const CIRCLE_ALPHA: f64 = 200.0;
/// Circle hues run from `color_end - 40` to `color_start + 20`.
const CIRCLE_HUE_START_OFFSET: f64 = -40.0;
const CIRCLE_HUE_END_OFFSET: f64 = 20.0;
const CURSOR_HUE: f64 = 320.0;

/// Recognized options.
pub const PARAM_SPECS: &[ParamSpec] = &[
    ParamSpec::count("max_trail", 50.0, 1.0, 1000.0, "Points kept in the trail history"),
    ParamSpec::number(
        "smooth_amount",
        0.1,
        0.01,
        1.0,
        "Share of the gap to the pointer closed per frame",
    ),
    ParamSpec::number("fade_alpha", 30.0, 0.0, 255.0, "Background alpha; lower leaves longer trails"),
    ParamSpec::number("line_weight_min", 1.0, 0.0, 50.0, "Weight of the oldest segment"),
    ParamSpec::number("line_weight_max", 8.0, 0.0, 50.0, "Weight the newest segment approaches"),
    ParamSpec::number("circle_min", 5.0, 0.0, 200.0, "Diameter of the oldest circle"),
    ParamSpec::number("circle_max", 20.0, 0.0, 200.0, "Diameter the newest circle approaches"),
    ParamSpec::number("color_start", 180.0, 0.0, 360.0, "Hue at the tail"),
    ParamSpec::number("color_end", 320.0, 0.0, 360.0, "Hue toward the head"),
    ParamSpec::number("cursor_size", 25.0, 0.0, 200.0, "Outer cursor diameter"),
    ParamSpec::number("cursor_inner_size", 10.0, 0.0, 200.0, "Inner cursor diameter"),
];

/// Typed view of the current parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailParams {
    pub max_trail: usize,
    pub smooth_amount: f64,
    pub fade_alpha: f64,
    pub line_weight_min: f64,
    pub line_weight_max: f64,
    pub circle_min: f64,
    pub circle_max: f64,
    pub color_start: f64,
    pub color_end: f64,
    pub cursor_size: f64,
    pub cursor_inner_size: f64,
}

impl TrailParams {
    pub fn from_store(store: &ParamStore) -> Self {
        Self {
            max_trail: store.count("max_trail"),
            smooth_amount: store.number("smooth_amount"),
            fade_alpha: store.number("fade_alpha"),
            line_weight_min: store.number("line_weight_min"),
            line_weight_max: store.number("line_weight_max"),
            circle_min: store.number("circle_min"),
            circle_max: store.number("circle_max"),
            color_start: store.number("color_start"),
            color_end: store.number("color_end"),
            cursor_size: store.number("cursor_size"),
            cursor_inner_size: store.number("cursor_inner_size"),
        }
    }
}

/// Eased cursor with a fading ribbon behind it.
pub struct Trail {
    params: ParamStore,
    cursor: Entity,
    trail: BoundedCollection,
}

impl Trail {
    /// Creates the sketch with the cursor at the viewport center.
    pub fn from_json(viewport: Viewport, params: &Value) -> Result<Self, SketchError> {
        let params = ParamStore::from_json(PARAM_SPECS, params)?;
        let capacity = params.count("max_trail");
        debug!(capacity, "trail sketch created");
        Ok(Self {
            params,
            cursor: Entity::at(viewport.center(), 0.0, Hsba::white()),
            trail: BoundedCollection::new(capacity),
        })
    }

    /// Smoothed cursor position.
    pub fn cursor(&self) -> DVec2 {
        self.cursor.position
    }

    /// Recorded cursor positions, oldest first.
    pub fn points(&self) -> Vec<DVec2> {
        self.trail.iter().map(|e| e.position).collect()
    }

    fn draw(&self, frame: &mut Frame, p: &TrailParams) {
        let len = self.trail.len() as f64;
        let points: Vec<DVec2> = self.trail.iter().map(|e| e.position).collect();

        for (i, pair) in points.windows(2).enumerate() {
            let i = i as f64;
            let alpha = lerp(i, 0.0, len, 0.0, 255.0);
            let weight = lerp(i, 0.0, len, p.line_weight_min, p.line_weight_max);
            let hue = lerp(i, 0.0, len, p.color_start, p.color_end);
            frame.push(RenderPrimitive::line(
                pair[0],
                pair[1],
                Hsba::new(hue, SATURATION, BRIGHTNESS, alpha),
                weight,
            ));
        }

        let circle_hue_from = p.color_end + CIRCLE_HUE_START_OFFSET;
        let circle_hue_to = p.color_start + CIRCLE_HUE_END_OFFSET;
        for (i, &point) in points.iter().enumerate() {
            let i = i as f64;
            let size = lerp(i, 0.0, len, p.circle_min, p.circle_max);
            let hue = lerp(i, 0.0, len, circle_hue_from, circle_hue_to);
            frame.push(RenderPrimitive::point(
                point,
                size,
                Hsba::new(hue, SATURATION, BRIGHTNESS, CIRCLE_ALPHA),
            ));
        }

        let at = self.cursor.position;
        frame.push(RenderPrimitive::point(
            at,
            p.cursor_size,
            Hsba::opaque(CURSOR_HUE, 100.0, 100.0),
        ));
        frame.push(RenderPrimitive::point(at, p.cursor_inner_size, Hsba::white()));
    }
}

impl Sketch for Trail {
    fn name(&self) -> &'static str {
        "trail"
    }

    fn step(&mut self, clock: &FrameClock, input: &InputState) -> Frame {
        let p = TrailParams::from_store(&self.params);

        let smoothing = UpdatePolicy::Smoothing {
            target: input.pointer,
            amount: p.smooth_amount,
        };
        update(&mut self.cursor, &smoothing, TICK);
        let cursor = self.cursor;
        self.trail
            .spawn(SpawnPolicy::Always, clock.ticks(), || cursor);
        trace!(tick = clock.ticks(), points = self.trail.len(), "trail stepped");

        let mut frame = Frame::new(
            clock.ticks(),
            Some(Overlay::translucent(Srgb::from_rgb8(25, 25, 50), p.fade_alpha)),
        );
        self.draw(&mut frame, &p);
        frame
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn update_params(&mut self, partial: &Value) -> Result<(), SketchError> {
        let update = self.params.merge(partial)?;
        if update.contains("max_trail") {
            let capacity = self.params.count("max_trail");
            let dropped = self.trail.set_capacity(capacity);
            debug!(capacity, dropped, "trail capacity changed");
        }
        Ok(())
    }

    fn population(&self) -> usize {
        self.trail.len()
    }

    fn verify(&self) -> Result<(), SketchError> {
        self.trail.verify()
    }
}
