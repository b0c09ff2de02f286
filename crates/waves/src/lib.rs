#![deny(unsafe_code)]
//! Wave field sketch.
//!
//! Draws `num_layers` horizontal polylines, each the sum of two sinusoids
//! scrolling with time. Layers are phase-shifted and stacked vertically,
//! with hue running from `color_start` on the first layer toward
//! `color_end` on the last. Stateless apart from its time counter: no
//! entities, no collection.

use glam::DVec2;
use serde_json::Value;
use sketchbook_core::gradient::lerp;
use sketchbook_core::params::{ParamSpec, ParamStore};
use sketchbook_core::{
    Frame, FrameClock, Hsba, InputState, Overlay, RenderPrimitive, Sketch, SketchError, Srgb,
    Viewport,
};
use tracing::debug;

/// Horizontal distance between polyline vertices, in pixels.
const SAMPLE_STEP: usize = 5;
/// Spatial frequency of the primary wave.
const PRIMARY_FREQUENCY: f64 = 0.01;
/// Spatial frequency of the secondary wave.
const SECONDARY_FREQUENCY: f64 = 0.02;
/// Secondary wave speed relative to `wave_speed`.
const SECONDARY_SPEED_RATIO: f64 = 0.6;
/// Per-layer phase shift of the primary wave.
const PRIMARY_LAYER_PHASE: f64 = 0.3;
/// Per-layer phase shift of the secondary wave.
const SECONDARY_LAYER_PHASE: f64 = 0.5;
const SATURATION: f64 = 80.0;
const BRIGHTNESS: f64 = 90.0;

/// Recognized options.
pub const PARAM_SPECS: &[ParamSpec] = &[
    ParamSpec::count("num_layers", 10.0, 1.0, 100.0, "Number of wave layers"),
    ParamSpec::number("wave_speed", 0.05, 0.0, 1.0, "Phase advance per frame"),
    ParamSpec::number("wave_amplitude", 80.0, 0.0, 500.0, "Height of the primary wave"),
    ParamSpec::number(
        "secondary_amplitude",
        40.0,
        0.0,
        500.0,
        "Height of the secondary wave",
    ),
    ParamSpec::number("layer_spacing", 30.0, 0.0, 200.0, "Vertical distance between layers"),
    ParamSpec::number("stroke_thickness", 2.0, 0.1, 20.0, "Line thickness"),
    ParamSpec::number("color_start", 180.0, 0.0, 360.0, "Hue of the first layer"),
    ParamSpec::number("color_end", 320.0, 0.0, 360.0, "Hue the last layer approaches"),
];

/// Typed view of the current parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    pub num_layers: usize,
    pub wave_speed: f64,
    pub wave_amplitude: f64,
    pub secondary_amplitude: f64,
    pub layer_spacing: f64,
    pub stroke_thickness: f64,
    pub color_start: f64,
    pub color_end: f64,
}

impl WaveParams {
    pub fn from_store(store: &ParamStore) -> Self {
        Self {
            num_layers: store.count("num_layers"),
            wave_speed: store.number("wave_speed"),
            wave_amplitude: store.number("wave_amplitude"),
            secondary_amplitude: store.number("secondary_amplitude"),
            layer_spacing: store.number("layer_spacing"),
            stroke_thickness: store.number("stroke_thickness"),
            color_start: store.number("color_start"),
            color_end: store.number("color_end"),
        }
    }
}

/// Layered sinusoid polylines.
pub struct Waves {
    viewport: Viewport,
    params: ParamStore,
    time: FrameClock,
}

impl Waves {
    /// Creates the sketch with defaults overridden by `params`.
    pub fn from_json(viewport: Viewport, params: &Value) -> Result<Self, SketchError> {
        let params = ParamStore::from_json(PARAM_SPECS, params)?;
        debug!(
            width = viewport.width(),
            layers = params.count("num_layers"),
            "waves sketch created"
        );
        Ok(Self {
            viewport,
            params,
            time: FrameClock::new(),
        })
    }

    /// Frames drawn so far; the phase input of the sinusoids.
    pub fn time(&self) -> f64 {
        self.time.time()
    }
}

/// Vertical position of `layer` at horizontal position `x` and time `t`.
pub fn wave_height(p: &WaveParams, mid: f64, x: f64, t: f64, layer: usize) -> f64 {
    let i = layer as f64;
    let primary = (x * PRIMARY_FREQUENCY + t * p.wave_speed + i * PRIMARY_LAYER_PHASE).sin()
        * p.wave_amplitude;
    let secondary = (x * SECONDARY_FREQUENCY
        + t * p.wave_speed * SECONDARY_SPEED_RATIO
        + i * SECONDARY_LAYER_PHASE)
        .sin()
        * p.secondary_amplitude;
    mid + primary + secondary + i * p.layer_spacing
}

impl Sketch for Waves {
    fn name(&self) -> &'static str {
        "waves"
    }

    fn step(&mut self, clock: &FrameClock, _input: &InputState) -> Frame {
        let p = WaveParams::from_store(&self.params);
        let t = self.time.time();
        let mid = self.viewport.height() as f64 / 2.0;
        let layers = p.num_layers as f64;

        let mut frame = Frame::new(
            clock.ticks(),
            Some(Overlay::opaque(Srgb::from_rgb8(10, 10, 30))),
        );
        for layer in 0..p.num_layers {
            let hue = lerp(layer as f64, 0.0, layers, p.color_start, p.color_end);
            let vertices = (0..=self.viewport.width())
                .step_by(SAMPLE_STEP)
                .map(|x| {
                    let x = x as f64;
                    DVec2::new(x, wave_height(&p, mid, x, t, layer))
                })
                .collect();
            frame.push(RenderPrimitive::polyline(
                vertices,
                Hsba::opaque(hue, SATURATION, BRIGHTNESS),
                p.stroke_thickness,
            ));
        }

        self.time.advance(1.0);
        frame
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn update_params(&mut self, partial: &Value) -> Result<(), SketchError> {
        self.params.merge(partial).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sketchbook_core::Shape;

    fn waves() -> Waves {
        Waves::from_json(Viewport::default(), &json!({})).unwrap()
    }

    fn tick(sketch: &mut Waves, clock: &mut FrameClock) -> Frame {
        clock.advance(1.0);
        sketch.step(clock, &InputState::default())
    }

    fn vertices(p: &RenderPrimitive) -> &[DVec2] {
        match &p.shape {
            Shape::Polyline { vertices } => vertices,
            other => panic!("expected polyline, got {other:?}"),
        }
    }

    #[test]
    fn one_polyline_per_layer() {
        let mut w = waves();
        let frame = tick(&mut w, &mut FrameClock::new());
        assert_eq!(frame.len(), 10);
        assert!(frame
            .primitives
            .iter()
            .all(|p| matches!(p.shape, Shape::Polyline { .. })));
    }

    #[test]
    fn polyline_spans_viewport_in_fixed_steps() {
        let mut w = waves();
        let frame = tick(&mut w, &mut FrameClock::new());
        let v = vertices(&frame.primitives[0]);
        assert_eq!(v.len(), 800 / SAMPLE_STEP + 1);
        assert!(v[0].x.abs() < f64::EPSILON);
        assert!((v[v.len() - 1].x - 800.0).abs() < f64::EPSILON);
        assert!(v.windows(2).all(|w| (w[1].x - w[0].x - 5.0).abs() < 1e-12));
    }

    #[test]
    fn first_frame_first_vertex_is_centered() {
        let mut w = waves();
        let frame = tick(&mut w, &mut FrameClock::new());
        let v = vertices(&frame.primitives[0]);
        // sin(0) + sin(0) at x = 0, t = 0, layer 0.
        assert!((v[0].y - 300.0).abs() < 1e-12);
    }

    #[test]
    fn layers_are_stacked_by_spacing() {
        let p = WaveParams::from_store(&ParamStore::new(PARAM_SPECS));
        let flat = WaveParams {
            wave_amplitude: 0.0,
            secondary_amplitude: 0.0,
            ..p
        };
        for layer in 0..5 {
            let y = wave_height(&flat, 300.0, 123.0, 9.0, layer);
            assert!((y - (300.0 + layer as f64 * 30.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn hue_runs_from_color_start() {
        let mut w = waves();
        let frame = tick(&mut w, &mut FrameClock::new());
        assert!((frame.primitives[0].color.hue - 180.0).abs() < 1e-12);
        // Last layer stops one step short of color_end.
        let last = frame.primitives[9].color.hue;
        assert!((last - (180.0 + 9.0 * 14.0)).abs() < 1e-9);
    }

    #[test]
    fn stroke_weight_follows_parameter() {
        let mut w = waves();
        w.update_params(&json!({"stroke_thickness": 4.5})).unwrap();
        let frame = tick(&mut w, &mut FrameClock::new());
        assert!(frame.primitives.iter().all(|p| p.stroke_weight == Some(4.5)));
    }

    #[test]
    fn time_advances_once_per_step_and_moves_waves() {
        let mut w = waves();
        let mut clock = FrameClock::new();
        let a = tick(&mut w, &mut clock);
        let b = tick(&mut w, &mut clock);
        assert!((w.time() - 2.0).abs() < f64::EPSILON);
        assert_ne!(vertices(&a.primitives[0]), vertices(&b.primitives[0]));
    }

    #[test]
    fn zero_speed_freezes_waves() {
        let mut w = Waves::from_json(Viewport::default(), &json!({"wave_speed": 0.0})).unwrap();
        let mut clock = FrameClock::new();
        let a = tick(&mut w, &mut clock);
        let b = tick(&mut w, &mut clock);
        assert_eq!(a.primitives, b.primitives);
    }

    #[test]
    fn layer_count_update_applies_next_frame() {
        let mut w = waves();
        w.update_params(&json!({"num_layers": 3})).unwrap();
        let frame = tick(&mut w, &mut FrameClock::new());
        assert_eq!(frame.len(), 3);
    }

    #[test]
    fn invalid_update_is_rejected_atomically() {
        let mut w = waves();
        let err = w
            .update_params(&json!({"wave_speed": 0.2, "num_layers": 0}))
            .unwrap_err();
        assert!(matches!(err, SketchError::InvalidParameter { .. }));
        assert!((w.params().number("wave_speed") - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn overlay_is_opaque_background() {
        let mut w = waves();
        let frame = tick(&mut w, &mut FrameClock::new());
        let overlay = frame.overlay.unwrap();
        assert_eq!(overlay.color.to_hex(), "#0a0a1e");
        assert!((overlay.alpha - 255.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stateless_sketch_reports_no_population() {
        let w = waves();
        assert_eq!(w.population(), 0);
        assert!(w.verify().is_ok());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn vertices_always_finite(
                layers in 1_u64..20,
                speed in 0.0_f64..1.0,
                amp in 0.0_f64..500.0,
                frames in 1_usize..20,
            ) {
                let mut w = Waves::from_json(
                    Viewport::new(200, 100).unwrap(),
                    &json!({"num_layers": layers, "wave_speed": speed, "wave_amplitude": amp}),
                ).unwrap();
                let mut clock = FrameClock::new();
                let mut last = None;
                for _ in 0..frames {
                    last = Some(tick(&mut w, &mut clock));
                }
                let frame = last.unwrap();
                prop_assert_eq!(frame.len() as u64, layers);
                for p in &frame.primitives {
                    prop_assert!(vertices(p).iter().all(|v| v.is_finite()));
                }
            }
        }
    }
}
