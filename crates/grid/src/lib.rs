#![deny(unsafe_code)]
//! Noise grid sketch.
//!
//! A fixed `cols` × `rows` lattice of square cells. Each cell draws one
//! rotated rounded square whose size and rotation come from a 3D noise
//! sample at `(col * noise_scale, row * noise_scale, time * time_speed)`.
//! Hue follows the cell's distance to the pointer. There is no entity
//! population; the only state is the time counter and the cell size.

use glam::DVec2;
use serde_json::Value;
use sketchbook_core::gradient::lerp;
use sketchbook_core::params::{ParamSpec, ParamStore};
use sketchbook_core::{
    Frame, FrameClock, Hsba, InputState, NoiseField, Overlay, RenderPrimitive, Sketch,
    SketchError, Srgb, Viewport,
};
use std::f64::consts::TAU;
use tracing::debug;

/// Gap kept between the largest square and its cell edge.
const CELL_MARGIN: f64 = 5.0;
/// Hue of cells one viewport width or more from the pointer. Must stay
/// below 360, which `Hsba` wraps to 0.
const FAR_HUE: f64 = 359.0;

/// Recognized options.
pub const PARAM_SPECS: &[ParamSpec] = &[
    ParamSpec::count("cols", 20.0, 1.0, 200.0, "Number of grid columns"),
    ParamSpec::count("rows", 15.0, 1.0, 200.0, "Number of grid rows"),
    ParamSpec::number("noise_scale", 0.1, 0.0, 2.0, "Noise frequency; lower is smoother"),
    ParamSpec::number("time_speed", 0.01, 0.0, 1.0, "Noise drift per frame"),
    ParamSpec::number("rotation_speed", 0.01, 0.0, 1.0, "Base rotation per frame, in radians"),
    ParamSpec::number("min_size", 10.0, 0.0, 200.0, "Smallest square size"),
    ParamSpec::number("saturation", 70.0, 0.0, 100.0, "Color saturation"),
    ParamSpec::number("brightness", 90.0, 0.0, 100.0, "Color brightness"),
    ParamSpec::number("corner_radius", 5.0, 0.0, 50.0, "Corner rounding; zero is sharp"),
];

/// Typed view of the current parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub cols: usize,
    pub rows: usize,
    pub noise_scale: f64,
    pub time_speed: f64,
    pub rotation_speed: f64,
    pub min_size: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub corner_radius: f64,
}

impl GridParams {
    pub fn from_store(store: &ParamStore) -> Self {
        Self {
            cols: store.count("cols"),
            rows: store.count("rows"),
            noise_scale: store.number("noise_scale"),
            time_speed: store.number("time_speed"),
            rotation_speed: store.number("rotation_speed"),
            min_size: store.number("min_size"),
            saturation: store.number("saturation"),
            brightness: store.number("brightness"),
            corner_radius: store.number("corner_radius"),
        }
    }
}

/// Side length of one cell: the viewport width split evenly across columns.
pub fn cell_size(viewport: &Viewport, cols: usize) -> f64 {
    viewport.width() as f64 / cols.max(1) as f64
}

/// Rotating noise-driven squares.
pub struct Grid {
    viewport: Viewport,
    params: ParamStore,
    noise: NoiseField,
    cell_size: f64,
    time: FrameClock,
}

impl Grid {
    /// Creates the sketch with defaults overridden by `params`. The low 32
    /// bits of `seed` select the noise permutation.
    pub fn from_json(viewport: Viewport, seed: u64, params: &Value) -> Result<Self, SketchError> {
        let params = ParamStore::from_json(PARAM_SPECS, params)?;
        let cell_size = cell_size(&viewport, params.count("cols"));
        debug!(cell_size, seed, "grid sketch created");
        Ok(Self {
            viewport,
            params,
            noise: NoiseField::new(seed as u32),
            cell_size,
            time: FrameClock::new(),
        })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Frames drawn so far.
    pub fn time(&self) -> f64 {
        self.time.time()
    }

    /// Center of cell `(col, row)`.
    pub fn cell_center(&self, col: usize, row: usize) -> DVec2 {
        let half = self.cell_size / 2.0;
        DVec2::new(
            col as f64 * self.cell_size + half,
            row as f64 * self.cell_size + half,
        )
    }
}

impl Sketch for Grid {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn step(&mut self, clock: &FrameClock, input: &InputState) -> Frame {
        let p = GridParams::from_store(&self.params);
        let t = self.time.time();
        let width = self.viewport.width() as f64;
        let max_size = self.cell_size - CELL_MARGIN;

        let mut frame = Frame::new(clock.ticks(), Some(Overlay::opaque(Srgb::from_rgb8(0, 0, 0))));
        for col in 0..p.cols {
            for row in 0..p.rows {
                let center = self.cell_center(col, row);
                let n = self.noise.sample(
                    col as f64 * p.noise_scale,
                    row as f64 * p.noise_scale,
                    t * p.time_speed,
                );
                let size = lerp(n, 0.0, 1.0, p.min_size, max_size).max(0.0);
                let hue = lerp(center.distance(input.pointer), 0.0, width, 0.0, 360.0).min(FAR_HUE);
                let rotation = n * TAU + t * p.rotation_speed;
                frame.push(RenderPrimitive::rect(
                    center,
                    size,
                    rotation,
                    p.corner_radius,
                    Hsba::opaque(hue, p.saturation, p.brightness),
                ));
            }
        }

        self.time.advance(1.0);
        frame
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn update_params(&mut self, partial: &Value) -> Result<(), SketchError> {
        let update = self.params.merge(partial)?;
        if update.contains("cols") || update.contains("rows") {
            self.cell_size = cell_size(&self.viewport, self.params.count("cols"));
            debug!(cell_size = self.cell_size, "grid cell size recomputed");
        }
        Ok(())
    }
}
