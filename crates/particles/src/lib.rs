#![deny(unsafe_code)]
//! Particle field sketch.
//!
//! Every `spawn_rate` ticks a particle is emitted at the pointer with a
//! random velocity, size and pastel color. Each tick all particles move,
//! fade by `fade_speed`, and are pulled toward the pointer when within
//! `attraction_radius`; faded particles are removed. The population lives
//! in a [`BoundedCollection`] capped at `max_particles`.
//!
//! The pull is proportional to distance (a spring without damping), so a
//! large `attraction_strength` sends particles into growing oscillations.
//! The strength is clamped at validation to keep that in check.

use glam::DVec2;
use serde_json::Value;
use sketchbook_core::entity::is_faded;
use sketchbook_core::params::{ParamSpec, ParamStore};
use sketchbook_core::{
    Attraction, BoundedCollection, Entity, Frame, FrameClock, Hsba, InputState, Overlay,
    RenderPrimitive, Sketch, SketchError, SpawnPolicy, Srgb, UpdatePolicy, Xorshift64,
};
use tracing::{debug, trace};

/// Tick length handed to the physics update.
const TICK: f64 = 1.0;
/// Hue range of spawned particles (pinks, purples, lavenders).
const HUE_RANGE: (f64, f64) = (240.0, 360.0);
const SATURATION_RANGE: (f64, f64) = (20.0, 60.0);
const BRIGHTNESS_RANGE: (f64, f64) = (80.0, 100.0);

/// Recognized options.
pub const PARAM_SPECS: &[ParamSpec] = &[
    ParamSpec::count("spawn_rate", 2.0, 1.0, 120.0, "Spawn one particle every N frames"),
    ParamSpec::number("fade_speed", 2.0, 0.0, 255.0, "Alpha lost per frame"),
    ParamSpec::number(
        "attraction_radius",
        200.0,
        0.0,
        2000.0,
        "Distance within which the pointer attracts",
    ),
    ParamSpec::number(
        "attraction_strength",
        0.0001,
        0.0,
        0.01,
        "Velocity gained per pixel of distance to the pointer",
    ),
    ParamSpec::number("velocity_range", 2.0, 0.0, 20.0, "Maximum initial speed per axis"),
    ParamSpec::number("min_size", 3.0, 0.0, 100.0, "Smallest particle diameter"),
    ParamSpec::number("max_size", 8.0, 0.0, 100.0, "Largest particle diameter"),
    ParamSpec::number("trail_alpha", 25.0, 0.0, 255.0, "Background alpha; lower leaves longer trails"),
    ParamSpec::count("max_particles", 1000.0, 1.0, 100_000.0, "Most particles alive at once"),
];

/// Typed view of the current parameter values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleParams {
    pub spawn_rate: u64,
    pub fade_speed: f64,
    pub attraction_radius: f64,
    pub attraction_strength: f64,
    pub velocity_range: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub trail_alpha: f64,
    pub max_particles: usize,
}

impl ParticleParams {
    pub fn from_store(store: &ParamStore) -> Self {
        Self {
            spawn_rate: store.count("spawn_rate") as u64,
            fade_speed: store.number("fade_speed"),
            attraction_radius: store.number("attraction_radius"),
            attraction_strength: store.number("attraction_strength"),
            velocity_range: store.number("velocity_range"),
            min_size: store.number("min_size"),
            max_size: store.number("max_size"),
            trail_alpha: store.number("trail_alpha"),
            max_particles: store.count("max_particles"),
        }
    }
}

/// Builds a fresh particle at `at` with randomized velocity, size and color.
pub fn spawn_particle(rng: &mut Xorshift64, at: DVec2, p: &ParticleParams) -> Entity {
    let velocity = DVec2::new(
        rng.next_signed(p.velocity_range),
        rng.next_signed(p.velocity_range),
    );
    let size = rng.next_range(p.min_size, p.max_size);
    let color = Hsba::opaque(
        rng.next_range(HUE_RANGE.0, HUE_RANGE.1),
        rng.next_range(SATURATION_RANGE.0, SATURATION_RANGE.1),
        rng.next_range(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1),
    );
    Entity::at(at, size, color).with_velocity(velocity)
}

/// Fading, pointer-attracted particles.
pub struct Particles {
    params: ParamStore,
    particles: BoundedCollection,
    rng: Xorshift64,
}

impl Particles {
    /// Creates the sketch with defaults overridden by `params`.
    pub fn from_json(seed: u64, params: &Value) -> Result<Self, SketchError> {
        let params = ParamStore::from_json(PARAM_SPECS, params)?;
        let capacity = params.count("max_particles");
        debug!(capacity, seed, "particles sketch created");
        Ok(Self {
            params,
            particles: BoundedCollection::new(capacity),
            rng: Xorshift64::new(seed),
        })
    }

    /// Live particles, oldest first.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.particles.snapshot()
    }
}

impl Sketch for Particles {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn step(&mut self, clock: &FrameClock, input: &InputState) -> Frame {
        let p = ParticleParams::from_store(&self.params);
        let pointer = input.pointer;

        let rng = &mut self.rng;
        self.particles.spawn(
            SpawnPolicy::RateGated {
                interval: p.spawn_rate,
            },
            clock.ticks(),
            || spawn_particle(rng, pointer, &p),
        );

        let physics = UpdatePolicy::Physics {
            attraction: Attraction {
                attractor: pointer,
                radius: p.attraction_radius,
                strength: p.attraction_strength,
            },
            fade: p.fade_speed,
        };
        self.particles.update(&physics, TICK);
        let died = self.particles.remove_dead(is_faded);
        trace!(
            tick = clock.ticks(),
            alive = self.particles.len(),
            died,
            "particles stepped"
        );

        let mut frame = Frame::new(
            clock.ticks(),
            Some(Overlay::translucent(Srgb::from_rgb8(20, 20, 40), p.trail_alpha)),
        );
        for e in self.particles.iter() {
            frame.push(RenderPrimitive::point(e.position, e.size, e.render_color()));
        }
        frame
    }

    fn params(&self) -> &ParamStore {
        &self.params
    }

    fn update_params(&mut self, partial: &Value) -> Result<(), SketchError> {
        let update = self.params.merge(partial)?;
        if update.contains("max_particles") {
            let capacity = self.params.count("max_particles");
            let dropped = self.particles.set_capacity(capacity);
            debug!(capacity, dropped, "particle capacity changed");
        }
        Ok(())
    }

    fn population(&self) -> usize {
        self.particles.len()
    }

    fn verify(&self) -> Result<(), SketchError> {
        self.particles.verify()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn particles(params: Value) -> Particles {
        Particles::from_json(42, &params).unwrap()
    }

    fn run(sketch: &mut Particles, clock: &mut FrameClock, input: &InputState, n: usize) -> Frame {
        let mut frame = Frame::new(0, None);
        for _ in 0..n {
            clock.advance(1.0);
            frame = sketch.step(clock, input);
        }
        frame
    }

    #[test]
    fn spawns_only_on_multiples_of_spawn_rate() {
        let mut s = particles(json!({"spawn_rate": 3, "fade_speed": 0}));
        let mut clock = FrameClock::new();
        let input = InputState::at(100.0, 100.0);
        let counts: Vec<usize> = (0..6)
            .map(|_| {
                run(&mut s, &mut clock, &input, 1);
                s.population()
            })
            .collect();
        assert_eq!(counts, vec![0, 0, 1, 1, 1, 2]);
    }

    #[test]
    fn motionless_particle_spawns_at_pointer() {
        let mut s = particles(json!({"spawn_rate": 1, "fade_speed": 0, "velocity_range": 0}));
        let mut clock = FrameClock::new();
        run(&mut s, &mut clock, &InputState::at(250.0, 125.0), 1);
        let snap = s.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].position, DVec2::new(250.0, 125.0));
        assert_eq!(snap[0].velocity, DVec2::ZERO);
    }

    #[test]
    fn full_fade_removes_particle_on_its_first_tick() {
        let mut s = particles(json!({"spawn_rate": 1, "fade_speed": 255}));
        let mut clock = FrameClock::new();
        for _ in 0..5 {
            let frame = run(&mut s, &mut clock, &InputState::at(10.0, 10.0), 1);
            assert!(frame.is_empty());
            assert!(s.snapshot().is_empty());
        }
    }

    #[test]
    fn alpha_never_increases_and_dead_particle_disappears() {
        let mut s = particles(json!({"spawn_rate": 100, "fade_speed": 10}));
        let mut clock = FrameClock::new();
        let input = InputState::at(400.0, 300.0);
        run(&mut s, &mut clock, &input, 100);
        assert_eq!(s.population(), 1);
        let mut last_alpha = s.snapshot()[0].alpha;
        assert!((last_alpha - 245.0).abs() < 1e-9);

        let mut ticks_alive = 0;
        while s.population() == 1 {
            run(&mut s, &mut clock, &input, 1);
            if let Some(e) = s.snapshot().first() {
                assert!(e.alpha <= last_alpha);
                assert!(e.alpha > 0.0);
                last_alpha = e.alpha;
            }
            ticks_alive += 1;
            assert!(ticks_alive < 100, "particle never died");
        }
        assert_eq!(ticks_alive, 25);
    }

    #[test]
    fn pointer_within_radius_pulls_particle_closer() {
        let mut s = particles(json!({
            "spawn_rate": 1,
            "fade_speed": 0,
            "velocity_range": 0,
            "attraction_strength": 0.01,
            "attraction_radius": 500,
            "max_particles": 1,
        }));
        let mut clock = FrameClock::new();
        run(&mut s, &mut clock, &InputState::at(0.0, 0.0), 1);
        // Capacity 1 keeps replacing the particle; stop spawning first.
        s.update_params(&json!({"spawn_rate": 120})).unwrap();
        let target = DVec2::new(100.0, 0.0);
        let start = s.snapshot()[0].position;
        run(&mut s, &mut clock, &InputState::at(target.x, target.y), 5);
        let end = s.snapshot()[0].position;
        assert!((target - end).length() < (target - start).length());
    }

    #[test]
    fn pointer_outside_radius_leaves_velocity_alone() {
        let mut s = particles(json!({
            "spawn_rate": 1,
            "fade_speed": 0,
            "velocity_range": 0,
            "attraction_strength": 0.01,
            "attraction_radius": 50,
        }));
        let mut clock = FrameClock::new();
        run(&mut s, &mut clock, &InputState::at(0.0, 0.0), 1);
        s.update_params(&json!({"spawn_rate": 120})).unwrap();
        run(&mut s, &mut clock, &InputState::at(500.0, 500.0), 3);
        assert_eq!(s.snapshot()[0].velocity, DVec2::ZERO);
    }

    #[test]
    fn population_capped_by_max_particles() {
        let mut s = particles(json!({"spawn_rate": 1, "fade_speed": 0, "max_particles": 3}));
        let mut clock = FrameClock::new();
        run(&mut s, &mut clock, &InputState::default(), 10);
        assert_eq!(s.population(), 3);
        assert!(s.verify().is_ok());
    }

    #[test]
    fn lowering_max_particles_truncates_during_merge() {
        let mut s = particles(json!({"spawn_rate": 1, "fade_speed": 0}));
        let mut clock = FrameClock::new();
        run(&mut s, &mut clock, &InputState::default(), 10);
        assert_eq!(s.population(), 10);
        s.update_params(&json!({"max_particles": 4})).unwrap();
        assert_eq!(s.population(), 4);
    }

    #[test]
    fn one_point_per_particle_with_particle_alpha() {
        let mut s = particles(json!({"spawn_rate": 1, "fade_speed": 1}));
        let mut clock = FrameClock::new();
        let frame = run(&mut s, &mut clock, &InputState::at(50.0, 50.0), 6);
        assert_eq!(frame.len(), 6);
        for (p, e) in frame.primitives.iter().zip(s.snapshot()) {
            assert!((p.color.alpha - e.alpha).abs() < 1e-12);
            assert!(matches!(p.shape, sketchbook_core::Shape::Point { .. }));
        }
    }

    #[test]
    fn spawned_colors_and_sizes_within_ranges() {
        let mut rng = Xorshift64::new(9);
        let p = ParticleParams::from_store(&ParamStore::new(PARAM_SPECS));
        for _ in 0..200 {
            let e = spawn_particle(&mut rng, DVec2::ZERO, &p);
            assert!((3.0..=8.0).contains(&e.size));
            assert!(e.velocity.x.abs() <= 2.0 && e.velocity.y.abs() <= 2.0);
            assert!(e.color.hue >= 240.0 || e.color.hue < 1e-9);
            assert!((20.0..=60.0).contains(&e.color.saturation));
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let mut a = particles(json!({"spawn_rate": 1}));
        let mut b = particles(json!({"spawn_rate": 1}));
        let input = InputState::at(300.0, 200.0);
        let fa = run(&mut a, &mut FrameClock::new(), &input, 30);
        let fb = run(&mut b, &mut FrameClock::new(), &input, 30);
        assert_eq!(fa, fb);
    }

    #[test]
    fn overlay_alpha_follows_trail_alpha() {
        let mut s = particles(json!({"trail_alpha": 60}));
        let frame = run(&mut s, &mut FrameClock::new(), &InputState::default(), 1);
        assert!((frame.overlay.unwrap().alpha - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn attraction_strength_is_clamped() {
        let mut s = particles(json!({}));
        s.update_params(&json!({"attraction_strength": 5.0})).unwrap();
        assert!((s.params().number("attraction_strength") - 0.01).abs() < f64::EPSILON);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn population_never_exceeds_capacity_and_all_alive(
                seed: u64,
                spawn_rate in 1_u64..4,
                fade in 0.0_f64..50.0,
                cap in 1_u64..20,
                frames in 1_usize..80,
                px in 0.0_f64..800.0,
                py in 0.0_f64..600.0,
            ) {
                let mut s = Particles::from_json(
                    seed,
                    &json!({"spawn_rate": spawn_rate, "fade_speed": fade, "max_particles": cap}),
                ).unwrap();
                let mut clock = FrameClock::new();
                let input = InputState::at(px, py);
                for _ in 0..frames {
                    clock.advance(1.0);
                    let frame = s.step(&clock, &input);
                    prop_assert!(s.population() as u64 <= cap);
                    prop_assert_eq!(frame.len(), s.population());
                    prop_assert!(s.snapshot().iter().all(|e| e.alpha > 0.0));
                    prop_assert!(s.verify().is_ok());
                }
            }
        }
    }
}
