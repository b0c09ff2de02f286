#![deny(unsafe_code)]
//! Core types and traits for the sketchbook animation engine.
//!
//! Provides the `Sketch` and `Renderer` traits, the `ParamStore`, the
//! `FrameClock`, the age-ordered `BoundedCollection` with its spawn and
//! update policies, the noise and gradient samplers, render primitives,
//! colors, and the `Xorshift64` PRNG.

pub mod clock;
pub mod collection;
pub mod color;
pub mod entity;
pub mod error;
pub mod gradient;
pub mod input;
pub mod noise_field;
pub mod params;
pub mod primitive;
pub mod prng;
pub mod run_spec;
pub mod sketch;
pub mod viewport;

pub use clock::FrameClock;
pub use collection::{BoundedCollection, SpawnPolicy};
pub use color::{Hsba, Srgb};
pub use entity::{Attraction, Entity, UpdatePolicy};
pub use error::SketchError;
pub use input::InputState;
pub use noise_field::NoiseField;
pub use params::{ParamSpec, ParamStore, ParamUpdate};
pub use primitive::{Frame, Overlay, RenderPrimitive, Shape};
pub use prng::Xorshift64;
pub use run_spec::RunSpec;
pub use sketch::{Renderer, Sketch};
pub use viewport::Viewport;
