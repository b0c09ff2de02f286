//! Entities and the per-tick update rules applied to them.
//!
//! An [`Entity`] is a plain record: position, velocity, alpha, size, color.
//! Behavior lives in free functions selected by an [`UpdatePolicy`], so a
//! [`BoundedCollection`](crate::collection::BoundedCollection) can treat
//! particles, spiral points and trail points the same way.

use crate::color::{Hsba, ALPHA_OPAQUE};
use glam::DVec2;
use serde::Serialize;

/// A single visual element owned by one collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Entity {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Opacity in [0, 255]. Fading entities may dip to or below zero for the
    /// tick on which they die.
    pub alpha: f64,
    pub size: f64,
    /// Hue, saturation and brightness. The color's own alpha is ignored in
    /// favor of [`Entity::alpha`].
    pub color: Hsba,
}

impl Entity {
    /// A motionless, fully opaque entity.
    pub fn at(position: DVec2, size: f64, color: Hsba) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            alpha: ALPHA_OPAQUE,
            size,
            color,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Color to draw with: the stored hue/saturation/brightness at the
    /// entity's current alpha.
    pub fn render_color(&self) -> Hsba {
        self.color.with_alpha(self.alpha)
    }
}

/// Death predicate for fading entities.
pub fn is_faded(entity: &Entity) -> bool {
    entity.alpha <= 0.0
}

/// Pull toward an external point, active only inside `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    pub attractor: DVec2,
    pub radius: f64,
    /// Force per unit distance. The force grows with distance rather than
    /// falling off, so large strengths make entities overshoot and diverge.
    pub strength: f64,
}

/// How a collection mutates its entities each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdatePolicy {
    /// Integrate velocity, fade alpha, then apply attraction.
    Physics { attraction: Attraction, fade: f64 },
    /// Move geometrically toward `target` by `amount` of the remaining gap.
    Smoothing { target: DVec2, amount: f64 },
    /// Entries never change after they are pushed.
    Static,
}

/// Applies `policy` to one entity for a tick of length `dt`.
pub fn update(entity: &mut Entity, policy: &UpdatePolicy, dt: f64) {
    match *policy {
        UpdatePolicy::Physics { attraction, fade } => integrate(entity, &attraction, fade, dt),
        UpdatePolicy::Smoothing { target, amount } => {
            entity.position = smooth_toward(entity.position, target, amount, dt);
        }
        UpdatePolicy::Static => {}
    }
}

/// Physics step: move, fade, then accelerate toward the attractor when it is
/// closer than `attraction.radius`.
pub fn integrate(entity: &mut Entity, attraction: &Attraction, fade: f64, dt: f64) {
    entity.position += entity.velocity * dt;
    entity.alpha -= fade.max(0.0) * dt;

    let offset = attraction.attractor - entity.position;
    if offset.length() < attraction.radius {
        entity.velocity += offset * attraction.strength * dt;
    }
}

/// Exponential smoothing: `position + (target - position) * amount`.
///
/// For `dt != 1` the per-tick factor is compounded so that two half ticks
/// land where one full tick would.
pub fn smooth_toward(position: DVec2, target: DVec2, amount: f64, dt: f64) -> DVec2 {
    let t = if dt == 1.0 {
        amount
    } else {
        1.0 - (1.0 - amount).powf(dt)
    };
    position + (target - position) * t
}
