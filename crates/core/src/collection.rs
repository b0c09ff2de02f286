//! Bounded Dynamic Collection: a capacity-limited, age-ordered container of
//! [`Entity`] values with FIFO eviction.
//!
//! Index 0 is always the oldest entity and the last index the newest;
//! sketches use that order to build age gradients when rendering. The
//! length never exceeds the capacity after any public call returns.

use crate::entity::{self, Entity, UpdatePolicy};
use crate::error::SketchError;
use std::collections::VecDeque;

/// When a collection creates a new entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    /// One entity every tick.
    Always,
    /// One entity on ticks where `tick % interval == 0`. An interval of zero
    /// never fires.
    RateGated { interval: u64 },
}

impl SpawnPolicy {
    /// Whether this policy spawns on `tick`.
    pub fn fires(&self, tick: u64) -> bool {
        match *self {
            SpawnPolicy::Always => true,
            SpawnPolicy::RateGated { interval } => interval != 0 && tick % interval == 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundedCollection {
    entities: VecDeque<Entity>,
    capacity: usize,
}

impl BoundedCollection {
    pub fn new(capacity: usize) -> Self {
        Self {
            entities: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Changes the capacity, dropping the oldest entities if the collection
    /// is now over it. Returns how many were dropped.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity;
        let excess = self.entities.len().saturating_sub(capacity);
        self.entities.drain(..excess);
        excess
    }

    /// Appends `entity` as the newest element, then evicts.
    ///
    /// Returns the entity that no longer fits: the evicted oldest one, or
    /// `entity` itself when the capacity is zero.
    pub fn push(&mut self, entity: Entity) -> Option<Entity> {
        if self.capacity == 0 {
            return Some(entity);
        }
        self.entities.push_back(entity);
        self.evict()
    }

    /// Spawns one entity built by `make` if `policy` fires on `tick`.
    ///
    /// `make` is only called when the policy fires and the capacity is
    /// non-zero. Returns a copy of the spawned entity.
    pub fn spawn<F>(&mut self, policy: SpawnPolicy, tick: u64, make: F) -> Option<Entity>
    where
        F: FnOnce() -> Entity,
    {
        if self.capacity == 0 || !policy.fires(tick) {
            return None;
        }
        let entity = make();
        self.push(entity);
        Some(entity)
    }

    /// Removes the oldest entity if the collection is over capacity.
    pub fn evict(&mut self) -> Option<Entity> {
        if self.entities.len() > self.capacity {
            self.entities.pop_front()
        } else {
            None
        }
    }

    /// Applies `policy` to every entity.
    pub fn update(&mut self, policy: &UpdatePolicy, dt: f64) {
        for e in self.entities.iter_mut() {
            entity::update(e, policy, dt);
        }
    }

    /// Removes every entity matching `is_dead`, keeping the survivors in
    /// age order. Returns how many were removed.
    pub fn remove_dead<P>(&mut self, mut is_dead: P) -> usize
    where
        P: FnMut(&Entity) -> bool,
    {
        let before = self.entities.len();
        self.entities.retain(|e| !is_dead(e));
        before - self.entities.len()
    }

    /// Oldest-first iterator over the current entities.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Entity> + ExactSizeIterator + '_ {
        self.entities.iter()
    }

    /// Owned copy of the entities in age order.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.entities.iter().copied().collect()
    }

    /// Checks the capacity invariant.
    pub fn verify(&self) -> Result<(), SketchError> {
        if self.entities.len() > self.capacity {
            return Err(SketchError::CapacityViolation {
                len: self.entities.len(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
