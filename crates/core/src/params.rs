//! Parameter Store: a fixed table of named numeric options with validated,
//! all-or-nothing merge updates.
//!
//! Each sketch declares its options as a static slice of [`ParamSpec`]. The
//! store starts from the declared defaults and is only ever changed through a
//! [`ParamUpdate`], which is produced by validating a partial JSON object (or
//! a list of key/value pairs) against the table. Validation either accepts
//! every key in the partial or rejects the whole thing, so a store never holds
//! a half-applied update.

use crate::error::SketchError;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// How a parameter's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Any finite number, clamped into `[min, max]`.
    Number,
    /// A positive integer (array length, grid dimension, capacity).
    Count,
}

impl ParamKind {
    /// Type name used in the JSON schema.
    pub fn type_name(self) -> &'static str {
        match self {
            ParamKind::Number => "number",
            ParamKind::Count => "integer",
        }
    }
}

/// Declaration of one recognized option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub description: &'static str,
}

impl ParamSpec {
    /// Declares a finite numeric option.
    pub const fn number(
        name: &'static str,
        default: f64,
        min: f64,
        max: f64,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind: ParamKind::Number,
            default,
            min,
            max,
            description,
        }
    }

    /// Declares a positive integer option.
    pub const fn count(
        name: &'static str,
        default: f64,
        min: f64,
        max: f64,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind: ParamKind::Count,
            default,
            min,
            max,
            description,
        }
    }

    /// Checks a raw value against this declaration and clamps it into range.
    pub fn validate(&self, raw: f64) -> Result<f64, SketchError> {
        if !raw.is_finite() {
            return Err(SketchError::invalid_param(
                self.name,
                format!("expected a finite number, got {raw}"),
            ));
        }
        if self.kind == ParamKind::Count && (raw.fract() != 0.0 || raw < 1.0) {
            return Err(SketchError::invalid_param(
                self.name,
                format!("expected a positive integer, got {raw}"),
            ));
        }
        Ok(raw.clamp(self.min, self.max))
    }

    fn validate_json(&self, value: &Value) -> Result<f64, SketchError> {
        let raw = value.as_f64().ok_or_else(|| {
            SketchError::invalid_param(self.name, format!("expected a number, got {value}"))
        })?;
        self.validate(raw)
    }
}

/// A validated partial update, ready to be applied to the store it was
/// prepared against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamUpdate {
    values: Vec<(&'static str, f64)>,
}

impl ParamUpdate {
    /// Whether the update touches `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.iter().any(|(k, _)| *k == key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    fn insert(&mut self, key: &'static str, value: f64) {
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
    }
}

/// Named configuration for one sketch.
///
/// Every declared key always holds a finite value: defaults are finite and
/// every merge goes through [`ParamSpec::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParamStore {
    specs: &'static [ParamSpec],
    values: BTreeMap<&'static str, f64>,
}

impl ParamStore {
    /// Creates a store holding the default of every declared option.
    pub fn new(specs: &'static [ParamSpec]) -> Self {
        let values = specs.iter().map(|s| (s.name, s.default)).collect();
        Self { specs, values }
    }

    /// Creates a store from defaults overridden by a partial JSON object.
    pub fn from_json(specs: &'static [ParamSpec], overrides: &Value) -> Result<Self, SketchError> {
        let mut store = Self::new(specs);
        store.merge(overrides)?;
        Ok(store)
    }

    /// The option table this store was built from.
    pub fn specs(&self) -> &'static [ParamSpec] {
        self.specs
    }

    /// Current value of `key`, or `None` if the key is not declared.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Current value of a declared numeric option.
    ///
    /// Undeclared keys read as `0.0`; sketches only ask for keys in their
    /// own table.
    pub fn number(&self, key: &str) -> f64 {
        debug_assert!(self.values.contains_key(key), "undeclared parameter {key}");
        self.get(key).unwrap_or(0.0)
    }

    /// Current value of a declared count option.
    pub fn count(&self, key: &str) -> usize {
        self.number(key) as usize
    }

    /// Validates a partial JSON object without touching the store.
    pub fn prepare(&self, partial: &Value) -> Result<ParamUpdate, SketchError> {
        let object = partial.as_object().ok_or_else(|| {
            SketchError::invalid_param("<root>", format!("expected a JSON object, got {partial}"))
        })?;
        let mut update = ParamUpdate::default();
        for (key, value) in object {
            let spec = self.spec(key)?;
            update.insert(spec.name, spec.validate_json(value)?);
        }
        Ok(update)
    }

    /// Applies a prepared update. Keys not in the update are left untouched.
    pub fn apply(&mut self, update: &ParamUpdate) {
        for &(key, value) in &update.values {
            self.values.insert(key, value);
        }
    }

    /// Validates and applies a partial JSON object in one step.
    ///
    /// On error the store is unchanged. On success the applied update is
    /// returned so the caller can recompute state derived from specific keys.
    pub fn merge(&mut self, partial: &Value) -> Result<ParamUpdate, SketchError> {
        let update = self.prepare(partial)?;
        self.apply(&update);
        debug!(keys = update.len(), "parameters merged");
        Ok(update)
    }

    /// Current values as a JSON object. Count options serialize as integers.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .specs
            .iter()
            .map(|spec| {
                let v = self.number(spec.name);
                let value = match spec.kind {
                    ParamKind::Number => json!(v),
                    ParamKind::Count => json!(v as u64),
                };
                (spec.name.to_owned(), value)
            })
            .collect();
        Value::Object(map)
    }

    /// Schema describing every option: type, default, range, description.
    pub fn schema(&self) -> Value {
        let map: Map<String, Value> = self
            .specs
            .iter()
            .map(|spec| {
                (
                    spec.name.to_owned(),
                    json!({
                        "type": spec.kind.type_name(),
                        "default": spec.default,
                        "min": spec.min,
                        "max": spec.max,
                        "description": spec.description,
                    }),
                )
            })
            .collect();
        Value::Object(map)
    }

    fn spec(&self, key: &str) -> Result<&'static ParamSpec, SketchError> {
        self.specs
            .iter()
            .find(|s| s.name == key)
            .ok_or_else(|| SketchError::invalid_param(key, "not a recognized option"))
    }
}
