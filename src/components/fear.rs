//! The ghost's fear gauge.
//!
//! Fear is a bounded scalar in `[0, max]`. Phasing and possession are gated
//! by it and consume it; every mutation clamps both ends, so no sequence of
//! calls can push the value out of range.
//!
//! Callers poll [`Fear::is_empty`] after draining to decide whether a
//! dependent state (phasing, possessing) has to be forced off.
//!
//! The value is accumulated in `f64` so a long run of per-frame drains lands
//! on zero after exactly `value / (rate * dt)` frames instead of leaving a
//! rounding residue that keeps the gauge alive for one more frame. Whatever
//! residue is left below [`EMPTY_EPSILON`] of the capacity counts as empty.

use bevy_ecs::prelude::Component;

/// Fraction of `max` below which a drained gauge snaps to zero.
pub const EMPTY_EPSILON: f64 = 1e-5;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Fear {
    value: f64,
    max: f32,
}

impl Fear {
    /// Gauge with `value` clamped into `[0, max]`. A negative `max` is treated as zero.
    pub fn new(value: f32, max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            value: f64::from(value.clamp(0.0, max)),
            max,
        }
    }

    pub fn full(max: f32) -> Self {
        Self::new(max, max)
    }

    pub fn value(&self) -> f32 {
        self.value as f32
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Fill ratio in `[0, 1]`; zero for a zero-capacity gauge.
    pub fn fraction(&self) -> f32 {
        if self.max > 0.0 {
            self.value() / self.max
        } else {
            0.0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value <= 0.0
    }

    /// Subtract `rate * dt`. A residue under [`EMPTY_EPSILON`] of the
    /// capacity is dropped.
    pub fn drain(&mut self, rate: f32, dt: f32) {
        self.store(self.value - f64::from(rate) * f64::from(dt));
        if self.value <= f64::from(self.max) * EMPTY_EPSILON {
            self.value = 0.0;
        }
    }

    /// Add `rate * dt`.
    pub fn regen(&mut self, rate: f32, dt: f32) {
        self.store(self.value + f64::from(rate) * f64::from(dt));
    }

    /// Deduct `cost` if the gauge holds at least that much.
    ///
    /// Returns false and leaves the gauge untouched otherwise.
    pub fn spend(&mut self, cost: f32) -> bool {
        let cost = f64::from(cost);
        if self.value >= cost {
            self.store(self.value - cost);
            true
        } else {
            false
        }
    }

    pub fn set(&mut self, value: f32) {
        self.store(f64::from(value));
    }

    /// Change the capacity, clamping the current value into it.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.store(self.value);
    }

    fn store(&mut self, value: f64) {
        self.value = value.clamp(0.0, f64::from(self.max));
    }
}
