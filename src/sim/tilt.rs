//! Tilt input
//!
//! A tilt sampler is an endless `Iterator<Item = TiltSample>`. Push-based
//! sensors go through a [`TiltLatch`] so the fixed-rate loop can read the
//! newest reading synchronously.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY;

/// One raw 2-axis accelerometer reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltSample {
    pub x: f32,
    pub y: f32,
}

impl TiltSample {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Replace a reading with NaN/Inf in either axis by `(0, 0)`
    pub fn sanitized(self) -> Self {
        if self.x.is_finite() && self.y.is_finite() {
            self
        } else {
            Self::ZERO
        }
    }
}

impl From<(f32, f32)> for TiltSample {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Sampler for devices without an accelerometer
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensor;

impl Iterator for NoSensor {
    type Item = TiltSample;

    fn next(&mut self) -> Option<TiltSample> {
        Some(TiltSample::ZERO)
    }
}

/// Device held at a fixed angle
#[derive(Debug, Clone, Copy)]
pub struct ConstantTilt(pub TiltSample);

impl Iterator for ConstantTilt {
    type Item = TiltSample;

    fn next(&mut self) -> Option<TiltSample> {
        Some(self.0)
    }
}

/// Synthetic accelerometer: a seeded random walk clamped to ±g per axis
#[derive(Debug, Clone)]
pub struct WanderingTilt {
    rng: Pcg32,
    current: TiltSample,
    /// Largest change per sample on each axis, in `[0, 2g]`
    max_delta: f32,
}

impl WanderingTilt {
    pub const DEFAULT_MAX_DELTA: f32 = 0.5;

    pub fn new(seed: u64) -> Self {
        Self::with_max_delta(seed, Self::DEFAULT_MAX_DELTA)
    }

    /// Random walk with a custom step size. Sign is ignored; NaN/Inf fall back to the default.
    pub fn with_max_delta(seed: u64, max_delta: f32) -> Self {
        let max_delta = if max_delta.is_finite() {
            max_delta.abs().min(2.0 * GRAVITY)
        } else {
            log::warn!("Invalid tilt step {}; using {}", max_delta, Self::DEFAULT_MAX_DELTA);
            Self::DEFAULT_MAX_DELTA
        };
        Self {
            rng: Pcg32::seed_from_u64(seed),
            current: TiltSample::ZERO,
            max_delta,
        }
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}

impl Iterator for WanderingTilt {
    type Item = TiltSample;

    fn next(&mut self) -> Option<TiltSample> {
        let dx = self.rng.random_range(-self.max_delta..=self.max_delta);
        let dy = self.rng.random_range(-self.max_delta..=self.max_delta);
        self.current = TiltSample {
            x: (self.current.x + dx).clamp(-GRAVITY, GRAVITY),
            y: (self.current.y + dy).clamp(-GRAVITY, GRAVITY),
        };
        Some(self.current)
    }
}

/// Holds the most recent reading from a push-based sensor
///
/// Readings that arrive between steps overwrite each other; steps that run
/// without a fresh reading reuse the last one.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiltLatch {
    latest: Option<TiltSample>,
    pushes: u64,
}

impl TiltLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: TiltSample) {
        self.latest = Some(sample);
        self.pushes += 1;
    }

    /// Newest reading, or `(0, 0)` if the sensor never reported
    pub fn latest(&self) -> TiltSample {
        self.latest.unwrap_or(TiltSample::ZERO)
    }

    /// Total readings received
    pub fn pushes(&self) -> u64 {
        self.pushes
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }
}
