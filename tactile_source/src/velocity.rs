// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release velocity estimation over a short trailing window.

use kurbo::Vec2;
use smallvec::SmallVec;

/// Samples older than this (relative to the newest event) do not count.
pub const VELOCITY_WINDOW_MS: u64 = 100;

const INLINE_SAMPLES: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    time: u64,
    translation: Vec2,
    scale: f64,
}

/// Estimated motion at the moment a gesture ends.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    /// Pan velocity in units per second.
    pub translation: Vec2,
    /// Relative scale change per second (`0.0` means steady).
    pub scale: f64,
}

/// Accumulates recent deltas and turns them into a per-second velocity.
#[derive(Clone, Debug, Default)]
pub struct VelocityEstimator {
    samples: SmallVec<[Sample; INLINE_SAMPLES]>,
}

impl VelocityEstimator {
    /// Records a delta observed at `time` (milliseconds).
    pub fn push(&mut self, time: u64, translation: Vec2, scale: f64) {
        self.prune(time);
        self.samples.push(Sample {
            time,
            translation,
            scale,
        });
    }

    /// Estimates the velocity as of `now` (milliseconds).
    ///
    /// A contact that rested longer than the window before lifting has no
    /// velocity.
    #[must_use]
    pub fn estimate(&self, now: u64) -> Velocity {
        let cutoff = now.saturating_sub(VELOCITY_WINDOW_MS);
        let mut recent = self.samples.iter().filter(|s| s.time >= cutoff);
        let Some(first) = recent.next() else {
            return Velocity::default();
        };
        let mut last_time = first.time;
        let mut translation = Vec2::ZERO;
        let mut scale = 1.0;
        for sample in recent {
            translation += sample.translation;
            scale *= sample.scale;
            last_time = sample.time;
        }
        let span_ms = last_time.saturating_sub(first.time);
        if span_ms == 0 {
            return Velocity::default();
        }
        let seconds = span_ms as f64 / 1000.0;
        Velocity {
            translation: translation / seconds,
            scale: (scale - 1.0) / seconds,
        }
    }

    /// Forgets all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    fn prune(&mut self, now: u64) {
        let cutoff = now.saturating_sub(VELOCITY_WINDOW_MS);
        self.samples.retain(|s| s.time >= cutoff);
    }
}
