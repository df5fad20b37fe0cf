// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

/// Authoritative pan/zoom state of a tracker.
///
/// `position` is in scroll direction: content bound to the tracker is drawn
/// translated by `-position`. Velocities are per inertia tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackerState {
    /// Pan offset.
    pub position: Vec2,
    /// Uniform zoom factor.
    pub scale: f64,
    /// Pan velocity per tick.
    pub velocity: Vec2,
    /// Zoom velocity per tick (additive).
    pub scale_velocity: f64,
}

impl TrackerState {
    /// No pan, unit zoom, at rest.
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        scale: 1.0,
        velocity: Vec2::ZERO,
        scale_velocity: 0.0,
    };
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Interaction phase of a tracker.
///
/// ```text
/// Idle -> Interacting -> Inertia -> Idle
///            |                       ^
///            +-----------------------+   (released at rest)
/// Idle -> CustomAnimation -> Idle
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackerPhase {
    /// Nothing is moving.
    #[default]
    Idle,
    /// Redirected input is driving the state.
    Interacting,
    /// Input ended with velocity; the state coasts to rest.
    Inertia,
    /// A programmatic animation is driving the state.
    CustomAnimation,
}
