// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tactile Tracker: inertial pan/zoom state for touch manipulation.
//!
//! This crate provides a small, headless model of a manipulation tracker. It
//! focuses on:
//! - Accumulating manipulation samples into a clamped (position, scale) state.
//! - Coasting with per-tick decay once the fingers lift.
//! - An explicit phase machine (`Idle`, `Interacting`, `Inertia`,
//!   `CustomAnimation`) with queued notifications.
//! - Deriving the per-frame transform for a rendered layer.
//!
//! It does **not** own any scene graph or rendering backend. Callers are
//! expected to:
//! - Forward pointer presses to [`InertialTracker::try_redirect`] and later
//!   events to [`InertialTracker::handle_pointer`].
//! - Call [`InertialTracker::tick`] once per frame.
//! - Apply [`InertialTracker::transform`] (or react to
//!   [`TrackerEvent::ValuesChanged`]) to their visual subtree.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use tactile_tracker::{
//!     InertialTracker, ManipulationConfig, OwnerId, PointerClaims, PointerEvent, PointerPhase,
//!     SourceConfig, TrackerPhase,
//! };
//!
//! let mut claims = PointerClaims::new();
//! let mut tracker = InertialTracker::new(OwnerId(0), ManipulationConfig::default()).unwrap();
//! tracker.add_source(SourceConfig::default());
//!
//! // Press and drag one finger 30 units to the right.
//! let press = PointerEvent::touch(1, PointerPhase::Down, Point::new(100.0, 100.0), 0);
//! assert!(tracker.try_redirect(&mut claims, &press).is_accepted());
//! for i in 1..=3_u64 {
//!     let x = 100.0 + 10.0 * i as f64;
//!     let step = PointerEvent::touch(1, PointerPhase::Move, Point::new(x, 100.0), 16 * i);
//!     tracker.handle_pointer(&mut claims, &step);
//! }
//! assert_eq!(tracker.phase(), TrackerPhase::Interacting);
//!
//! // Content follows the finger.
//! assert_eq!(tracker.transform().offset, Vec2::new(30.0, 0.0));
//!
//! // Lift while moving: the tracker coasts, then settles.
//! let lift = PointerEvent::touch(1, PointerPhase::Up, Point::new(130.0, 100.0), 48);
//! tracker.handle_pointer(&mut claims, &lift);
//! assert_eq!(tracker.phase(), TrackerPhase::Inertia);
//! while tracker.phase() == TrackerPhase::Inertia {
//!     tracker.tick();
//! }
//! assert!(tracker.transform().offset.x > 30.0);
//! ```
//!
//! ## Design notes
//!
//! - Position is in scroll direction; the layer is translated by `-position`
//!   and scaled about its origin by `scale`.
//! - Samples apply `position += delta` and `scale *= delta` with clamping.
//!   Inertia applies `velocity *= decay; position += velocity` per tick, and
//!   the same additive rule for scale.
//! - A velocity component pinned against a bound is zeroed.
//!
//! This crate is `no_std` (with `alloc`).

#![no_std]

extern crate alloc;

mod config;
mod events;
mod state;
mod tracker;
mod transform;

pub use config::{
    Axis, ConfigError, DEFAULT_DECAY_RATE, DEFAULT_FRAME_INTERVAL, DEFAULT_MAX_SCALE,
    DEFAULT_MIN_SCALE, DEFAULT_REST_EPSILON, DecayChannel, ManipulationConfig,
};
pub use events::{TrackerEvent, TrackerObserver};
pub use state::{TrackerPhase, TrackerState};
pub use tracker::{InertialTracker, TrackerDebugInfo};
pub use transform::{LayerBinding, LayerBindingDebugInfo, LayerTransform};

pub use tactile_source::{
    DeviceFilter, GestureEnd, ManipulationSample, ManipulationSource, OwnerId, PointerClaims,
    PointerEvent, PointerId, PointerKind, PointerPhase, Redirect, RequestIgnored, SourceConfig,
    SourceMode, SourceOutput,
};
