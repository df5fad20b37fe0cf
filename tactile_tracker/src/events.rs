// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracker notifications and the observer interface that consumes them.
//!
//! Trackers queue a [`TrackerEvent`] for every phase transition and every
//! value change. Callers either drain the queue themselves with
//! [`InertialTracker::drain_events`](crate::InertialTracker::drain_events) or
//! hand an observer to
//! [`InertialTracker::dispatch_events`](crate::InertialTracker::dispatch_events).
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Vec2;
//! use tactile_tracker::{InertialTracker, ManipulationConfig, OwnerId, TrackerObserver};
//!
//! #[derive(Default)]
//! struct Layer {
//!     offset: Vec2,
//!     scale: f64,
//! }
//!
//! impl TrackerObserver for Layer {
//!     fn values_changed(&mut self, position: Vec2, scale: f64) {
//!         self.offset = -position;
//!         self.scale = scale;
//!     }
//! }
//!
//! let mut tracker = InertialTracker::new(OwnerId(0), ManipulationConfig::default()).unwrap();
//! let mut layer = Layer::default();
//!
//! tracker.try_update_position(Vec2::new(40.0, 0.0));
//! tracker.dispatch_events(&mut layer);
//! assert_eq!(layer.offset, Vec2::new(-40.0, 0.0));
//! assert_eq!(layer.scale, 1.0);
//! ```

use kurbo::Vec2;
use tactile_source::RequestIgnored;

/// Something observable happened to a tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackerEvent {
    /// Redirected input took control.
    InteractingEntered,
    /// Position or scale changed.
    ValuesChanged {
        /// New position.
        position: Vec2,
        /// New scale.
        scale: f64,
    },
    /// Input ended with velocity; coasting begins.
    InertiaEntered {
        /// Pan velocity per tick.
        velocity: Vec2,
        /// Zoom velocity per tick.
        scale_velocity: f64,
    },
    /// Motion stopped.
    IdleEntered,
    /// A programmatic animation took control.
    CustomAnimationEntered,
    /// A redirect was refused because another owner holds the pointer.
    RequestIgnored(RequestIgnored),
}

/// Receives tracker notifications. Every method defaults to doing nothing.
pub trait TrackerObserver {
    /// See [`TrackerEvent::InteractingEntered`].
    fn interacting_entered(&mut self) {}

    /// See [`TrackerEvent::ValuesChanged`].
    fn values_changed(&mut self, position: Vec2, scale: f64) {
        let _ = (position, scale);
    }

    /// See [`TrackerEvent::InertiaEntered`].
    fn inertia_entered(&mut self, velocity: Vec2, scale_velocity: f64) {
        let _ = (velocity, scale_velocity);
    }

    /// See [`TrackerEvent::IdleEntered`].
    fn idle_entered(&mut self) {}

    /// See [`TrackerEvent::CustomAnimationEntered`].
    fn custom_animation_entered(&mut self) {}

    /// See [`TrackerEvent::RequestIgnored`].
    fn request_ignored(&mut self, notice: RequestIgnored) {
        let _ = notice;
    }

    /// Routes `event` to the matching method.
    fn on_event(&mut self, event: &TrackerEvent) {
        match *event {
            TrackerEvent::InteractingEntered => self.interacting_entered(),
            TrackerEvent::ValuesChanged { position, scale } => self.values_changed(position, scale),
            TrackerEvent::InertiaEntered {
                velocity,
                scale_velocity,
            } => self.inertia_entered(velocity, scale_velocity),
            TrackerEvent::IdleEntered => self.idle_entered(),
            TrackerEvent::CustomAnimationEntered => self.custom_animation_entered(),
            TrackerEvent::RequestIgnored(notice) => self.request_ignored(notice),
        }
    }
}

impl TrackerObserver for () {}
