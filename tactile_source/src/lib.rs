// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tactile Source: turn redirected touch contacts into manipulation deltas.
//!
//! This crate is the input half of a pan/zoom manipulation engine. It owns no
//! view state. It only answers two questions:
//!
//! - May this pointer be redirected? Device classes are filtered with a
//!   [`DeviceFilter`] (touch only by default) and ownership is arbitrated by a
//!   shared [`PointerClaims`] registry.
//! - What did the redirected contacts just do? Each move yields a
//!   [`ManipulationSample`] with a pan delta and a multiplicative zoom delta.
//!   The pan delta is the centroid movement in scroll direction, so content
//!   drawn at `-position` follows the finger. The zoom delta is the ratio of
//!   contact spreads. Lifting the last contact yields a [`GestureEnd`] with a
//!   release velocity for inertia.
//!
//! The state half (accumulation, clamping, inertia) lives in `tactile_tracker`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use tactile_source::{
//!     ManipulationSource, OwnerId, PointerClaims, PointerEvent, PointerPhase, SourceConfig,
//!     SourceOutput,
//! };
//!
//! let mut claims = PointerClaims::new();
//! let mut source = ManipulationSource::new(OwnerId(0), SourceConfig::default());
//!
//! let press = PointerEvent::touch(1, PointerPhase::Down, Point::new(10.0, 10.0), 0);
//! assert!(source.begin_redirect(&mut claims, &press).is_accepted());
//!
//! let drag = PointerEvent::touch(1, PointerPhase::Move, Point::new(25.0, 10.0), 16);
//! let Some(SourceOutput::Sample(sample)) = source.handle(&mut claims, &drag) else {
//!     unreachable!();
//! };
//! assert_eq!(sample.delta_position, Vec2::new(-15.0, 0.0));
//! assert_eq!(sample.delta_scale, 1.0);
//! ```
//!
//! ## Lazy sample streams
//!
//! ```rust
//! use kurbo::Point;
//! use tactile_source::{
//!     ManipulationSource, OwnerId, PointerClaims, PointerEvent, PointerPhase, SourceConfig,
//! };
//!
//! let mut claims = PointerClaims::new();
//! let mut source = ManipulationSource::new(OwnerId(0), SourceConfig::default());
//! let events = [
//!     PointerEvent::touch(1, PointerPhase::Down, Point::new(0.0, 0.0), 0),
//!     PointerEvent::touch(1, PointerPhase::Move, Point::new(5.0, 0.0), 16),
//!     PointerEvent::touch(1, PointerPhase::Move, Point::new(9.0, 0.0), 32),
//!     PointerEvent::touch(1, PointerPhase::Up, Point::new(9.0, 0.0), 48),
//!     // Never reached: the gesture is over.
//!     PointerEvent::touch(1, PointerPhase::Move, Point::new(99.0, 0.0), 64),
//! ];
//!
//! let mut samples = source.samples(&mut claims, events);
//! let total: f64 = samples.by_ref().map(|s| s.delta_position.x).sum();
//! assert_eq!(total, -9.0);
//! assert!(samples.gesture_end().is_some());
//! ```
//!
//! This crate is `no_std` compatible (with `alloc` via its dependencies).

#![no_std]

mod claims;
mod config;
mod contacts;
mod pointer;
mod source;
mod velocity;

pub use claims::{OwnerId, PointerClaims};
pub use config::{DeviceFilter, SourceConfig, SourceMode};
pub use contacts::{Contact, ContactDelta, ContactSet};
pub use pointer::{PointerEvent, PointerId, PointerKind, PointerPhase};
pub use source::{
    GestureEnd, ManipulationSample, ManipulationSource, Redirect, RequestIgnored, Samples,
    SourceOutput,
};
pub use velocity::{VELOCITY_WINDOW_MS, Velocity, VelocityEstimator};
