// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Manipulation source: redirect pointers and emit position/scale deltas.
//!
//! ## Usage
//!
//! 1) On pointer press, call [`ManipulationSource::begin_redirect`]. Events
//!    from devices outside the configured [`DeviceFilter`](crate::DeviceFilter)
//!    are filtered out; pointers held by another owner are refused with a
//!    [`RequestIgnored`] notice.
//! 2) Feed every later event for that pointer to [`ManipulationSource::handle`].
//!    Moves produce [`ManipulationSample`]s; lifting the last contact produces
//!    a [`GestureEnd`] carrying the release velocity.
//! 3) Alternatively wrap an event stream with [`ManipulationSource::samples`]
//!    to pull samples lazily until the gesture ends.

use kurbo::{Point, Vec2};

use crate::claims::{OwnerId, PointerClaims};
use crate::config::SourceConfig;
use crate::contacts::{ContactDelta, ContactSet};
use crate::pointer::{PointerEvent, PointerId, PointerPhase};
use crate::velocity::VelocityEstimator;

/// Travel (in view units) after which the rail decision is made.
const RAIL_DECISION_DISTANCE: f64 = 8.0;

/// Dominant axis must exceed the other by this factor to engage a rail.
const RAIL_RATIO: f64 = 2.0;

/// Incremental change produced by one input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManipulationSample {
    /// Pan delta in tracker space.
    ///
    /// This is the opposite of the finger movement: content drawn at
    /// `-position` then follows the finger.
    pub delta_position: Vec2,
    /// Multiplicative zoom delta (`1.0` means unchanged).
    pub delta_scale: f64,
    /// Centroid of the active contacts after the event.
    pub center: Point,
}

impl ManipulationSample {
    /// A sample that changes nothing.
    pub const IDENTITY: Self = Self {
        delta_position: Vec2::ZERO,
        delta_scale: 1.0,
        center: Point::ZERO,
    };
}

/// Motion at the moment the gesture ended.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureEnd {
    /// Pan velocity in tracker space, units per second.
    pub velocity: Vec2,
    /// Relative scale change per second.
    pub scale_velocity: f64,
}

impl GestureEnd {
    /// Returns `true` if nothing is moving.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.velocity == Vec2::ZERO && self.scale_velocity == 0.0
    }
}

/// Notice that a redirect was refused because another owner holds the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestIgnored {
    /// The pointer that was asked for.
    pub pointer: PointerId,
    /// Who asked.
    pub requested_by: OwnerId,
    /// Who holds it.
    pub held_by: OwnerId,
}

/// Outcome of [`ManipulationSource::begin_redirect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// The pointer now belongs to this source.
    Accepted,
    /// The device class is not accepted; nothing happened.
    Filtered,
    /// Another owner holds the pointer; nothing happened.
    Ignored(RequestIgnored),
}

impl Redirect {
    /// Returns `true` if the pointer was taken.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Output of [`ManipulationSource::handle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourceOutput {
    /// Contacts moved.
    Sample(ManipulationSample),
    /// The last contact was lifted or cancelled.
    Ended(GestureEnd),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum Rail {
    #[default]
    Undecided,
    Free,
    X,
    Y,
}

/// Converts redirected pointer events into manipulation samples.
#[derive(Clone, Debug)]
pub struct ManipulationSource {
    owner: OwnerId,
    config: SourceConfig,
    contacts: ContactSet,
    velocity: VelocityEstimator,
    rail: Rail,
}

impl ManipulationSource {
    /// Creates a source redirecting on behalf of `owner`.
    #[must_use]
    pub fn new(owner: OwnerId, config: SourceConfig) -> Self {
        Self {
            owner,
            config,
            contacts: ContactSet::default(),
            velocity: VelocityEstimator::default(),
            rail: Rail::Undecided,
        }
    }

    /// Owner id used for pointer claims.
    #[must_use]
    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect from the next event.
    pub fn set_config(&mut self, config: SourceConfig) {
        self.config = config;
    }

    /// Returns `true` while at least one contact is redirected here.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.contacts.is_empty()
    }

    /// Number of active contacts.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Returns `true` if `pointer` is part of the current gesture.
    #[must_use]
    pub fn owns(&self, pointer: PointerId) -> bool {
        self.contacts.contains(pointer)
    }

    /// Takes over `event.id` for the rest of its contact.
    ///
    /// `event.position` becomes the contact's origin.
    pub fn begin_redirect(&mut self, claims: &mut PointerClaims, event: &PointerEvent) -> Redirect {
        if !self.config.devices.accepts(event.kind) {
            tracing::trace!(pointer = event.id.0, kind = ?event.kind, "redirect filtered");
            return Redirect::Filtered;
        }
        if let Err(held_by) = claims.claim(event.id, self.owner) {
            tracing::debug!(
                pointer = event.id.0,
                requested_by = self.owner.0,
                held_by = held_by.0,
                "redirect ignored, pointer already claimed"
            );
            return Redirect::Ignored(RequestIgnored {
                pointer: event.id,
                requested_by: self.owner,
                held_by,
            });
        }
        if self.contacts.is_empty() {
            self.velocity.clear();
            self.rail = Rail::Undecided;
        }
        self.contacts.add(event.id, event.position);
        tracing::debug!(
            pointer = event.id.0,
            owner = self.owner.0,
            contacts = self.contacts.len(),
            "redirect accepted"
        );
        Redirect::Accepted
    }

    /// Processes an event for a redirected pointer.
    ///
    /// Events for pointers this source does not own are ignored.
    pub fn handle(
        &mut self,
        claims: &mut PointerClaims,
        event: &PointerEvent,
    ) -> Option<SourceOutput> {
        if !self.contacts.contains(event.id) {
            return None;
        }
        match event.phase {
            PointerPhase::Down => {
                self.contacts.add(event.id, event.position);
                None
            }
            PointerPhase::Move => {
                let delta = self.contacts.update(event.id, event.position)?;
                let sample = self.shape(delta);
                self.velocity
                    .push(event.time, sample.delta_position, sample.delta_scale);
                tracing::trace!(
                    dx = sample.delta_position.x,
                    dy = sample.delta_position.y,
                    ds = sample.delta_scale,
                    "manipulation sample"
                );
                Some(SourceOutput::Sample(sample))
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                self.contacts.remove(event.id);
                claims.release(event.id, self.owner);
                if !self.contacts.is_empty() {
                    return None;
                }
                let end = if event.phase == PointerPhase::Cancel {
                    GestureEnd::default()
                } else {
                    self.release_velocity(event.time)
                };
                self.reset();
                tracing::debug!(
                    vx = end.velocity.x,
                    vy = end.velocity.y,
                    vs = end.scale_velocity,
                    "gesture ended"
                );
                Some(SourceOutput::Ended(end))
            }
        }
    }

    /// Abandons the current gesture, releasing every claim.
    ///
    /// Returns a resting [`GestureEnd`] if a gesture was active.
    pub fn cancel(&mut self, claims: &mut PointerClaims) -> Option<GestureEnd> {
        if self.contacts.is_empty() {
            return None;
        }
        for contact in self.contacts.contacts() {
            claims.release(contact.id, self.owner);
        }
        self.reset();
        Some(GestureEnd::default())
    }

    /// Wraps `events` in a lazy iterator of samples for the current gesture.
    ///
    /// Press events from accepted devices join the gesture. Iteration stops
    /// after the gesture ends; the end is available from
    /// [`Samples::gesture_end`].
    pub fn samples<'a, I>(
        &'a mut self,
        claims: &'a mut PointerClaims,
        events: I,
    ) -> Samples<'a, I::IntoIter>
    where
        I: IntoIterator<Item = PointerEvent>,
    {
        Samples {
            source: self,
            claims,
            events: events.into_iter(),
            end: None,
        }
    }

    fn shape(&mut self, delta: ContactDelta) -> ManipulationSample {
        self.decide_rail();
        let config = &self.config;
        let free_x = config.position_x.is_enabled() && self.rail != Rail::Y;
        let free_y = config.position_y.is_enabled() && self.rail != Rail::X;
        ManipulationSample {
            delta_position: Vec2::new(
                if free_x { -delta.translation.x } else { 0.0 },
                if free_y { -delta.translation.y } else { 0.0 },
            ),
            delta_scale: if config.scale.is_enabled() {
                delta.scale
            } else {
                1.0
            },
            center: delta.centroid,
        }
    }

    fn decide_rail(&mut self) {
        if self.rail != Rail::Undecided {
            return;
        }
        let travel = self.contacts.travel();
        if travel.hypot() < RAIL_DECISION_DISTANCE {
            return;
        }
        let (ax, ay) = (travel.x.abs(), travel.y.abs());
        self.rail = if self.config.position_x_rails && ax >= ay * RAIL_RATIO {
            Rail::X
        } else if self.config.position_y_rails && ay >= ax * RAIL_RATIO {
            Rail::Y
        } else {
            Rail::Free
        };
        tracing::trace!(rail = ?self.rail, "rail decided");
    }

    fn release_velocity(&self, now: u64) -> GestureEnd {
        let v = self.velocity.estimate(now);
        let config = &self.config;
        let keep_x = config.position_x.has_inertia() && self.rail != Rail::Y;
        let keep_y = config.position_y.has_inertia() && self.rail != Rail::X;
        GestureEnd {
            velocity: Vec2::new(
                if keep_x { v.translation.x } else { 0.0 },
                if keep_y { v.translation.y } else { 0.0 },
            ),
            scale_velocity: if config.scale.has_inertia() {
                v.scale
            } else {
                0.0
            },
        }
    }

    fn reset(&mut self) {
        self.contacts.clear();
        self.velocity.clear();
        self.rail = Rail::Undecided;
    }
}

/// Lazy sample stream returned by [`ManipulationSource::samples`].
#[derive(Debug)]
pub struct Samples<'a, I> {
    source: &'a mut ManipulationSource,
    claims: &'a mut PointerClaims,
    events: I,
    end: Option<GestureEnd>,
}

impl<I> Samples<'_, I> {
    /// Release motion, once the gesture has ended.
    #[must_use]
    pub fn gesture_end(&self) -> Option<GestureEnd> {
        self.end
    }
}

impl<I> Iterator for Samples<'_, I>
where
    I: Iterator<Item = PointerEvent>,
{
    type Item = ManipulationSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.end.is_some() {
            return None;
        }
        for event in self.events.by_ref() {
            if event.phase == PointerPhase::Down && !self.source.owns(event.id) {
                self.source.begin_redirect(self.claims, &event);
                continue;
            }
            match self.source.handle(self.claims, &event) {
                Some(SourceOutput::Sample(sample)) => return Some(sample),
                Some(SourceOutput::Ended(end)) => {
                    self.end = Some(end);
                    return None;
                }
                None => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeviceFilter, SourceMode};
    use crate::pointer::PointerKind;

    fn down(id: u64, x: f64, y: f64, t: u64) -> PointerEvent {
        PointerEvent::touch(id, PointerPhase::Down, Point::new(x, y), t)
    }

    fn moved(id: u64, x: f64, y: f64, t: u64) -> PointerEvent {
        PointerEvent::touch(id, PointerPhase::Move, Point::new(x, y), t)
    }

    fn up(id: u64, x: f64, y: f64, t: u64) -> PointerEvent {
        PointerEvent::touch(id, PointerPhase::Up, Point::new(x, y), t)
    }

    fn sample_of(output: Option<SourceOutput>) -> ManipulationSample {
        match output {
            Some(SourceOutput::Sample(s)) => s,
            other => panic!("expected a sample, got {other:?}"),
        }
    }

    #[test]
    fn mouse_press_is_filtered() {
        let mut claims = PointerClaims::new();
        let mut source = ManipulationSource::new(OwnerId(1), SourceConfig::default());
        let press = down(1, 0.0, 0.0, 0).with_kind(PointerKind::Mouse);

        assert_eq!(source.begin_redirect(&mut claims, &press), Redirect::Filtered);
        assert!(!source.is_active());
        assert!(claims.is_empty());
    }

    #[test]
    fn touchpad_accepted_when_enabled() {
        let mut claims = PointerClaims::new();
        let config =
            SourceConfig::default().with_devices(DeviceFilter::TOUCH | DeviceFilter::TOUCHPAD);
        let mut source = ManipulationSource::new(OwnerId(1), config);
        let press = down(1, 0.0, 0.0, 0).with_kind(PointerKind::Touchpad);

        assert!(source.begin_redirect(&mut claims, &press).is_accepted());
    }

    #[test]
    fn second_owner_is_ignored() {
        let mut claims = PointerClaims::new();
        let mut a = ManipulationSource::new(OwnerId(1), SourceConfig::default());
        let mut b = ManipulationSource::new(OwnerId(2), SourceConfig::default());
        let press = down(9, 0.0, 0.0, 0);

        assert!(a.begin_redirect(&mut claims, &press).is_accepted());
        assert_eq!(
            b.begin_redirect(&mut claims, &press),
            Redirect::Ignored(RequestIgnored {
                pointer: PointerId(9),
                requested_by: OwnerId(2),
                held_by: OwnerId(1),
            })
        );
        assert!(!b.is_active());
    }

    #[test]
    fn move_produces_delta_and_up_releases_claim() {
        let mut claims = PointerClaims::new();
        let mut source = ManipulationSource::new(OwnerId(1), SourceConfig::default());
        source.begin_redirect(&mut claims, &down(1, 10.0, 10.0, 0));

        let sample = sample_of(source.handle(&mut claims, &moved(1, 14.0, 7.0, 16)));
        assert_eq!(sample.delta_position, Vec2::new(-4.0, 3.0));
        assert_eq!(sample.delta_scale, 1.0);

        let out = source.handle(&mut claims, &up(1, 14.0, 7.0, 32));
        assert!(matches!(out, Some(SourceOutput::Ended(_))));
        assert!(claims.is_empty());
        assert!(!source.is_active());
    }

    #[test]
    fn lifting_one_of_two_fingers_keeps_gesture() {
        let mut claims = PointerClaims::new();
        let mut source = ManipulationSource::new(OwnerId(1), SourceConfig::default());
        source.begin_redirect(&mut claims, &down(1, 0.0, 0.0, 0));
        source.begin_redirect(&mut claims, &down(2, 100.0, 0.0, 0));

        assert_eq!(source.handle(&mut claims, &up(2, 100.0, 0.0, 10)), None);
        assert!(source.is_active());
        assert_eq!(claims.owner(PointerId(2)), None);
        assert_eq!(claims.owner(PointerId(1)), Some(OwnerId(1)));
    }

    #[test]
    fn cancel_ends_at_rest() {
        let mut claims = PointerClaims::new();
        let mut source = ManipulationSource::new(OwnerId(1), SourceConfig::default());
        source.begin_redirect(&mut claims, &down(1, 0.0, 0.0, 0));
        source.handle(&mut claims, &moved(1, 50.0, 0.0, 10));

        let cancel = PointerEvent::touch(1, PointerPhase::Cancel, Point::new(50.0, 0.0), 12);
        let out = source.handle(&mut claims, &cancel);
        assert_eq!(out, Some(SourceOutput::Ended(GestureEnd::default())));
    }

    #[test]
    fn explicit_cancel_releases_everything() {
        let mut claims = PointerClaims::new();
        let mut source = ManipulationSource::new(OwnerId(1), SourceConfig::default());
        source.begin_redirect(&mut claims, &down(1, 0.0, 0.0, 0));
        source.begin_redirect(&mut claims, &down(2, 5.0, 0.0, 0));

        assert_eq!(source.cancel(&mut claims), Some(GestureEnd::default()));
        assert!(claims.is_empty());
        assert_eq!(source.cancel(&mut claims), None);
    }

    #[test]
    fn disabled_scale_channel_reports_identity_scale() {
        let mut claims = PointerClaims::new();
        let config = SourceConfig::default().with_scale_mode(SourceMode::Disabled);
        let mut source = ManipulationSource::new(OwnerId(1), config);
        source.begin_redirect(&mut claims, &down(1, 0.0, 0.0, 0));
        source.begin_redirect(&mut claims, &down(2, 100.0, 0.0, 0));

        let sample = sample_of(source.handle(&mut claims, &moved(2, 200.0, 0.0, 16)));
        assert_eq!(sample.delta_scale, 1.0);
        assert_eq!(sample.delta_position, Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn rails_lock_horizontal_gesture() {
        let mut claims = PointerClaims::new();
        let config = SourceConfig::default().with_rails(true);
        let mut source = ManipulationSource::new(OwnerId(1), config);
        source.begin_redirect(&mut claims, &down(1, 0.0, 0.0, 0));

        let first = sample_of(source.handle(&mut claims, &moved(1, 20.0, 2.0, 16)));
        assert_eq!(first.delta_position, Vec2::new(-20.0, 0.0));

        let second = sample_of(source.handle(&mut claims, &moved(1, 30.0, 12.0, 32)));
        assert_eq!(second.delta_position, Vec2::new(-10.0, 0.0));
    }

    #[test]
    fn position_without_inertia_stops_dead() {
        let mut claims = PointerClaims::new();
        let config = SourceConfig::default().with_position_mode(SourceMode::Enabled);
        let mut source = ManipulationSource::new(OwnerId(1), config);
        source.begin_redirect(&mut claims, &down(1, 0.0, 0.0, 0));
        source.handle(&mut claims, &moved(1, 10.0, 0.0, 16));
        source.handle(&mut claims, &moved(1, 20.0, 0.0, 32));

        let out = source.handle(&mut claims, &up(1, 20.0, 0.0, 40));
        match out {
            Some(SourceOutput::Ended(end)) => assert!(end.is_at_rest()),
            other => panic!("expected gesture end, got {other:?}"),
        }
    }

    #[test]
    fn flick_has_release_velocity() {
        let mut claims = PointerClaims::new();
        let mut source = ManipulationSource::new(OwnerId(1), SourceConfig::default());
        source.begin_redirect(&mut claims, &down(1, 0.0, 0.0, 0));
        for i in 1..=5_u64 {
            source.handle(&mut claims, &moved(1, i as f64 * 10.0, 0.0, i * 10));
        }

        let out = source.handle(&mut claims, &up(1, 50.0, 0.0, 50));
        match out {
            Some(SourceOutput::Ended(end)) => {
                // 10 units every 10 ms.
                assert!((end.velocity.x + 1000.0).abs() < 1e-9);
                assert_eq!(end.velocity.y, 0.0);
            }
            other => panic!("expected gesture end, got {other:?}"),
        }
    }

    #[test]
    fn foreign_pointer_events_are_ignored() {
        let mut claims = PointerClaims::new();
        let mut source = ManipulationSource::new(OwnerId(1), SourceConfig::default());
        source.begin_redirect(&mut claims, &down(1, 0.0, 0.0, 0));

        assert_eq!(source.handle(&mut claims, &moved(2, 5.0, 5.0, 10)), None);
    }
}
