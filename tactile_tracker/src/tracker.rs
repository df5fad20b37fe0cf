// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::{Drain, Vec};

use kurbo::{Point, Vec2};
use tactile_source::{
    GestureEnd, ManipulationSample, ManipulationSource, OwnerId, PointerClaims, PointerEvent,
    Redirect, SourceConfig, SourceOutput,
};

use crate::config::{ConfigError, ManipulationConfig};
use crate::events::{TrackerEvent, TrackerObserver};
use crate::state::{TrackerPhase, TrackerState};
use crate::transform::LayerTransform;

/// Linear programmatic animation between two states.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CustomAnimation {
    from_position: Vec2,
    from_scale: f64,
    to_position: Vec2,
    to_scale: f64,
    elapsed: u32,
    total: u32,
}

/// Pan/zoom tracker with clamping and inertia.
///
/// `InertialTracker` owns the authoritative [`TrackerState`] of one view. It
/// is driven by:
/// - Redirected input, through its [`ManipulationSource`]s
///   ([`try_redirect`](Self::try_redirect), [`handle_pointer`](Self::handle_pointer))
///   or directly with [`apply_sample`](Self::apply_sample) and
///   [`end_interaction`](Self::end_interaction).
/// - A periodic [`tick`](Self::tick) that advances inertia and custom
///   animations.
/// - Programmatic requests (`try_update_*`, [`animate_to`](Self::animate_to)),
///   which are refused while the user is interacting.
///
/// Every change is queued as a [`TrackerEvent`].
#[derive(Clone, Debug)]
pub struct InertialTracker {
    id: OwnerId,
    config: ManipulationConfig,
    state: TrackerState,
    phase: TrackerPhase,
    sources: Vec<ManipulationSource>,
    animation: Option<CustomAnimation>,
    events: Vec<TrackerEvent>,
}

impl InertialTracker {
    /// Creates a tracker at the identity state.
    ///
    /// The initial scale of `1.0` is clamped into the configured range.
    pub fn new(id: OwnerId, config: ManipulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = TrackerState {
            position: config.clamp_position(Vec2::ZERO),
            scale: config.clamp_scale(1.0),
            ..TrackerState::IDENTITY
        };
        Ok(Self {
            id,
            config,
            state,
            phase: TrackerPhase::Idle,
            sources: Vec::new(),
            animation: None,
            events: Vec::new(),
        })
    }

    /// Identity used when claiming pointers.
    #[must_use]
    pub fn id(&self) -> OwnerId {
        self.id
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ManipulationConfig {
        &self.config
    }

    /// Replaces the configuration, clamping the current state into the new
    /// bounds. An invalid configuration leaves the tracker untouched.
    pub fn set_config(&mut self, config: ManipulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        let position = config.clamp_position(self.state.position);
        let scale = config.clamp_scale(self.state.scale);
        self.set_values(position, scale);
        Ok(())
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    /// Transform to apply to the bound layer this frame.
    #[must_use]
    pub fn transform(&self) -> LayerTransform {
        LayerTransform::from_state(&self.state)
    }

    /// Attaches a new input source and returns its index.
    pub fn add_source(&mut self, config: SourceConfig) -> usize {
        self.sources.push(ManipulationSource::new(self.id, config));
        self.sources.len() - 1
    }

    /// Attached input sources.
    #[must_use]
    pub fn sources(&self) -> &[ManipulationSource] {
        &self.sources
    }

    /// Mutable access to one source, e.g. to change its configuration.
    pub fn source_mut(&mut self, index: usize) -> Option<&mut ManipulationSource> {
        self.sources.get_mut(index)
    }

    /// Returns `true` while any source holds a contact.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.sources.iter().any(ManipulationSource::is_active)
    }

    /// Offers a pointer press to the attached sources.
    ///
    /// The first source whose device filter accepts the event tries to claim
    /// the pointer. A refused claim queues [`TrackerEvent::RequestIgnored`].
    /// Accepting a contact while coasting stops the motion.
    pub fn try_redirect(&mut self, claims: &mut PointerClaims, event: &PointerEvent) -> Redirect {
        let Some(source) = self
            .sources
            .iter_mut()
            .find(|s| s.config().devices.accepts(event.kind))
        else {
            return Redirect::Filtered;
        };
        let outcome = source.begin_redirect(claims, event);
        match outcome {
            Redirect::Accepted => self.catch_motion(),
            Redirect::Ignored(notice) => self.events.push(TrackerEvent::RequestIgnored(notice)),
            Redirect::Filtered => {}
        }
        outcome
    }

    /// Routes a move/up/cancel event to the source that owns its pointer and
    /// applies the result.
    pub fn handle_pointer(
        &mut self,
        claims: &mut PointerClaims,
        event: &PointerEvent,
    ) -> Option<SourceOutput> {
        let output = self
            .sources
            .iter_mut()
            .find(|s| s.owns(event.id))?
            .handle(claims, event)?;
        match output {
            SourceOutput::Sample(sample) => self.apply_sample(&sample),
            SourceOutput::Ended(end) => {
                if !self.is_capturing() {
                    self.end_interaction(end);
                    self.release_caught_motion();
                }
            }
        }
        Some(output)
    }

    /// Abandons every active gesture and releases its pointers.
    pub fn cancel_interaction(&mut self, claims: &mut PointerClaims) {
        let mut cancelled = false;
        for source in &mut self.sources {
            cancelled |= source.cancel(claims).is_some();
        }
        if cancelled {
            self.end_interaction(GestureEnd::default());
            self.release_caught_motion();
        }
    }

    /// Applies one input sample.
    ///
    /// `position += delta_position`, `scale = clamp(scale * delta_scale)`,
    /// then `position` is clamped. The first sample enters
    /// [`TrackerPhase::Interacting`].
    pub fn apply_sample(&mut self, sample: &ManipulationSample) {
        if self.phase != TrackerPhase::Interacting {
            self.state.velocity = Vec2::ZERO;
            self.state.scale_velocity = 0.0;
            self.animation = None;
            self.enter(TrackerPhase::Interacting);
        }
        let delta_scale = if sample.delta_scale.is_finite() && sample.delta_scale > 0.0 {
            sample.delta_scale
        } else {
            1.0
        };
        let delta_position = if sample.delta_position.is_finite() {
            sample.delta_position
        } else {
            Vec2::ZERO
        };
        let position = self.state.position + delta_position;
        let scale = self.config.clamp_scale(self.state.scale * delta_scale);
        let position = self.config.clamp_position(position);
        self.set_values(position, scale);
    }

    /// Ends the current interaction with a release velocity in units per
    /// second (pan) and relative change per second (zoom).
    ///
    /// Does nothing unless the tracker is interacting.
    pub fn end_interaction(&mut self, end: GestureEnd) {
        if self.phase != TrackerPhase::Interacting {
            return;
        }
        let dt = self.config.frame_interval;
        let velocity = if end.velocity.is_finite() {
            end.velocity * dt
        } else {
            Vec2::ZERO
        };
        let scale_velocity = if end.scale_velocity.is_finite() {
            end.scale_velocity * self.state.scale * dt
        } else {
            0.0
        };
        self.start_inertia(velocity, scale_velocity);
    }

    /// Starts coasting with per-tick velocities.
    ///
    /// Velocities below the rest epsilon go straight to
    /// [`TrackerPhase::Idle`]. Refused while input is captured or when a
    /// velocity is not finite.
    pub fn start_inertia(&mut self, velocity: Vec2, scale_velocity: f64) -> bool {
        if self.is_capturing() || !velocity.is_finite() || !scale_velocity.is_finite() {
            return false;
        }
        self.animation = None;
        if self.is_at_rest(velocity, scale_velocity) {
            self.state.velocity = Vec2::ZERO;
            self.state.scale_velocity = 0.0;
            self.enter(TrackerPhase::Idle);
            return true;
        }
        self.state.velocity = velocity;
        self.state.scale_velocity = scale_velocity;
        if self.phase != TrackerPhase::Inertia {
            self.enter(TrackerPhase::Inertia);
        }
        true
    }

    /// Advances inertia or a custom animation by one frame.
    ///
    /// Returns `true` if position or scale changed.
    pub fn tick(&mut self) -> bool {
        match self.phase {
            TrackerPhase::Inertia => self.tick_inertia(),
            TrackerPhase::CustomAnimation => self.tick_animation(),
            TrackerPhase::Idle | TrackerPhase::Interacting => false,
        }
    }

    /// Jumps to `position`, stopping any motion. Refused while interacting
    /// or for a non-finite position.
    pub fn try_update_position(&mut self, position: Vec2) -> bool {
        if !self.accepts_programmatic() || !position.is_finite() {
            return false;
        }
        let position = self.config.clamp_position(position);
        self.settle();
        self.set_values(position, self.state.scale);
        true
    }

    /// Zooms to `scale` keeping the content under `center` (view space)
    /// fixed, stopping any motion. Refused while interacting.
    pub fn try_update_scale(&mut self, scale: f64, center: Point) -> bool {
        if !self.accepts_programmatic() || !scale.is_finite() || !center.is_finite() {
            return false;
        }
        let scale = self.config.clamp_scale(scale);
        let ratio = scale / self.state.scale;
        let c = center.to_vec2();
        let position = self.config.clamp_position((self.state.position + c) * ratio - c);
        self.settle();
        self.set_values(position, scale);
        true
    }

    /// Adds a per-tick pan velocity, entering inertia if needed.
    /// Refused while interacting or for a non-finite velocity.
    pub fn try_update_position_with_additional_velocity(&mut self, velocity: Vec2) -> bool {
        if !self.accepts_programmatic() || !velocity.is_finite() {
            return false;
        }
        let base = if self.phase == TrackerPhase::Inertia {
            self.state.velocity
        } else {
            Vec2::ZERO
        };
        let scale_velocity = if self.phase == TrackerPhase::Inertia {
            self.state.scale_velocity
        } else {
            0.0
        };
        self.start_inertia(base + velocity, scale_velocity)
    }

    /// Animates linearly to `position`/`scale` over `ticks` frames.
    ///
    /// Targets are clamped. Zero ticks jumps immediately. Refused while
    /// interacting or for non-finite targets.
    pub fn animate_to(&mut self, position: Vec2, scale: f64, ticks: u32) -> bool {
        if !self.accepts_programmatic() || !position.is_finite() || !scale.is_finite() {
            return false;
        }
        let to_position = self.config.clamp_position(position);
        let to_scale = self.config.clamp_scale(scale);
        if ticks == 0 {
            self.settle();
            self.set_values(to_position, to_scale);
            return true;
        }
        self.state.velocity = Vec2::ZERO;
        self.state.scale_velocity = 0.0;
        self.animation = Some(CustomAnimation {
            from_position: self.state.position,
            from_scale: self.state.scale,
            to_position,
            to_scale,
            elapsed: 0,
            total: ticks,
        });
        if self.phase != TrackerPhase::CustomAnimation {
            self.enter(TrackerPhase::CustomAnimation);
        }
        true
    }

    /// Returns `true` if events are waiting.
    #[must_use]
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Removes and returns queued events in order.
    pub fn drain_events(&mut self) -> Drain<'_, TrackerEvent> {
        self.events.drain(..)
    }

    /// Delivers queued events to `observer` in order.
    pub fn dispatch_events<O: TrackerObserver + ?Sized>(&mut self, observer: &mut O) {
        for event in self.events.drain(..) {
            observer.on_event(&event);
        }
    }

    /// Snapshot of the tracker for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> TrackerDebugInfo {
        TrackerDebugInfo {
            id: self.id,
            phase: self.phase,
            state: self.state,
            config: self.config,
            sources: self.sources.len(),
            capturing: self.is_capturing(),
            pending_events: self.events.len(),
        }
    }

    fn tick_inertia(&mut self) -> bool {
        if self.is_capturing() {
            return false;
        }
        let config = self.config;
        let mut velocity = self.state.velocity * config.position_inertia_decay_rate;
        let unclamped = self.state.position + velocity;
        let position = config.clamp_position(unclamped);
        // A pinned axis has nowhere left to go.
        if position.x != unclamped.x {
            velocity.x = 0.0;
        }
        if position.y != unclamped.y {
            velocity.y = 0.0;
        }

        let mut scale_velocity = self.state.scale_velocity * config.scale_inertia_decay_rate;
        let unclamped_scale = self.state.scale + scale_velocity;
        let scale = config.clamp_scale(unclamped_scale);
        if scale != unclamped_scale {
            scale_velocity = 0.0;
        }

        self.state.velocity = velocity;
        self.state.scale_velocity = scale_velocity;
        let changed = self.set_values(position, scale);
        tracing::trace!(
            tracker = self.id.0,
            vx = velocity.x,
            vy = velocity.y,
            vs = scale_velocity,
            "inertia tick"
        );

        if self.is_at_rest(velocity, scale_velocity) {
            self.state.velocity = Vec2::ZERO;
            self.state.scale_velocity = 0.0;
            self.enter(TrackerPhase::Idle);
        }
        changed
    }

    fn tick_animation(&mut self) -> bool {
        let Some(mut anim) = self.animation else {
            self.enter(TrackerPhase::Idle);
            return false;
        };
        anim.elapsed = anim.elapsed.saturating_add(1).min(anim.total);
        let t = f64::from(anim.elapsed) / f64::from(anim.total);
        let position = anim.from_position.lerp(anim.to_position, t);
        let scale = anim.from_scale + (anim.to_scale - anim.from_scale) * t;
        let changed = self.set_values(
            self.config.clamp_position(position),
            self.config.clamp_scale(scale),
        );
        if anim.elapsed >= anim.total {
            self.animation = None;
            self.enter(TrackerPhase::Idle);
        } else {
            self.animation = Some(anim);
        }
        changed
    }

    fn is_at_rest(&self, velocity: Vec2, scale_velocity: f64) -> bool {
        let eps = self.config.rest_epsilon;
        velocity.hypot() < eps && scale_velocity.abs() < eps
    }

    fn accepts_programmatic(&self) -> bool {
        self.phase != TrackerPhase::Interacting && !self.is_capturing()
    }

    /// Stops inertia and animations, returning to idle.
    fn settle(&mut self) {
        self.state.velocity = Vec2::ZERO;
        self.state.scale_velocity = 0.0;
        self.animation = None;
        if self.phase != TrackerPhase::Idle {
            self.enter(TrackerPhase::Idle);
        }
    }

    /// A new contact freezes coasting content in place.
    fn catch_motion(&mut self) {
        if matches!(
            self.phase,
            TrackerPhase::Inertia | TrackerPhase::CustomAnimation
        ) {
            self.state.velocity = Vec2::ZERO;
            self.state.scale_velocity = 0.0;
            self.animation = None;
        }
    }

    /// A caught gesture that ended without moving leaves nothing to coast.
    fn release_caught_motion(&mut self) {
        let caught = matches!(
            self.phase,
            TrackerPhase::Inertia | TrackerPhase::CustomAnimation
        ) && self.animation.is_none()
            && self.state.velocity == Vec2::ZERO
            && self.state.scale_velocity == 0.0;
        if caught {
            self.enter(TrackerPhase::Idle);
        }
    }

    fn set_values(&mut self, position: Vec2, scale: f64) -> bool {
        if position == self.state.position && scale == self.state.scale {
            return false;
        }
        self.state.position = position;
        self.state.scale = scale;
        self.events.push(TrackerEvent::ValuesChanged { position, scale });
        true
    }

    fn enter(&mut self, phase: TrackerPhase) {
        if self.phase == phase {
            return;
        }
        tracing::debug!(
            tracker = self.id.0,
            from = ?self.phase,
            to = ?phase,
            "tracker phase transition"
        );
        self.phase = phase;
        self.events.push(match phase {
            TrackerPhase::Idle => TrackerEvent::IdleEntered,
            TrackerPhase::Interacting => TrackerEvent::InteractingEntered,
            TrackerPhase::Inertia => TrackerEvent::InertiaEntered {
                velocity: self.state.velocity,
                scale_velocity: self.state.scale_velocity,
            },
            TrackerPhase::CustomAnimation => TrackerEvent::CustomAnimationEntered,
        });
    }
}

/// Debug snapshot of an [`InertialTracker`].
#[derive(Clone, Copy, Debug)]
pub struct TrackerDebugInfo {
    /// Tracker identity.
    pub id: OwnerId,
    /// Current phase.
    pub phase: TrackerPhase,
    /// Current state.
    pub state: TrackerState,
    /// Active configuration.
    pub config: ManipulationConfig,
    /// Number of attached sources.
    pub sources: usize,
    /// Whether any source holds a contact.
    pub capturing: bool,
    /// Events waiting to be drained.
    pub pending_events: usize,
}
