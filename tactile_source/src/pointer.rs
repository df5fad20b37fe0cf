// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw pointer input as delivered by the windowing layer.

use kurbo::Point;

/// Identifier of a single pointer (one finger, one pen, the mouse).
///
/// Ids are assigned by the windowing layer and stay stable from press to
/// release. They may be reused after release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerId(pub u64);

/// Device class that produced a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    /// A finger on a touch screen.
    Touch,
    /// A precision touchpad capable of reporting contacts.
    Touchpad,
    /// A stylus.
    Pen,
    /// A mouse or other indirect pointing device.
    Mouse,
}

/// Lifecycle phase of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    /// Contact started (press).
    Down,
    /// Contact moved.
    Move,
    /// Contact lifted (release).
    Up,
    /// The platform took the pointer away; no release velocity applies.
    Cancel,
}

/// A single pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// Which pointer this event belongs to.
    pub id: PointerId,
    /// Device class of the pointer.
    pub kind: PointerKind,
    /// Phase of the event.
    pub phase: PointerPhase,
    /// Position in view coordinates.
    pub position: Point,
    /// Timestamp in milliseconds. Only differences matter.
    pub time: u64,
}

impl PointerEvent {
    /// Creates a touch event.
    #[must_use]
    pub fn touch(id: u64, phase: PointerPhase, position: Point, time: u64) -> Self {
        Self {
            id: PointerId(id),
            kind: PointerKind::Touch,
            phase,
            position,
            time,
        }
    }

    /// Returns a copy of this event with a different device class.
    #[must_use]
    pub fn with_kind(mut self, kind: PointerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns `true` if this event ends its pointer's contact.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, PointerPhase::Up | PointerPhase::Cancel)
    }
}
