// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contact set: turn per-finger positions into centroid and spread deltas.
//!
//! ## Usage
//!
//! 1) Add each redirected contact with [`ContactSet::add`].
//! 2) On each move event, call [`ContactSet::update`] to get the centroid
//!    translation and the spread ratio since the previous event.
//! 3) Remove lifted contacts with [`ContactSet::remove`]. Adding or removing
//!    a contact re-baselines the centroid, so no jump is reported.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use tactile_source::{ContactSet, PointerId};
//!
//! let mut contacts = ContactSet::default();
//! contacts.add(PointerId(0), Point::new(0.0, 0.0));
//! contacts.add(PointerId(1), Point::new(100.0, 0.0));
//!
//! // Second finger moves outward: centroid shifts right, spread doubles.
//! let delta = contacts.update(PointerId(1), Point::new(200.0, 0.0)).unwrap();
//! assert_eq!(delta.translation, Vec2::new(50.0, 0.0));
//! assert!((delta.scale - 2.0).abs() < 1e-12);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::pointer::PointerId;

/// Spreads below this many units are measured as this many units.
const MIN_SPREAD: f64 = 1.0;

/// Contacts held inline before spilling to the heap.
const INLINE_CONTACTS: usize = 4;

/// A single tracked contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Pointer that owns the contact.
    pub id: PointerId,
    /// Last known position.
    pub position: Point,
}

/// Movement of the contact set between two consecutive events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactDelta {
    /// Centroid translation.
    pub translation: Vec2,
    /// Spread ratio (new / old). `1.0` when fewer than two contacts.
    pub scale: f64,
    /// Centroid after the move.
    pub centroid: Point,
}

/// Tracks the active contacts of one gesture.
#[derive(Clone, Debug, Default)]
pub struct ContactSet {
    contacts: SmallVec<[Contact; INLINE_CONTACTS]>,
    travel: Vec2,
}

impl ContactSet {
    /// Starts tracking `id` at `pos`. Updates the position if already tracked.
    pub fn add(&mut self, id: PointerId, pos: Point) {
        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) {
            contact.position = pos;
        } else {
            self.contacts.push(Contact { id, position: pos });
        }
    }

    /// Moves contact `id` to `pos`, returning the set's movement.
    ///
    /// Returns `None` if `id` is not tracked.
    pub fn update(&mut self, id: PointerId, pos: Point) -> Option<ContactDelta> {
        let index = self.contacts.iter().position(|c| c.id == id)?;
        let old_centroid = self.centroid()?;
        let old_spread = self.spread(old_centroid);

        self.contacts[index].position = pos;

        let centroid = self.centroid()?;
        let spread = self.spread(centroid);
        let translation = centroid - old_centroid;
        self.travel += translation;

        // Spreads are floored so a pinch that collapses and reopens returns
        // to the scale it started from.
        let scale = if self.contacts.len() >= 2 {
            spread.max(MIN_SPREAD) / old_spread.max(MIN_SPREAD)
        } else {
            1.0
        };

        Some(ContactDelta {
            translation,
            scale,
            centroid,
        })
    }

    /// Stops tracking `id`. Returns `true` if it was tracked.
    pub fn remove(&mut self, id: PointerId) -> bool {
        let before = self.contacts.len();
        self.contacts.retain(|c| c.id != id);
        before != self.contacts.len()
    }

    /// Forgets every contact and the accumulated travel.
    pub fn clear(&mut self) {
        self.contacts.clear();
        self.travel = Vec2::ZERO;
    }

    /// Returns `true` if `id` is tracked.
    #[must_use]
    pub fn contains(&self, id: PointerId) -> bool {
        self.contacts.iter().any(|c| c.id == id)
    }

    /// Number of tracked contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Returns `true` if no contact is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Tracked contacts in insertion order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Mean position of all contacts.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        if self.contacts.is_empty() {
            return None;
        }
        let sum = self
            .contacts
            .iter()
            .fold(Vec2::ZERO, |acc, c| acc + c.position.to_vec2());
        Some((sum / self.contacts.len() as f64).to_point())
    }

    /// Total centroid translation since the set was last cleared.
    #[must_use]
    pub fn travel(&self) -> Vec2 {
        self.travel
    }

    fn spread(&self, centroid: Point) -> f64 {
        if self.contacts.is_empty() {
            return 0.0;
        }
        let total: f64 = self
            .contacts
            .iter()
            .map(|c| (c.position - centroid).hypot())
            .sum();
        total / self.contacts.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_is_empty() {
        let contacts = ContactSet::default();
        assert!(contacts.is_empty());
        assert_eq!(contacts.centroid(), None);
        assert_eq!(contacts.travel(), Vec2::ZERO);
    }

    #[test]
    fn single_contact_translates_without_scaling() {
        let mut contacts = ContactSet::default();
        contacts.add(PointerId(1), Point::new(10.0, 20.0));

        let delta = contacts.update(PointerId(1), Point::new(15.0, 25.0)).unwrap();

        assert_eq!(delta.translation, Vec2::new(5.0, 5.0));
        assert_eq!(delta.scale, 1.0);
        assert_eq!(delta.centroid, Point::new(15.0, 25.0));
    }

    #[test]
    fn update_of_unknown_contact_returns_none() {
        let mut contacts = ContactSet::default();
        contacts.add(PointerId(1), Point::new(0.0, 0.0));

        assert_eq!(contacts.update(PointerId(2), Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn multiple_updates_track_incremental_deltas() {
        let mut contacts = ContactSet::default();
        contacts.add(PointerId(1), Point::new(0.0, 0.0));

        let d1 = contacts.update(PointerId(1), Point::new(5.0, 3.0)).unwrap();
        assert_eq!(d1.translation, Vec2::new(5.0, 3.0));

        let d2 = contacts.update(PointerId(1), Point::new(8.0, 7.0)).unwrap();
        assert_eq!(d2.translation, Vec2::new(3.0, 4.0));

        assert_eq!(contacts.travel(), Vec2::new(8.0, 7.0));
    }

    #[test]
    fn pinch_in_halves_scale() {
        let mut contacts = ContactSet::default();
        contacts.add(PointerId(1), Point::new(-100.0, 0.0));
        contacts.add(PointerId(2), Point::new(100.0, 0.0));

        contacts.update(PointerId(1), Point::new(-50.0, 0.0));
        let delta = contacts.update(PointerId(2), Point::new(50.0, 0.0)).unwrap();

        // Spread went 100 -> 75 -> 50 overall.
        let overall = 0.75 * delta.scale;
        assert!((overall - 0.5).abs() < 1e-12);
        assert_eq!(delta.centroid, Point::ZERO);
    }

    #[test]
    fn adding_contact_rebaselines_centroid() {
        let mut contacts = ContactSet::default();
        contacts.add(PointerId(1), Point::new(0.0, 0.0));
        contacts.add(PointerId(2), Point::new(100.0, 100.0));

        // Centroid jumped to (50, 50) but nothing was reported yet; the next
        // move only reports its own contribution.
        let delta = contacts.update(PointerId(2), Point::new(110.0, 100.0)).unwrap();
        assert_eq!(delta.translation, Vec2::new(5.0, 0.0));
        assert_eq!(contacts.travel(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn coincident_contacts_measure_from_minimum_spread() {
        let mut contacts = ContactSet::default();
        contacts.add(PointerId(1), Point::new(10.0, 10.0));
        contacts.add(PointerId(2), Point::new(10.0, 10.0));

        let still = contacts.update(PointerId(2), Point::new(10.2, 10.0)).unwrap();
        assert_eq!(still.scale, 1.0);
    }

    #[test]
    fn collapsed_pinch_reopens_to_original_scale() {
        let mut contacts = ContactSet::default();
        contacts.add(PointerId(1), Point::new(0.0, 0.0));
        contacts.add(PointerId(2), Point::new(200.0, 0.0));

        let mut total = 1.0;
        // Close to a spread of 0.25, then back to 100.
        for x in [100.0, 0.5, 100.0, 200.0] {
            total *= contacts.update(PointerId(2), Point::new(x, 0.0)).unwrap().scale;
        }

        assert!((total - 1.0).abs() < 1e-12, "round trip scale was {total}");
    }

    #[test]
    fn remove_and_clear() {
        let mut contacts = ContactSet::default();
        contacts.add(PointerId(1), Point::new(0.0, 0.0));
        contacts.add(PointerId(2), Point::new(10.0, 0.0));

        assert!(contacts.remove(PointerId(1)));
        assert!(!contacts.remove(PointerId(1)));
        assert_eq!(contacts.len(), 1);
        assert!(contacts.contains(PointerId(2)));

        contacts.update(PointerId(2), Point::new(20.0, 0.0));
        contacts.clear();
        assert!(contacts.is_empty());
        assert_eq!(contacts.travel(), Vec2::ZERO);
    }

    #[test]
    fn re_adding_contact_moves_it() {
        let mut contacts = ContactSet::default();
        contacts.add(PointerId(1), Point::new(0.0, 0.0));
        contacts.add(PointerId(1), Point::new(4.0, 4.0));

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts.centroid(), Some(Point::new(4.0, 4.0)));
    }
}
