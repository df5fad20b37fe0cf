// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer ownership registry.
//!
//! While a gesture is being redirected, its pointer belongs to exactly one
//! owner (usually a tracker). Every owner that can redirect pointers on a
//! given surface shares one [`PointerClaims`] so that a second redirect of
//! the same pointer is refused instead of splitting the event stream.
//!
//! ```
//! use tactile_source::{OwnerId, PointerClaims, PointerId};
//!
//! let mut claims = PointerClaims::new();
//! let a = OwnerId(1);
//! let b = OwnerId(2);
//!
//! assert_eq!(claims.claim(PointerId(7), a), Ok(()));
//! // Claiming again for the same owner is a no-op.
//! assert_eq!(claims.claim(PointerId(7), a), Ok(()));
//! // A different owner is refused and told who holds the pointer.
//! assert_eq!(claims.claim(PointerId(7), b), Err(a));
//!
//! claims.release(PointerId(7), a);
//! assert_eq!(claims.owner(PointerId(7)), None);
//! ```

use hashbrown::HashMap;

use crate::pointer::PointerId;

/// Identity of a pointer owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnerId(pub u32);

/// Shared map of which owner currently holds each redirected pointer.
#[derive(Clone, Debug, Default)]
pub struct PointerClaims {
    owners: HashMap<PointerId, OwnerId>,
}

impl PointerClaims {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `pointer` for `owner`.
    ///
    /// Returns `Err` with the current owner if the pointer already belongs to
    /// someone else. Re-claiming by the same owner succeeds.
    pub fn claim(&mut self, pointer: PointerId, owner: OwnerId) -> Result<(), OwnerId> {
        match self.owners.get(&pointer) {
            Some(&current) if current != owner => Err(current),
            Some(_) => Ok(()),
            None => {
                self.owners.insert(pointer, owner);
                Ok(())
            }
        }
    }

    /// Releases `pointer` if it is held by `owner`.
    ///
    /// Returns `true` if a claim was removed.
    pub fn release(&mut self, pointer: PointerId, owner: OwnerId) -> bool {
        if self.owners.get(&pointer) == Some(&owner) {
            self.owners.remove(&pointer);
            true
        } else {
            false
        }
    }

    /// Releases every pointer held by `owner`.
    pub fn release_all(&mut self, owner: OwnerId) {
        self.owners.retain(|_, held_by| *held_by != owner);
    }

    /// Returns the owner of `pointer`, if claimed.
    #[must_use]
    pub fn owner(&self, pointer: PointerId) -> Option<OwnerId> {
        self.owners.get(&pointer).copied()
    }

    /// Number of pointers currently claimed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns `true` if no pointer is claimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
