// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame layer transform derived from tracker state.
//!
//! Instead of binding the layer to live expressions, the render loop calls
//! [`LayerTransform::from_state`] (or [`LayerBinding::update`]) once per frame
//! and applies the result to its visual subtree.

use kurbo::{Affine, Point, Rect, Vec2};

use crate::state::TrackerState;

/// Offset and uniform scale to apply to a rendered layer.
///
/// Content points map to view points as `offset + scale * p`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerTransform {
    /// Translation applied after scaling; `-position` of the tracker.
    pub offset: Vec2,
    /// Uniform zoom factor.
    pub scale: f64,
}

impl LayerTransform {
    /// No translation, unit zoom.
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
    };

    /// Translate by `-position`, scale by `scale`.
    #[must_use]
    pub fn from_state(state: &TrackerState) -> Self {
        Self {
            offset: -state.position,
            scale: state.scale,
        }
    }

    /// Content → view transform.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Maps a content-space point into view space.
    #[must_use]
    pub fn content_to_view_point(&self, pt: Point) -> Point {
        (pt.to_vec2() * self.scale + self.offset).to_point()
    }

    /// Maps a view-space point into content space.
    #[must_use]
    pub fn view_to_content_point(&self, pt: Point) -> Point {
        ((pt.to_vec2() - self.offset) / self.scale).to_point()
    }

    /// Content-space rectangle visible through `view_rect`.
    #[must_use]
    pub fn visible_content_rect(&self, view_rect: Rect) -> Rect {
        // Uniform positive scale keeps corners ordered.
        Rect::from_points(
            self.view_to_content_point(view_rect.origin()),
            self.view_to_content_point(Point::new(view_rect.max_x(), view_rect.max_y())),
        )
    }
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Caches the last applied transform so layers are only touched on change.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayerBinding {
    applied: Option<LayerTransform>,
    frames: u64,
    updates: u64,
}

impl LayerBinding {
    /// Creates an unbound layer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the transform for this frame.
    ///
    /// Returns `Some` only if it differs from the previously applied one.
    pub fn update(&mut self, state: &TrackerState) -> Option<LayerTransform> {
        self.frames += 1;
        let next = LayerTransform::from_state(state);
        if self.applied == Some(next) {
            return None;
        }
        self.applied = Some(next);
        self.updates += 1;
        Some(next)
    }

    /// The transform currently applied to the layer.
    #[must_use]
    pub fn applied(&self) -> Option<LayerTransform> {
        self.applied
    }

    /// Snapshot of the binding for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> LayerBindingDebugInfo {
        LayerBindingDebugInfo {
            applied: self.applied,
            frames: self.frames,
            updates: self.updates,
        }
    }
}

/// Debug snapshot of a [`LayerBinding`].
#[derive(Clone, Copy, Debug)]
pub struct LayerBindingDebugInfo {
    /// Transform currently applied.
    pub applied: Option<LayerTransform>,
    /// Frames recomputed.
    pub frames: u64,
    /// Frames that produced a new transform.
    pub updates: u64,
}
