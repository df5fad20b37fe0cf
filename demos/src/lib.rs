// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Tactile demos.
//!
//! Demos replay synthetic touch traces instead of opening a window, so they
//! run anywhere and their output is reproducible.

use kurbo::Point;
use tactile_source::{PointerEvent, PointerPhase};

/// Milliseconds between generated move events.
pub const FRAME_MS: u64 = 16;

/// One finger pressed at `from`, dragged to `to` over `steps` frames, then
/// lifted. Times start at `start`.
#[must_use]
pub fn swipe(id: u64, from: Point, to: Point, steps: u32, start: u64) -> Vec<PointerEvent> {
    let mut events = Vec::with_capacity(steps as usize + 2);
    events.push(PointerEvent::touch(id, PointerPhase::Down, from, start));
    let mut time = start;
    for i in 1..=steps {
        time += FRAME_MS;
        let t = f64::from(i) / f64::from(steps.max(1));
        let position = from.lerp(to, t);
        events.push(PointerEvent::touch(id, PointerPhase::Move, position, time));
    }
    events.push(PointerEvent::touch(id, PointerPhase::Up, to, time));
    events
}

/// Two fingers spreading symmetrically about `center`, from `start_spread`
/// to `end_spread` apart horizontally.
#[must_use]
pub fn pinch(
    center: Point,
    start_spread: f64,
    end_spread: f64,
    steps: u32,
    start: u64,
) -> Vec<PointerEvent> {
    let at = |spread: f64| {
        let half = spread / 2.0;
        (
            Point::new(center.x - half, center.y),
            Point::new(center.x + half, center.y),
        )
    };
    let (left, right) = at(start_spread);
    let mut events = vec![
        PointerEvent::touch(1, PointerPhase::Down, left, start),
        PointerEvent::touch(2, PointerPhase::Down, right, start),
    ];
    let mut time = start;
    for i in 1..=steps {
        time += FRAME_MS;
        let t = f64::from(i) / f64::from(steps.max(1));
        let (left, right) = at(start_spread + (end_spread - start_spread) * t);
        events.push(PointerEvent::touch(1, PointerPhase::Move, left, time));
        events.push(PointerEvent::touch(2, PointerPhase::Move, right, time));
    }
    let (left, right) = at(end_spread);
    events.push(PointerEvent::touch(1, PointerPhase::Up, left, time));
    events.push(PointerEvent::touch(2, PointerPhase::Up, right, time));
    events
}
