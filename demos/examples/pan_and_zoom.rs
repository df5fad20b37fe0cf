// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan and zoom a canvas with touch.
//!
//! Replays a pinch followed by a fling against a tracker configured for an
//! 800x600 canvas, and logs what a renderer would apply each frame.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p tactile_demos --example pan_and_zoom`

use kurbo::{Point, Rect, Size, Vec2};
use tactile_demos::{pinch, swipe};
use tactile_source::{DeviceFilter, PointerEvent, PointerPhase, SourceConfig};
use tactile_tracker::{
    InertialTracker, LayerBinding, ManipulationConfig, OwnerId, PointerClaims, RequestIgnored,
    TrackerObserver, TrackerPhase,
};
use tracing_subscriber::EnvFilter;

/// Upper bound on coasting frames, in case the config never settles.
const MAX_FRAMES: u32 = 2_000;

/// Logs tracker notifications.
#[derive(Debug, Default)]
struct Logger {
    changes: usize,
}

impl TrackerObserver for Logger {
    fn interacting_entered(&mut self) {
        tracing::info!("interacting");
    }

    fn values_changed(&mut self, _position: Vec2, _scale: f64) {
        self.changes += 1;
    }

    fn inertia_entered(&mut self, velocity: Vec2, scale_velocity: f64) {
        tracing::info!(vx = velocity.x, vy = velocity.y, vs = scale_velocity, "inertia");
    }

    fn idle_entered(&mut self) {
        tracing::info!(changes = self.changes, "idle");
    }

    fn request_ignored(&mut self, notice: RequestIgnored) {
        tracing::warn!(
            pointer = notice.pointer.0,
            held_by = notice.held_by.0,
            "redirect ignored"
        );
    }
}

struct Page {
    view: Rect,
    claims: PointerClaims,
    tracker: InertialTracker,
    layer: LayerBinding,
    logger: Logger,
}

impl Page {
    fn new(view: Size) -> Result<Self, tactile_tracker::ConfigError> {
        let config = ManipulationConfig::for_view_size(view)
            .with_scale_range(0.9, 12.0)
            .with_scale_decay_rate(0.95);
        let mut tracker = InertialTracker::new(OwnerId(1), config)?;
        tracker.add_source(
            SourceConfig::default().with_devices(DeviceFilter::TOUCH | DeviceFilter::TOUCHPAD),
        );
        Ok(Self {
            view: view.to_rect(),
            claims: PointerClaims::new(),
            tracker,
            layer: LayerBinding::new(),
            logger: Logger::default(),
        })
    }

    fn pointer(&mut self, event: &PointerEvent) {
        if event.phase == PointerPhase::Down {
            self.tracker.try_redirect(&mut self.claims, event);
        } else {
            self.tracker.handle_pointer(&mut self.claims, event);
        }
    }

    fn frame(&mut self) {
        self.tracker.tick();
        self.tracker.dispatch_events(&mut self.logger);
        if let Some(transform) = self.layer.update(self.tracker.state()) {
            let visible = transform.visible_content_rect(self.view);
            tracing::debug!(
                x = transform.offset.x,
                y = transform.offset.y,
                scale = transform.scale,
                visible = ?visible,
                "layer transform"
            );
        }
    }

    fn replay(&mut self, events: &[PointerEvent]) {
        // One frame per distinct timestamp.
        let mut last_time = None;
        for event in events {
            if last_time.is_some_and(|t| t != event.time) {
                self.frame();
            }
            last_time = Some(event.time);
            self.pointer(event);
        }
        self.frame();
    }

    fn settle(&mut self) {
        let mut frames = 0;
        while self.tracker.phase() != TrackerPhase::Idle && frames < MAX_FRAMES {
            self.frame();
            frames += 1;
        }
        tracing::info!(frames, "settled");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut page = match Page::new(Size::new(800.0, 600.0)) {
        Ok(page) => page,
        Err(err) => {
            tracing::error!(%err, "invalid manipulation config");
            return;
        }
    };

    // Zoom in around the middle of the canvas.
    page.replay(&pinch(Point::new(400.0, 300.0), 100.0, 300.0, 12, 0));
    page.settle();

    // Fling towards the top-left; the content keeps sliding after the lift.
    page.replay(&swipe(
        7,
        Point::new(600.0, 450.0),
        Point::new(300.0, 200.0),
        10,
        1_000,
    ));
    page.settle();

    let info = page.tracker.debug_info();
    println!(
        "final position = ({:.1}, {:.1}), scale = {:.3}, layer updates = {}",
        info.state.position.x,
        info.state.position.y,
        info.state.scale,
        page.layer.debug_info().updates,
    );
}
