// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use tactile_source::{
    ManipulationSource, OwnerId, PointerClaims, PointerEvent, PointerPhase, SourceConfig,
};

/// `fingers` contacts circling and spreading for `moves` frames.
fn gesture(fingers: u64, moves: u64) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    let at = |finger: u64, frame: u64| {
        let angle = std::f64::consts::TAU * finger as f64 / fingers as f64 + frame as f64 * 0.01;
        let radius = 50.0 + frame as f64 * 0.5;
        Point::new(400.0 + radius * angle.cos(), 300.0 + radius * angle.sin())
    };
    for finger in 0..fingers {
        events.push(PointerEvent::touch(finger, PointerPhase::Down, at(finger, 0), 0));
    }
    for frame in 1..=moves {
        for finger in 0..fingers {
            events.push(PointerEvent::touch(
                finger,
                PointerPhase::Move,
                at(finger, frame),
                frame * 16,
            ));
        }
    }
    for finger in 0..fingers {
        events.push(PointerEvent::touch(
            finger,
            PointerPhase::Up,
            at(finger, moves),
            moves * 16,
        ));
    }
    events
}

fn bench_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("tactile_source");
    group.sample_size(50);

    for &fingers in &[1_u64, 2, 4] {
        let events = gesture(fingers, 256);
        group.bench_function(format!("samples(fingers={fingers},moves=256)"), |b| {
            b.iter_batched(
                || {
                    (
                        PointerClaims::new(),
                        ManipulationSource::new(OwnerId(0), SourceConfig::default()),
                    )
                },
                |(mut claims, mut source)| {
                    let mut stream = source.samples(&mut claims, events.iter().copied());
                    let total: f64 = stream.by_ref().map(|s| s.delta_scale).product();
                    black_box((total, stream.gesture_end()));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_source);
criterion_main!(benches);
