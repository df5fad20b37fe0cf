// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};
use tactile_tracker::{InertialTracker, ManipulationConfig, ManipulationSample, OwnerId};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        f64::from((self.0 >> 32) as u32) / f64::from(u32::MAX)
    }
}

fn samples(count: usize, seed: u64) -> Vec<ManipulationSample> {
    let mut rng = Lcg(seed);
    (0..count)
        .map(|_| ManipulationSample {
            delta_position: Vec2::new(rng.next_unit() * 40.0 - 20.0, rng.next_unit() * 40.0 - 20.0),
            delta_scale: 0.95 + rng.next_unit() * 0.1,
            center: Point::new(400.0, 300.0),
        })
        .collect()
}

fn bounded_config() -> ManipulationConfig {
    ManipulationConfig::default()
        .with_position_range(Vec2::new(-8_000.0, -6_000.0), Vec2::new(8_000.0, 6_000.0))
        .with_scale_range(0.9, 12.0)
}

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("tactile_tracker");
    group.sample_size(50);

    for &n in &[64_usize, 1_024] {
        let input = samples(n, 0x7AC7_0000_0000_0001);
        group.bench_function(format!("apply_sample(n={n})"), |b| {
            b.iter_batched(
                || InertialTracker::new(OwnerId(0), bounded_config()).unwrap(),
                |mut tracker| {
                    for sample in &input {
                        tracker.apply_sample(sample);
                    }
                    black_box(tracker.drain_events().count());
                },
                BatchSize::SmallInput,
            );
        });
    }

    for &decay in &[0.9_f64, 0.96, 0.99] {
        group.bench_function(format!("inertia_to_rest(decay={decay})"), |b| {
            b.iter_batched(
                || {
                    let config = bounded_config().with_decay_rate(decay);
                    let mut tracker = InertialTracker::new(OwnerId(0), config).unwrap();
                    tracker.start_inertia(Vec2::new(120.0, -80.0), 0.02);
                    tracker
                },
                |mut tracker| {
                    let mut ticks = 0_u32;
                    while tracker.tick() {
                        ticks += 1;
                    }
                    black_box((ticks, tracker.drain_events().count()));
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tracker);
criterion_main!(benches);
