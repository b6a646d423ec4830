// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_range_slider::{
    DragTarget, Handle, RangeSlider, RangeSliderConfig, SnapConfig, SnapKind, Unit,
};

const WIDTH: f64 = 1_000.0;

fn config(kind: SnapKind, points: u32, locked: bool) -> RangeSliderConfig {
    RangeSliderConfig::default()
        .with_width(WIDTH, Unit::Px)
        .with_handle_width(20.0)
        .with_start_at(20.0, 60.0)
        .with_locked(locked)
        .with_snap(SnapConfig {
            points,
            kind,
            sensitivity: 2.0,
            marks: true,
        })
}

/// A back-and-forth sweep across the whole track.
fn sweep(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = (i % 200) as f64 / 200.0;
            let t = if (i / 200) % 2 == 0 { t } else { 1.0 - t };
            t * WIDTH
        })
        .collect()
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_slider/drag");

    // Hypothesis: snapping adds a constant per-move cost bounded by the
    // grid size, so all modes should scale linearly with the number of moves.
    let modes = [
        ("free", SnapKind::None, 0, false),
        ("hard", SnapKind::Hard, 11, false),
        ("soft", SnapKind::Soft, 11, false),
        ("locked_hard", SnapKind::Hard, 11, true),
    ];
    for len in [256usize, 4_096] {
        let moves = sweep(len);
        group.throughput(Throughput::Elements(len as u64));

        for (name, kind, points, locked) in modes {
            group.bench_with_input(BenchmarkId::new(name, len), &moves, |b, moves| {
                b.iter_batched(
                    || RangeSlider::new(config(kind, points, locked), 0.0),
                    |mut slider| {
                        slider.pointer_down(DragTarget::Handle(Handle::Low), 210.0);
                        for &raw in moves {
                            black_box(slider.pointer_move(raw));
                        }
                        black_box(slider.pointer_up());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }

    group.finish();
}

fn bench_bar_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_slider/bar_drag");
    let moves = sweep(4_096);
    group.throughput(Throughput::Elements(moves.len() as u64));

    group.bench_function("locked_hard", |b| {
        b.iter_batched(
            || RangeSlider::new(config(SnapKind::Hard, 11, true), 0.0),
            |mut slider| {
                slider.pointer_down(DragTarget::Bar, 400.0);
                for &raw in &moves {
                    black_box(slider.pointer_move(raw));
                }
                black_box(slider.pointer_up());
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_slider/resize");

    for points in [0u32, 5, 11] {
        let mut slider = RangeSlider::new(config(SnapKind::Hard, points, true), 0.0);
        let mut width = WIDTH;
        group.bench_function(BenchmarkId::from_parameter(points), |b| {
            b.iter(|| {
                width = if width >= 2.0 * WIDTH { WIDTH } else { width + 1.0 };
                slider.resize(black_box(width));
                black_box(slider.marker_offsets());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_drag, bench_bar_drag, bench_resize);
criterion_main!(benches);
