//! Performance benchmarks for deskwm
//!
//! These benchmarks cover the hot paths of an interactive session: stacking
//! updates, pointer moves during a gesture and hit testing.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use deskwm::{
    config::{DeskConfig, WindowConfig},
    desktop::Desktop,
    window::{WindowId, WindowKind, WindowManager, WindowSpec},
};

fn manager_with(window_count: usize) -> (WindowManager, Vec<WindowId>) {
    let mut manager = WindowManager::new(&WindowConfig::default());
    let ids = (0..window_count)
        .map(|i| manager.open(WindowSpec::new(format!("Window {}", i), WindowKind::App)))
        .collect();
    (manager, ids)
}

/// Benchmark focus changes across stacks of different sizes
fn bench_focus_cycling(c: &mut Criterion) {
    let mut group = c.benchmark_group("focus_cycling");

    for window_count in [10, 50, 100, 500].iter() {
        group.bench_with_input(
            format!("focus_all_{}_windows", window_count),
            window_count,
            |b, &window_count| {
                b.iter_batched(
                    || manager_with(window_count),
                    |(mut manager, ids)| {
                        for id in &ids {
                            manager.focus(*id);
                        }
                        black_box(manager.focused_window_id());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Benchmark render order computation
fn bench_render_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_order");

    for window_count in [10, 100, 500].iter() {
        let (manager, _) = manager_with(*window_count);
        group.bench_function(format!("render_order_{}_windows", window_count), |b| {
            b.iter(|| black_box(manager.get_render_order().len()))
        });
    }

    group.finish();
}

/// Benchmark a drag gesture of 100 pointer moves
fn bench_drag_gesture(c: &mut Criterion) {
    c.bench_function("drag_100_moves", |b| {
        b.iter_batched(
            || {
                let mut desktop = Desktop::new(DeskConfig::default());
                desktop.launch(0);
                desktop
            },
            |mut desktop| {
                desktop.pointer_down_at(300, 110);
                for step in 0..100 {
                    black_box(desktop.pointer_move(300 + step, 110 + step));
                }
                desktop.pointer_up(400, 210);
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark hit testing through a deep stack
fn bench_hit_testing(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_testing");

    for window_count in [10, 100].iter() {
        let mut desktop = Desktop::new(DeskConfig::default());
        for _ in 0..*window_count {
            desktop.launch(1);
        }

        group.bench_function(format!("hit_test_{}_windows", window_count), |b| {
            b.iter(|| {
                black_box(desktop.hit_test(black_box(500), black_box(400)));
                black_box(desktop.hit_test(black_box(1500), black_box(900)));
                black_box(desktop.hit_test(black_box(100), black_box(1050)));
            })
        });
    }

    group.finish();
}

/// Benchmark snapshot construction and serialization
fn bench_snapshot(c: &mut Criterion) {
    let mut desktop = Desktop::new(DeskConfig::default());
    for _ in 0..50 {
        desktop.launch(0);
    }

    c.bench_function("snapshot_50_windows_json", |b| {
        b.iter(|| {
            let snapshot = desktop.snapshot();
            black_box(serde_json::to_string(&snapshot).map(|json| json.len()))
        })
    });
}

criterion_group!(
    benches,
    bench_focus_cycling,
    bench_render_order,
    bench_drag_gesture,
    bench_hit_testing,
    bench_snapshot
);

criterion_main!(benches);
