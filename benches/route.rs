// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use panelroute::model::{Point, Rect, Size};
use panelroute::route::{find_path, Router, SearchScratch};
use panelroute::RouterConfig;

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Groups in this file: `route.render_all`, `route.find_path`
// - Case IDs (the string after the `/`) must remain stable so results stay comparable.

fn comb_obstacles(teeth: usize) -> Vec<Rect> {
    // Alternating walls open at the top and bottom force a serpentine path.
    (0..teeth)
        .map(|idx| {
            let x = 100.0 + idx as f64 * 100.0;
            if idx % 2 == 0 {
                Rect::new(x, 50.0, 20.0, 900.0)
            } else {
                Rect::new(x, 0.0, 20.0, 900.0)
            }
        })
        .collect()
}

fn benches_render_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("route.render_all");

    for case in [fixtures::Case::Small, fixtures::Case::Medium, fixtures::Case::LargeDense] {
        let panel = fixtures::panel(case);
        group.throughput(Throughput::Elements(panel.connections().len() as u64));

        group.bench_function(format!("{}_cold", case.id()), |b| {
            b.iter_batched(
                || Router::new(RouterConfig::default()),
                |mut router| {
                    let paths = router.render_all(black_box(&panel));
                    black_box(fixtures::checksum_paths(paths.iter().map(|(_, p)| p.as_slice())))
                },
                BatchSize::SmallInput,
            )
        });

        let mut warm = Router::new(RouterConfig::default());
        let _ = warm.render_all(&panel);
        group.bench_function(format!("{}_warm", case.id()), |b| {
            b.iter(|| {
                let paths = warm.render_all(black_box(&panel));
                black_box(fixtures::checksum_paths(paths.iter().map(|(_, p)| p.as_slice())))
            })
        });
    }

    let panel = fixtures::panel(fixtures::Case::LargeDense);
    let config = RouterConfig { avoid_routed_wires: true, ..RouterConfig::default() };
    group.bench_function("large_dense_avoid_wires", |b| {
        b.iter_batched(
            || Router::new(config),
            |mut router| black_box(router.render_all(black_box(&panel)).len()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn benches_find_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("route.find_path");
    let bounds = Size::new(1400.0, 1000.0);

    let open: Vec<Rect> = Vec::new();
    let comb = comb_obstacles(12);
    let start = Point::new(20.0, 500.0);
    let goal = Point::new(1380.0, 500.0);

    let mut scratch = SearchScratch::new();
    group.bench_function("open_field", |b| {
        b.iter(|| {
            black_box(find_path(start, goal, black_box(&open), bounds, 10.0, 4, &mut scratch))
        })
    });
    group.bench_function("comb_12", |b| {
        b.iter(|| {
            black_box(find_path(start, goal, black_box(&comb), bounds, 10.0, 4, &mut scratch))
        })
    });
    group.bench_function("comb_12_fresh_scratch", |b| {
        b.iter_batched(
            SearchScratch::new,
            |mut fresh| black_box(find_path(start, goal, &comb, bounds, 10.0, 4, &mut fresh)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_render_all, benches_find_path
}
criterion_main!(benches);
