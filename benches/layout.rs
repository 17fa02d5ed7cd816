// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Canopy-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canopy and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use canopy::gesture::{GestureContext, GestureEvent, GestureHost, RenderOffsets};
use canopy::layout::{layout_forest, LayoutMetrics, Point, ValidationPolicy};
use canopy::model::SiblingOrder;
use canopy::render::{render_forest_unicode, RenderOptions};

mod fixtures;
mod profiler;

const CASES: [(&str, fixtures::Case); 3] = [
    ("wide", fixtures::Case::Wide),
    ("deep", fixtures::Case::Deep),
    ("bushy", fixtures::Case::Bushy),
];

// Group names (`layout.forest`, `layout.render`, `layout.drag`) and case IDs stay stable so
// results remain comparable across refactors.
fn benches_layout(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("layout.forest");
        for (case_id, case) in CASES {
            let forest = fixtures::fixture(case);
            let metrics = LayoutMetrics::pixels();
            group.throughput(Throughput::Elements(forest.nodes().len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let layout =
                        layout_forest(black_box(&forest), &metrics, ValidationPolicy::Strict)
                            .expect("layout");
                    black_box(layout.nodes().len())
                })
            });
        }
        group.finish();
    }

    {
        let mut group = c.benchmark_group("layout.render");
        for (case_id, case) in CASES {
            let metrics = LayoutMetrics::cells();
            let layout = layout_forest(&fixtures::fixture(case), &metrics, ValidationPolicy::Strict)
                .expect("layout");
            let offsets = RenderOffsets::at_rest(&layout, &metrics, 0);
            group.throughput(Throughput::Elements(layout.nodes().len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let text = render_forest_unicode(
                        black_box(&layout),
                        &offsets,
                        RenderOptions::default(),
                    )
                    .expect("render");
                    black_box(text.len())
                })
            });
        }
        group.finish();
    }

    {
        // One column dragged across the whole root row, a move per column.
        let mut group = c.benchmark_group("layout.drag");
        for (case_id, case) in CASES {
            let metrics = LayoutMetrics::pixels();
            let layout = layout_forest(&fixtures::fixture(case), &metrics, ValidationPolicy::Strict)
                .expect("layout");
            let sibling_order = SiblingOrder::new();
            let ctx = GestureContext {
                layout: &layout,
                sibling_order: &sibling_order,
                separator_index: None,
                metrics: &metrics,
            };
            let Some(last) = layout.root_siblings().last().cloned() else {
                continue;
            };
            let start = layout.node(last.as_str()).expect("node").rect();
            let steps = layout.root_siblings().len();
            group.throughput(Throughput::Elements(steps as u64));
            group.bench_function(case_id, |b| {
                b.iter(|| {
                    let mut host = GestureHost::new();
                    let mut events = Vec::<GestureEvent>::new();
                    let grab = Point::new(start.center_x(), start.top());
                    host.start_reorder(&ctx, last.as_str(), grab);
                    for step in 1..=steps {
                        let dx = start.width * step as f64;
                        host.pointer_move(&ctx, Point::new(grab.x - dx, grab.y), &mut events);
                    }
                    host.pointer_up(&ctx, &mut events);
                    black_box(events.len())
                })
            });
        }
        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_layout
}
criterion_main!(benches);
