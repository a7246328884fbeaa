// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use lookout_observe::{Record, Viewport};
use lookout_tracker::active::ActiveSection;

const SECTION_H: f64 = 900.0;

fn page(n: usize) -> (Viewport, Vec<String>) {
    let mut viewport = Viewport::new(Size::new(1280.0, 720.0));
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let y = i as f64 * SECTION_H;
        let id = format!("section-{i}");
        viewport.insert_named(id.clone(), Rect::new(0.0, y, 1280.0, y + SECTION_H));
        ids.push(id);
    }
    (viewport, ids)
}

/// Two batches that move the winner back and forth.
fn batches(viewport: &mut Viewport, n: usize) -> (Vec<Record>, Vec<Record>) {
    let _ = viewport.take_records();
    viewport.scroll_to(n as f64 * SECTION_H * 0.5);
    let a = viewport.take_records();
    viewport.scroll_to(n as f64 * SECTION_H * 0.5 + SECTION_H);
    let b = viewport.take_records();
    (a, b)
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("active_section_process");
    for &n in &[4_usize, 64, 512] {
        let (mut viewport, ids) = page(n);
        let mut active = ActiveSection::new();
        active.register(ids, &mut viewport);
        let (a, b) = batches(&mut viewport, n);
        group.throughput(Throughput::Elements((a.len() + b.len()) as u64));
        group.bench_function(format!("sections_{n}"), |bencher| {
            bencher.iter(|| {
                black_box(active.process(black_box(&a)));
                black_box(active.process(black_box(&b)));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_process);
criterion_main!(benches);
