// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use lookout_observe::{ObservationSource, ObserverOptions, Viewport};

const ROW_H: f64 = 240.0;

fn gallery(rows: usize) -> Viewport {
    let mut viewport = Viewport::new(Size::new(1280.0, 720.0));
    let options = ObserverOptions::active_section();
    for i in 0..rows {
        let y = i as f64 * ROW_H;
        for col in 0..3 {
            let x = col as f64 * 420.0;
            let el = viewport.insert(Rect::new(x, y, x + 400.0, y + ROW_H - 20.0));
            let _ = viewport.observe(el, &options);
        }
    }
    let _ = viewport.take_records();
    viewport
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport_scroll_take_records");
    for &rows in &[10_usize, 100, 1000] {
        let mut viewport = gallery(rows);
        let max = rows as f64 * ROW_H;
        group.throughput(Throughput::Elements((rows * 3) as u64));
        group.bench_function(format!("images_{}", rows * 3), |bencher| {
            let mut y = 0.0;
            bencher.iter(|| {
                y = (y + 37.0) % max;
                viewport.scroll_to(y);
                black_box(viewport.take_records());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scroll);
criterion_main!(benches);
