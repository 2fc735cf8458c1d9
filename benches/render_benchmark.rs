//! Benchmark for layered plot rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use layerplot::prelude::*;

fn rows(size: usize) -> Vec<Row> {
    (0..size)
        .map(|i| {
            let x = i as f32;
            Row::new()
                .with("x", x)
                .with("y", x.sin())
                .with("e", 0.1 + (x * 0.1).cos().abs() * 0.2)
                .with("g", format!("s{}", i % 5))
        })
        .collect()
}

fn plot(size: usize) -> Plot {
    Plot::new()
        .dimensions(800, 600)
        .data(rows(size))
        .aes(Aes::new().x("x").y("y").color("g"))
        .layer(Layer::new(PathGeom::new()).aes(Aes::new().group("g")))
        .layer(Layer::new(ErrorBarGeom::new()).aes(Aes::new().error("e")))
        .layer(Layer::new(PointGeom::new()))
}

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("layered_plot");

    for size in [100, 1_000, 10_000] {
        let plot = plot(size);

        group.bench_with_input(BenchmarkId::new("draw_list", size), &size, |b, _| {
            b.iter(|| {
                let mut canvas = DrawList::new();
                black_box(&plot).render(&mut canvas).unwrap();
                canvas
            });
        });

        group.bench_with_input(BenchmarkId::new("svg", size), &size, |b, _| {
            b.iter(|| black_box(&plot).to_svg().unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, render_benchmark);
criterion_main!(benches);
