#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Layered Chart Example
//!
//! Builds a plot from several layers sharing one set of scales: grouped
//! paths, error bars, points with hover text, labels and a right axis.
//!
//! Run with: `cargo run --example layered_chart`

use layerplot::prelude::*;
use layerplot::render::TextAnchor;

fn measurements() -> Vec<Row> {
    let mut rows = Vec::new();
    for (series, offset) in [("control", 0.0f32), ("treated", 1.5)] {
        for day in 0..8 {
            let t = day as f32;
            let mean = 2.0 + offset + (t * 0.6).sin() + t * 0.3;
            rows.push(
                Row::new()
                    .with("day", t)
                    .with("mean", mean)
                    .with("sd", 0.2 + t * 0.05)
                    .with("series", series)
                    .with("tip", format!("{series} day {day}: {mean:.2}")),
            );
        }
    }
    rows
}

fn main() {
    println!("Layered Chart Example");
    println!("=====================\n");

    // Example 1: Groups, error bars and points over shared scales
    println!("Example 1: Grouped Measurements");
    println!("-------------------------------");

    let mut plot = Plot::new()
        .dimensions(700, 450)
        .title("Response by day")
        .xlab("day")
        .ylab("response")
        .theme(Theme::minimal())
        .data(measurements())
        .aes(Aes::new().x("day").y("mean").color("series"))
        .layer(Layer::new(PathGeom::new()).aes(Aes::new().group("series")))
        .layer(
            Layer::new(ErrorBarGeom::new().cap_width(4.0).crisp(true))
                .aes(Aes::new().error("sd")),
        )
        .layer(Layer::new(PointGeom::new().size(4.0)).aes(Aes::new().hover_text("tip")));

    let report = plot.write_svg("layered_groups.svg").expect("Failed to write");
    println!(
        "  Saved: layered_groups.svg ({} primitives, {} layers)\n",
        report.primitives(),
        report.layers().len()
    );

    // Example 2: A layer appended later, annotated with labels
    println!("Example 2: Annotations");
    println!("----------------------");

    let peaks = vec![Row::new().with("day", 5.0).with("mean", 6.2).with("note", "peak")];
    plot.add_layer(
        Layer::new(TextGeom::new().anchor(TextAnchor::Start).offset(6.0, 6.0))
            .aes(Aes::new().label("note"))
            .data(peaks),
    );
    plot.write_svg("layered_annotated.svg").expect("Failed to write");
    println!("  Saved: layered_annotated.svg\n");

    // Example 3: Right axis on a log scale
    println!("Example 3: Dual Axis");
    println!("--------------------");

    let counts: Vec<Row> = (1..=6)
        .map(|i| {
            Row::new()
                .with("day", i as f32)
                .with("temp", 20.0 + i as f32)
                .with("cells", 10f32.powi(i))
        })
        .collect();

    let plot = Plot::new()
        .dimensions(700, 450)
        .ylab("temperature")
        .ylab_right("cells")
        .data(counts)
        .scales(ScaleSpecs {
            y_right: Some(ScaleSpec::log()),
            ..ScaleSpecs::default()
        })
        .aes(Aes::new().x("day"))
        .layer(Layer::new(PathGeom::new().color(Rgba::RED)).aes(Aes::new().y("temp")))
        .layer(
            Layer::new(PointGeom::new().shape(PointShape::Diamond))
                .aes(Aes::new().y_right("cells")),
        );

    plot.write_svg("layered_dual_axis.svg").expect("Failed to write");
    println!("  Saved: layered_dual_axis.svg\n");

    // Example 4: A misconfigured layer is reported, the rest still renders
    println!("Example 4: Failure Report");
    println!("-------------------------");

    let plot = Plot::new()
        .data(measurements())
        .aes(Aes::new().x("day").y("mean"))
        .layer(Layer::new(ErrorBarGeom::new()).name("no-error"))
        .layer(Layer::new(PointGeom::new()));

    let mut canvas = DrawList::new();
    let report = plot.render(&mut canvas).expect("Failed to render");
    for failure in report.failures() {
        println!("  layer {} ({}) failed", failure.index, failure.geom);
    }
    println!("  markers drawn: {}", canvas.marker_count());
}
