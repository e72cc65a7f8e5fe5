#[path = "../util/util.rs"]
mod util;

use util::{bench_images, random_colors};

use std::time::Duration;

use colorart::{preprocess, ColorFrequencies, PalettePipeline, Rgb};
use criterion::{
    criterion_group, criterion_main, measurement::WallTime, BenchmarkGroup, BenchmarkId,
    Criterion, SamplingMode,
};

fn group<'a>(c: &'a mut Criterion, name: &str) -> BenchmarkGroup<'a, WallTime> {
    let mut group = c.benchmark_group(name);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));
    group
}

/// The quantized pixels of each bench image and a few lengths of random colors.
fn color_inputs() -> Vec<(String, Vec<Rgb>)> {
    let mut inputs = bench_images()
        .iter()
        .map(|(path, image)| {
            let (width, height) = (image.width(), image.height());
            let pixels = preprocess::quantized_pixels(&image.to_rgba16());
            (format!("{path}/{width}x{height}"), pixels)
        })
        .collect::<Vec<_>>();

    inputs.extend(
        [100_000, 1_000_000, 10_000_000]
            .into_iter()
            .map(|len| (format!("random/{len}"), random_colors(len, 0))),
    );

    inputs
}

fn bench_colors(c: &mut Criterion, name: &str, f: impl Fn(&[Rgb]) -> ColorFrequencies) {
    let mut group = group(c, name);
    for (id, colors) in color_inputs() {
        group.bench_with_input(BenchmarkId::from_parameter(id), colors.as_slice(), |b, colors| {
            b.iter(|| f(colors));
        });
    }
}

fn color_frequencies_add(c: &mut Criterion) {
    bench_colors(c, "color_frequencies_add", |colors| {
        let mut counts = ColorFrequencies::new();
        for &color in colors {
            counts.add(color);
        }
        counts
    });
}

fn color_frequencies_bulk_single(c: &mut Criterion) {
    bench_colors(c, "color_frequencies_bulk_single", ColorFrequencies::from_colors);
}

fn color_frequencies_bulk_par(c: &mut Criterion) {
    bench_colors(c, "color_frequencies_bulk_par", ColorFrequencies::from_colors_par);
}

fn color_frequencies_sorted(c: &mut Criterion) {
    let mut group = group(c, "color_frequencies_sorted");
    for (id, colors) in color_inputs() {
        let counts = ColorFrequencies::from_colors(&colors);
        group.bench_with_input(BenchmarkId::from_parameter(id), &counts, |b, counts| {
            b.iter(|| counts.sorted());
        });
    }
}

fn palette_pipeline(c: &mut Criterion) {
    let mut group = group(c, "palette_pipeline");
    for (path, image) in bench_images() {
        let pipeline = PalettePipeline::new(image);
        group.bench_with_input(BenchmarkId::new("single", path), &pipeline, |b, pipeline| {
            b.iter(|| pipeline.palette());
        });
        group.bench_with_input(BenchmarkId::new("par", path), &pipeline, |b, pipeline| {
            b.iter(|| pipeline.palette_par());
        });
    }
}

criterion_group!(
    benches,
    color_frequencies_add,
    color_frequencies_bulk_single,
    color_frequencies_bulk_par,
    color_frequencies_sorted,
    palette_pipeline,
);
criterion_main!(benches);
