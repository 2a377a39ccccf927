use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use forgery_detector::preprocess::Preprocessor;
use image::{DynamicImage, Rgb, RgbImage};

fn bench_preprocess(c: &mut Criterion) {
    let preprocessor = Preprocessor::new();
    let mut group = c.benchmark_group("preprocess");

    for (width, height) in [(256, 256), (1024, 768), (4000, 3000)] {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8])
        }));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &image,
            |b, image| b.iter(|| preprocessor.process(black_box(image))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_preprocess);
criterion_main!(benches);
