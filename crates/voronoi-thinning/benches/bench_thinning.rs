use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voronoi_image::{BinaryImage, ImageSize};
use voronoi_thinning::config::ThinningConfig;
use voronoi_thinning::parallel::ExecutionStrategy;
use voronoi_thinning::registry::AlgorithmRegistry;
use voronoi_thinning::thin::{Thinner, ThinningMode};

// Random discs on a background, roughly what a segmentation mask looks like.
fn create_test_image(width: usize, height: usize, blobs: usize) -> BinaryImage {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = vec![0u8; width * height];

    for _ in 0..blobs {
        let cr = rng.random_range(0..height) as isize;
        let cc = rng.random_range(0..width) as isize;
        let radius = rng.random_range(8..40isize);
        for r in (cr - radius).max(0)..(cr + radius).min(height as isize) {
            for c in (cc - radius).max(0)..(cc + radius).min(width as isize) {
                let (dr, dc) = (r - cr, c - cc);
                if dr * dr + dc * dc <= radius * radius {
                    data[r as usize * width + c as usize] = 1;
                }
            }
        }
    }

    BinaryImage::new(ImageSize { width, height }, data).unwrap()
}

fn bench_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Thinning");
    group.sample_size(10);

    let (w, h) = (640, 480);
    let src = create_test_image(w, h, 24);

    for id in AlgorithmRegistry::default().names() {
        let thinner = Thinner::default();
        group.bench_with_input(
            BenchmarkId::new(id, format!("{}x{}", w, h)),
            &src,
            |b, src| {
                b.iter(|| {
                    thinner
                        .thin(ThinningMode::CopyOnWrite(src), std::hint::black_box(id))
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("ThinningStrategy");
    group.sample_size(10);

    let (w, h) = (1280, 720);
    let src = create_test_image(w, h, 48);

    for (name, strategy) in [
        ("serial", ExecutionStrategy::Serial),
        ("parallel_rows", ExecutionStrategy::ParallelRows),
        ("fixed_4", ExecutionStrategy::Fixed(4)),
    ] {
        let thinner = Thinner::new(ThinningConfig::default().with_strategy(strategy));
        group.bench_with_input(
            BenchmarkId::new(name, format!("{}x{}", w, h)),
            &src,
            |b, src| {
                // allocate outside to measure only the thinning
                let mut dst = src.clone();
                b.iter(|| {
                    dst.as_slice_mut().copy_from_slice(src.as_slice());
                    thinner
                        .thin(ThinningMode::InPlace(&mut dst), "guo_hall_fast")
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_crop(c: &mut Criterion) {
    let mut group = c.benchmark_group("ThinningCrop");
    group.sample_size(10);

    // a few blobs in a large, mostly empty frame
    let (w, h) = (1920, 1080);
    let src = create_test_image(w, h, 3);

    for crop in [false, true] {
        let thinner = Thinner::new(ThinningConfig::default().with_crop_to_foreground(crop));
        group.bench_with_input(
            BenchmarkId::new(if crop { "cropped" } else { "full" }, format!("{}x{}", w, h)),
            &src,
            |b, src| {
                b.iter(|| {
                    thinner
                        .thin(ThinningMode::CopyOnWrite(src), "zhang_suen_fast")
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_algorithms, bench_strategies, bench_crop);
criterion_main!(benches);
