use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use depth_video_rs::depth_pipeline::{DepthFrame, pack_frame, pack_value, unpack_frame};

fn generate_depth_frame(width: usize, height: usize) -> DepthFrame {
    let data = (0..width * height)
        .map(|i| (i % 4096) as f32 * 0.25 - 512.0)
        .collect();
    DepthFrame { width, height, data }
}

fn benchmark_pack_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_frame");

    let sizes = vec![
        (640, 480, "640x480"),
        (1920, 1080, "1920x1080"),
        (3840, 2160, "3840x2160"),
    ];

    for (width, height, label) in sizes {
        let frame = generate_depth_frame(width, height);
        group.throughput(Throughput::Bytes((width * height * 4) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, frame| {
            b.iter(|| pack_frame(black_box(frame)));
        });
    }

    group.finish();
}

fn benchmark_bulk_vs_per_pixel(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_vs_per_pixel");
    let frame = generate_depth_frame(1920, 1080);

    group.bench_function("bulk", |b| {
        b.iter(|| pack_frame(black_box(&frame)));
    });

    group.bench_function("per_pixel", |b| {
        b.iter(|| {
            black_box(&frame)
                .data
                .iter()
                .flat_map(|&v| pack_value(v))
                .collect::<Vec<u8>>()
        });
    });

    group.finish();
}

fn benchmark_unpack(c: &mut Criterion) {
    let packed = pack_frame(&generate_depth_frame(1920, 1080));

    c.bench_function("unpack_frame_1920x1080", |b| {
        b.iter(|| unpack_frame(black_box(&packed)));
    });
}

criterion_group!(
    benches,
    benchmark_pack_sizes,
    benchmark_bulk_vs_per_pixel,
    benchmark_unpack
);
criterion_main!(benches);
