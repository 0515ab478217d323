use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::SmallRng, SeedableRng};
use retro_camfx::{apply_filter, apply_noise, FilterId, NoiseConfig, NoiseEngine, NoiseId, PixelBuffer};

fn camera_frame() -> PixelBuffer {
    let mut frame = PixelBuffer::new_black(640, 480);
    for y in 0..480 {
        for x in 0..640 {
            frame.set_rgb(x, y, [(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
        }
    }
    frame
}

fn bench_filters(c: &mut Criterion) {
    let source = camera_frame();
    let mut rng = SmallRng::seed_from_u64(0);

    for id in FilterId::ALL {
        c.bench_function(&format!("filter_{}_640x480", id), |b| {
            b.iter(|| {
                let mut frame = source.clone();
                apply_filter(&mut frame, id, &mut rng);
                black_box(frame)
            })
        });
    }
}

fn bench_noise(c: &mut Criterion) {
    let source = camera_frame();

    let mut engine = NoiseEngine::with_seed(&NoiseConfig::default(), 0);
    c.bench_function("noise_engine_step_640x480", |b| {
        b.iter(|| {
            let mut frame = source.clone();
            engine.step(&mut frame);
            black_box(frame)
        })
    });

    let mut rng = SmallRng::seed_from_u64(0);
    c.bench_function("apply_noise_snow_640x480", |b| {
        b.iter(|| {
            let mut frame = source.clone();
            apply_noise(&mut frame, NoiseId::Snow, 100, &mut rng);
            black_box(frame)
        })
    });
}

criterion_group!(benches, bench_filters, bench_noise);
criterion_main!(benches);
