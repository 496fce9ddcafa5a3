use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::DVec3;
use ribbon::geometry::{extrude, propagate_frames, Profile, Spline};
use ribbon::options::{ChainPalette, FrameMethod, RibbonOptions};
use ribbon::pipeline::model_ribbon;
use ribbon::structure::ModelBuilder;

fn helix(n: usize, offset: DVec3) -> Vec<DVec3> {
    (0..n)
        .map(|i| {
            let a = i as f64 * 100f64.to_radians();
            offset + DVec3::new(2.3 * a.cos(), 2.3 * a.sin(), 1.5 * i as f64)
        })
        .collect()
}

fn spline_benchmark(c: &mut Criterion) {
    let spline = Spline::new(helix(200, DVec3::ZERO), 8).unwrap();
    c.bench_function("spline_200_residues", |b| {
        b.iter(|| black_box(spline.samples().count()))
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let spline = Spline::new(helix(200, DVec3::ZERO), 8).unwrap();
    let mut group = c.benchmark_group("frames");
    for (name, method) in [
        ("projection", FrameMethod::Projection),
        ("double_reflection", FrameMethod::DoubleReflection),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(propagate_frames(spline.samples(), method)))
        });
    }
    group.finish();
}

fn extrude_benchmark(c: &mut Criterion) {
    let spline = Spline::new(helix(200, DVec3::ZERO), 8).unwrap();
    let curve = propagate_frames(spline.samples(), FrameMethod::Projection);
    let mut group = c.benchmark_group("extrude");
    for verts in [4, 8, 16] {
        let profile = Profile::closed(3.0, 1.0, verts, 1.0);
        group.bench_function(format!("{verts}_verts"), |b| {
            b.iter(|| {
                black_box(extrude(&curve.samples, &profile, [1.0, 0.0, 0.0]))
            })
        });
    }
    group.finish();
}

fn model_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_ribbon");
    for chains in [1, 4, 16] {
        let mut builder = ModelBuilder::new();
        for i in 0..chains {
            let offset = DVec3::new(0.0, 0.0, 400.0 * i as f64);
            let _ = builder.add_ca_trace(&format!("{i}"), &helix(150, offset));
        }
        let model = builder.finish();
        let options = RibbonOptions::default();
        let palette = ChainPalette::uniform([0.5, 0.5, 0.5]);

        group.bench_function(format!("{chains}_chains"), |b| {
            b.iter(|| black_box(model_ribbon(&model, &options, &palette)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    spline_benchmark,
    frame_benchmark,
    extrude_benchmark,
    model_benchmark
);
criterion_main!(benches);
