use criterion::{criterion_group, criterion_main, Criterion};

use juliascope_core::{Bounds, Complex, FractalParams, Julia, Mandelbrot, Viewport};
use juliascope_render::{colorize, render, RenderCancel};

fn bench_full_frame_render(c: &mut Criterion) {
    let mandelbrot = Mandelbrot::default();
    let viewport = Viewport::with_default_bounds(800, 640).unwrap();
    let cancel = RenderCancel::new();

    c.bench_function("mandelbrot_800x640", |b| {
        b.iter(|| render(&mandelbrot, &viewport, &cancel, cancel.generation(), |_| {}));
    });
}

fn bench_deep_julia(c: &mut Criterion) {
    let params = FractalParams::new(1000).unwrap();
    let julia = Julia::new(Complex::new(-0.123, 0.745), params);
    let bounds = Bounds::new(-0.4, 0.4, -0.4, 0.4).unwrap();
    let viewport = Viewport::new(bounds, 256, 256).unwrap();
    let cancel = RenderCancel::new();

    c.bench_function("julia_256x256_1000iter", |b| {
        b.iter(|| render(&julia, &viewport, &cancel, cancel.generation(), |_| {}));
    });
}

fn bench_colorize(c: &mut Criterion) {
    let mandelbrot = Mandelbrot::default();
    let viewport = Viewport::with_default_bounds(800, 640).unwrap();
    let cancel = RenderCancel::new();
    let result = render(&mandelbrot, &viewport, &cancel, cancel.generation(), |_| {});

    c.bench_function("colorize_800x640", |b| {
        b.iter(|| colorize(&result.iterations));
    });
}

criterion_group!(
    benches,
    bench_full_frame_render,
    bench_deep_julia,
    bench_colorize
);
criterion_main!(benches);
