#[macro_use]
extern crate criterion;
extern crate mandelview;
extern crate num;

use criterion::Criterion;
use num::Complex;

use mandelview::engine::CancelToken;
use mandelview::escape::escape_count;
use mandelview::partition::ColumnBand;
use mandelview::render::fill_region;
use mandelview::{ColorMode, ColorTable, PixelSurface, PlaneMapper, Viewport};

fn bench_escape(c: &mut Criterion) {
    // Interior points pay for the full iteration limit; exterior ones
    // bail early.  Both shapes matter.
    c.bench_function("escape interior 1000", |b| {
        b.iter(|| escape_count(Complex::new(-0.1, 0.1), 1000))
    });
    c.bench_function("escape near-boundary 1000", |b| {
        b.iter(|| escape_count(Complex::new(-0.75, 0.05), 1000))
    });
    c.bench_function("escape exterior 1000", |b| {
        b.iter(|| escape_count(Complex::new(0.5, 0.5), 1000))
    });
}

fn bench_band_fill(c: &mut Criterion) {
    let surface = PixelSurface::new(256, 192);
    let table = ColorTable::with_limit(100, ColorMode::Colored).unwrap();
    let mapper = PlaneMapper::new(Viewport::default(), 256, 192);
    let cancel = CancelToken::new();
    c.bench_function("fill 16-column band at 100 iterations", move |b| {
        b.iter(|| {
            fill_region(
                &surface,
                &table,
                &mapper,
                100,
                ColumnBand { start: 64, end: 80 },
                &cancel,
                None,
            )
        })
    });
}

criterion_group!(benches, bench_escape, bench_band_fill);
criterion_main!(benches);
