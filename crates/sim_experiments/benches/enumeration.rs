//! Counting and enumeration benchmarks for the sweep parameter space.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sim_experiments::{parameter_spaces, ParameterSpace};
use sim_sweep_core::{normalize_axes, AxesConfig};

fn space(axes: AxesConfig) -> ParameterSpace {
    ParameterSpace::from_axes(normalize_axes(&axes).expect("built-in axes are valid"))
}

fn bench_count_valid(c: &mut Criterion) {
    let spaces = vec![
        ("coarse", space(parameter_spaces::coarse_axes())),
        ("default", space(parameter_spaces::default_axes())),
    ];

    let mut group = c.benchmark_group("count_valid");
    for (name, space) in &spaces {
        group.bench_with_input(BenchmarkId::from_parameter(name), space, |b, space| {
            b.iter(|| black_box(space.count_valid()));
        });
    }
    group.finish();
}

fn bench_enumeration(c: &mut Criterion) {
    let coarse = space(parameter_spaces::coarse_axes());
    let default = space(parameter_spaces::default_axes());

    let mut group = c.benchmark_group("combinations");
    group.bench_function("coarse_full_pass", |b| {
        b.iter(|| black_box(coarse.combinations().count()));
    });
    group.bench_function("default_first_100k", |b| {
        b.iter(|| black_box(default.combinations().take(100_000).count()));
    });
    group.finish();
}

fn bench_axis_expansion(c: &mut Criterion) {
    c.bench_function("normalize_default_axes", |b| {
        b.iter(|| black_box(normalize_axes(&parameter_spaces::default_axes())));
    });
}

criterion_group!(
    benches,
    bench_count_valid,
    bench_enumeration,
    bench_axis_expansion
);
criterion_main!(benches);
