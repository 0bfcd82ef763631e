use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use floatgauss::Matrix;
use rand::{rngs::SmallRng, SeedableRng};
use std::hint::black_box;

fn bench_mult(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_mult");
    let mut rng = SmallRng::seed_from_u64(1);

    for size in [16, 64, 256] {
        let m1 = Matrix::random(&mut rng, size, size, -1.0..1.0);
        let m2 = Matrix::random(&mut rng, size, size, -1.0..1.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&m1) * black_box(&m2));
        });
    }

    group.finish();
}

fn bench_gauss(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduced_echelon_form");
    let mut rng = SmallRng::seed_from_u64(2);

    for size in [16, 64, 256] {
        let m = Matrix::random(&mut rng, size, size, -1.0..1.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut m = black_box(&m).clone();
                m.reduced_echelon_form()
            });
        });
    }

    group.finish();
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinant");
    let mut rng = SmallRng::seed_from_u64(3);

    for size in [4, 6, 8] {
        let m = Matrix::random_invertible(&mut rng, size);
        group.bench_with_input(BenchmarkId::new("exclusion", size), &size, |b, _| {
            b.iter(|| black_box(&m).determinant());
        });
        group.bench_with_input(BenchmarkId::new("cofactors", size), &size, |b, _| {
            b.iter(|| black_box(&m).determinant_by_cofactors());
        });
    }

    group.finish();
}

fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");
    let mut rng = SmallRng::seed_from_u64(4);

    for size in [4, 6] {
        let m = Matrix::random_invertible(&mut rng, size);
        group.bench_with_input(BenchmarkId::new("adjugate", size), &size, |b, _| {
            b.iter(|| black_box(&m).inverse());
        });
        group.bench_with_input(BenchmarkId::new("rref", size), &size, |b, _| {
            b.iter(|| black_box(&m).inverse_by_rref());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mult,
    bench_gauss,
    bench_determinant,
    bench_inverse
);
criterion_main!(benches);
