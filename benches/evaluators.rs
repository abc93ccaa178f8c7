use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use onehot::{fold, vectorized, Mode};
use std::hint::black_box;

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("extremum");
    for &n in &[8usize, 64usize, 512usize] {
        // Deterministic, slightly irregular values with duplicated peaks.
        let values: Vec<f64> = (0..n).map(|i| (((i * 37 + 11) % 101) as f64) - 50.0).collect();

        for mode in [Mode::ArgMax, Mode::MaxAbsIndicator] {
            let kind = mode.policy();
            group.bench_with_input(
                BenchmarkId::new(format!("vectorized/{mode}"), n),
                &n,
                |b, _| {
                    b.iter(|| {
                        black_box(vectorized::evaluate_with_draw(
                            kind,
                            black_box(&values),
                            &[],
                            0.0,
                        ))
                    })
                },
            );
            group.bench_with_input(BenchmarkId::new(format!("fold/{mode}"), n), &n, |b, _| {
                b.iter(|| {
                    black_box(fold::evaluate_with_draw(kind, black_box(&values), &[], 0.0))
                })
            });
        }
    }
    group.finish();

    let mut group = c.benchmark_group("sampled");
    for &n in &[8usize, 64usize, 512usize] {
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let weights: Vec<f64> = vec![1.0 / n as f64; n];
        let kind = Mode::Prob.policy();

        group.bench_with_input(BenchmarkId::new("vectorized/PROB", n), &n, |b, _| {
            b.iter(|| {
                black_box(vectorized::evaluate_with_draw(
                    kind,
                    black_box(&values),
                    black_box(&weights),
                    0.6180339887,
                ))
            })
        });
        group.bench_with_input(BenchmarkId::new("fold/PROB", n), &n, |b, _| {
            b.iter(|| {
                black_box(fold::evaluate_with_draw(
                    kind,
                    black_box(&values),
                    black_box(&weights),
                    0.6180339887,
                ))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
