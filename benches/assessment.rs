use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fieldscore::scoring::rule_based_raw_score;
use fieldscore::{FarmAssessmentInput, RiskAssessor};

fn farms(n: usize) -> Vec<FarmAssessmentInput> {
    (0..n)
        .map(|i| {
            let t = (i % 100) as f64 / 100.0;
            FarmAssessmentInput {
                ndvi_mean_12mo: t,
                rainfall_deficit_30day: t * 80.0,
                coefficient_of_variation: 1.0 - t,
                ..FarmAssessmentInput::example()
            }
        })
        .collect()
}

fn bench_assessment(c: &mut Criterion) {
    let assessor = RiskAssessor::rule_based();
    let farm = FarmAssessmentInput::example();

    c.bench_function("rule_based.raw_score", |b| {
        b.iter(|| rule_based_raw_score(black_box(&farm)))
    });

    c.bench_function("assessor.assess_single", |b| {
        b.iter(|| assessor.assess(black_box(&farm)))
    });

    let batch = farms(10_000);
    c.bench_function("assessor.assess_batch_10k", |b| {
        b.iter(|| assessor.assess_batch(black_box(&batch)))
    });
}

criterion_group!(benches, bench_assessment);
criterion_main!(benches);
