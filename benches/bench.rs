//! Criterion benchmarks for the sentiment pipeline.
//!
//! Covers the hot paths of a training run and of inference:
//! - TF-IDF fitting and featurization
//! - Logistic regression training
//! - Single and batch prediction

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use sentiment::classifier::{BinaryTrainer, LogisticRegressionTrainer};
use sentiment::dataset::LabeledExample;
use sentiment::features::{FeatureExtractor, FittedExtractor, TfIdfFeaturizer};
use sentiment::inference::InferenceRunner;
use sentiment::pipeline::TrainingPipeline;
use std::hint::black_box;

/// Generate labeled reviews for benchmarking.
fn generate_reviews(count: usize) -> Vec<LabeledExample> {
    let positive = [
        "great", "excellent", "friendly", "delicious", "prompt", "amazing", "fresh", "loved",
    ];
    let negative = [
        "awful", "terrible", "rude", "bland", "slow", "cold", "stale", "disappointed",
    ];
    let filler = [
        "the", "food", "service", "was", "and", "staff", "place", "menu", "prices", "dinner",
    ];

    (0..count)
        .map(|i| {
            let label = i % 2 == 0;
            let words = if label { &positive } else { &negative };
            let length = 6 + (i % 10);
            let text: Vec<&str> = (0..length)
                .map(|j| {
                    if j % 3 == 0 {
                        words[(i * 7 + j) % words.len()]
                    } else {
                        filler[(i * 13 + j * 5) % filler.len()] // Pseudo-random distribution
                    }
                })
                .collect();
            LabeledExample::new(text.join(" "), label)
        })
        .collect()
}

/// Benchmark featurizer fitting and transformation.
fn bench_featurization(c: &mut Criterion) {
    let mut group = c.benchmark_group("featurization");

    let reviews = generate_reviews(1000);
    let texts: Vec<&str> = reviews.iter().map(|r| r.text.as_str()).collect();
    let featurizer = TfIdfFeaturizer::default();

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("tfidf_fit_1000", |b| {
        b.iter(|| black_box(featurizer.fit(black_box(&texts)).unwrap()))
    });

    let vocabulary = featurizer.fit(&texts).unwrap();
    group.throughput(Throughput::Elements(1));
    group.bench_function("tfidf_transform_single", |b| {
        b.iter(|| black_box(vocabulary.transform(black_box(texts[0])).unwrap()))
    });

    group.finish();
}

/// Benchmark classifier training.
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10);

    let reviews = generate_reviews(500);
    let texts: Vec<&str> = reviews.iter().map(|r| r.text.as_str()).collect();
    let labels: Vec<bool> = reviews.iter().map(|r| r.label).collect();
    let vocabulary = TfIdfFeaturizer::default().fit(&texts).unwrap();
    let features = vocabulary.transform_batch(&texts).unwrap();
    let trainer = LogisticRegressionTrainer::default();

    group.bench_function("logistic_regression_500", |b| {
        b.iter(|| black_box(trainer.train(black_box(&features), black_box(&labels)).unwrap()))
    });

    group.finish();
}

/// Benchmark inference.
fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction");

    let reviews = generate_reviews(500);
    let model = TrainingPipeline::new(TfIdfFeaturizer::default(), LogisticRegressionTrainer::default())
        .fit(&reviews)
        .unwrap();
    let runner = InferenceRunner::new(&model);
    let queries: Vec<&str> = reviews.iter().take(100).map(|r| r.text.as_str()).collect();

    group.bench_function("predict_single", |b| {
        b.iter(|| black_box(runner.predict(black_box("This is excellent!")).unwrap()))
    });

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("predict_batch_100", |b| {
        b.iter(|| black_box(runner.run(black_box(&queries)).unwrap()))
    });
    group.bench_function("predict_batch_100_parallel", |b| {
        b.iter(|| black_box(runner.run_parallel(black_box(&queries)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_featurization, bench_training, bench_prediction);
criterion_main!(benches);
