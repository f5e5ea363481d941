//! Cross-validation and final fitting over any extractor/trainer pair.

use log::{debug, info};
use rayon::prelude::*;

use crate::classifier::{BinaryTrainer, LinearClassifier};
use crate::dataset::LabeledExample;
use crate::error::{Result, SentimentError};
use crate::evaluation::{Fold, FoldMetrics, StratifiedKFold, evaluate};
use crate::features::{FeatureExtractor, FittedExtractor};
use crate::model::{ModelMetadata, SentimentModel};

/// Couples a [`FeatureExtractor`] with a [`BinaryTrainer`].
///
/// Each cross-validation round refits the extractor on its training split
/// only, so held-out text never leaks into the vocabulary.
#[derive(Debug, Clone)]
pub struct TrainingPipeline<E, T> {
    extractor: E,
    trainer: T,
    threshold: f64,
    parallel_folds: bool,
}

impl<E: FeatureExtractor, T: BinaryTrainer> TrainingPipeline<E, T> {
    /// Pipeline with a 0.5 threshold and parallel folds.
    pub fn new(extractor: E, trainer: T) -> Self {
        Self {
            extractor,
            trainer,
            threshold: 0.5,
            parallel_folds: true,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_parallel_folds(mut self, parallel_folds: bool) -> Self {
        self.parallel_folds = parallel_folds;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Run seeded stratified k-fold cross-validation.
    ///
    /// Returns exactly `folds` metrics in round order, whether or not the
    /// rounds ran concurrently.
    pub fn cross_validate(
        &self,
        examples: &[LabeledExample],
        folds: usize,
        seed: u64,
    ) -> Result<Vec<FoldMetrics>> {
        let labels: Vec<bool> = examples.iter().map(|e| e.label).collect();
        let splits = StratifiedKFold::new(folds, seed)?.split(&labels)?;

        info!(
            "Cross-validating {} examples with {} folds (seed {}, {})",
            examples.len(),
            folds,
            seed,
            if self.parallel_folds { "parallel" } else { "sequential" }
        );

        let metrics = if self.parallel_folds {
            splits
                .par_iter()
                .map(|fold| self.run_fold(examples, fold))
                .collect::<Result<Vec<_>>>()?
        } else {
            splits
                .iter()
                .map(|fold| self.run_fold(examples, fold))
                .collect::<Result<Vec<_>>>()?
        };

        for (fold, m) in splits.iter().zip(&metrics) {
            info!("Fold {}/{}: {}", fold.index + 1, folds, m);
        }
        Ok(metrics)
    }

    fn run_fold(&self, examples: &[LabeledExample], fold: &Fold) -> Result<FoldMetrics> {
        let train: Vec<&LabeledExample> = fold.train.iter().map(|i| &examples[*i]).collect();
        let test: Vec<&LabeledExample> = fold.test.iter().map(|i| &examples[*i]).collect();
        debug!(
            "Fold {}: {} training, {} held-out examples",
            fold.index,
            train.len(),
            test.len()
        );

        let (fitted, classifier) = self.fit_parts(&train)?;

        let test_texts: Vec<&str> = test.iter().map(|e| e.text.as_str()).collect();
        let test_labels: Vec<bool> = test.iter().map(|e| e.label).collect();
        let probabilities = fitted
            .transform_batch(&test_texts)?
            .iter()
            .map(|x| classifier.probability(x))
            .collect::<Vec<f64>>();

        evaluate(&test_labels, &probabilities, self.threshold)
    }

    fn fit_parts(&self, examples: &[&LabeledExample]) -> Result<(E::Fitted, LinearClassifier)> {
        let texts: Vec<&str> = examples.iter().map(|e| e.text.as_str()).collect();
        let labels: Vec<bool> = examples.iter().map(|e| e.label).collect();

        let fitted = self.extractor.fit(&texts)?;
        let features = fitted.transform_batch(&texts)?;
        if features.len() != labels.len() {
            return Err(SentimentError::internal(format!(
                "{} feature vectors for {} examples",
                features.len(),
                labels.len()
            )));
        }
        let classifier = self.trainer.train(&features, &labels)?;
        Ok((fitted, classifier))
    }

    /// Fit the extractor and classifier on every example.
    pub fn fit(&self, examples: &[LabeledExample]) -> Result<SentimentModel<E::Fitted>> {
        if examples.is_empty() {
            return Err(SentimentError::training("no examples to fit"));
        }
        let refs: Vec<&LabeledExample> = examples.iter().collect();
        let (fitted, classifier) = self.fit_parts(&refs)?;

        let metadata = ModelMetadata::new(
            fitted.schema_version(),
            examples.len(),
            self.extractor.name(),
            self.trainer.name(),
        );
        info!(
            "Fitted final model on {} examples ({} features)",
            examples.len(),
            fitted.dimension()
        );
        SentimentModel::new(metadata, fitted, classifier, self.threshold)
    }
}
