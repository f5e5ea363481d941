//! End-to-end training: load, cross-validate, aggregate, fit.

use log::info;

use crate::classifier::LogisticRegressionTrainer;
use crate::dataset::{DatasetLoader, LabeledExample};
use crate::error::Result;
use crate::evaluation::{AggregatedMetrics, FoldMetrics};
use crate::features::{TfIdfFeaturizer, TfIdfVocabulary};
use crate::model::SentimentModel;
use crate::pipeline::config::TrainingConfig;
use crate::pipeline::training::TrainingPipeline;

/// Pipeline built from the default backends.
pub type DefaultPipeline = TrainingPipeline<TfIdfFeaturizer, LogisticRegressionTrainer>;

/// Model produced by the default backends.
pub type DefaultModel = SentimentModel<TfIdfVocabulary>;

/// Result of a training run.
#[derive(Debug)]
pub struct TrainingOutcome<X> {
    /// Model fitted on the full dataset.
    pub model: SentimentModel<X>,
    /// Cross-validation metrics averaged over folds.
    pub metrics: AggregatedMetrics,
    /// Per-fold metrics in fold order.
    pub fold_metrics: Vec<FoldMetrics>,
}

/// Drives a training run from a [`TrainingConfig`].
///
/// Cross-validation is diagnostic: its scores never block the final fit. A
/// dataset that cannot be cross-validated at all is rejected before fitting.
#[derive(Debug, Clone)]
pub struct TrainingOrchestrator {
    config: TrainingConfig,
}

impl TrainingOrchestrator {
    /// Validate `config` and build an orchestrator.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// The extractor/trainer pipeline described by the configuration.
    pub fn pipeline(&self) -> DefaultPipeline {
        TrainingPipeline::new(
            TfIdfFeaturizer::new(self.config.featurizer.clone()),
            LogisticRegressionTrainer::new(self.config.trainer.clone()),
        )
        .with_threshold(self.config.decision_threshold)
        .with_parallel_folds(self.config.parallel_folds)
    }

    /// Load the configured dataset and train on it.
    pub fn run(&self) -> Result<TrainingOutcome<TfIdfVocabulary>> {
        let examples = DatasetLoader::new(&self.config.dataset)?.load()?;
        self.run_on(&examples)
    }

    /// Train on already loaded examples.
    pub fn run_on(&self, examples: &[LabeledExample]) -> Result<TrainingOutcome<TfIdfVocabulary>> {
        let pipeline = self.pipeline();

        let fold_metrics = pipeline.cross_validate(examples, self.config.folds, self.config.seed)?;
        let metrics = AggregatedMetrics::from_folds(&fold_metrics)?;
        info!(
            "Cross-validation: accuracy {:.4}, AUC {:.4}, F1 {:.4}",
            metrics.accuracy.mean, metrics.auc.mean, metrics.f1.mean
        );

        let model = pipeline.fit(examples)?;
        Ok(TrainingOutcome {
            model,
            metrics,
            fold_metrics,
        })
    }
}

/// Train with `config`: load the dataset, cross-validate, then fit on all of it.
pub fn train(config: TrainingConfig) -> Result<TrainingOutcome<TfIdfVocabulary>> {
    TrainingOrchestrator::new(config)?.run()
}
