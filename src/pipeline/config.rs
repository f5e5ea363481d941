//! Training configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::LogisticRegressionConfig;
use crate::dataset::DatasetConfig;
use crate::error::{Result, SentimentError};
use crate::features::TfIdfConfig;

/// Everything needed to train and evaluate a model.
///
/// Every field has a default, so a JSON file only needs the values it changes:
///
/// ```
/// use sentiment::pipeline::TrainingConfig;
///
/// let config: TrainingConfig =
///     serde_json::from_str(r#"{ "folds": 3, "dataset": { "path": "reviews.tsv" } }"#).unwrap();
/// assert_eq!(config.folds, 3);
/// assert_eq!(config.seed, 1);
/// assert!(config.dataset.has_header);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub dataset: DatasetConfig,
    /// Number of cross-validation folds.
    pub folds: usize,
    /// Seed for the fold assignment.
    pub seed: u64,
    /// Train cross-validation folds concurrently.
    pub parallel_folds: bool,
    /// Probability at or above which a text is labelled positive.
    pub decision_threshold: f64,
    pub featurizer: TfIdfConfig,
    pub trainer: LogisticRegressionConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            folds: 5,
            seed: 1,
            parallel_folds: true,
            decision_threshold: 0.5,
            featurizer: TfIdfConfig::default(),
            trainer: LogisticRegressionConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// Read a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SentimentError::from_io(e, path))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            SentimentError::config(format!("{}: {e}", path.display()))
        })
    }

    /// Reject values that cannot produce a usable model.
    pub fn validate(&self) -> Result<()> {
        if self.folds < 2 {
            return Err(SentimentError::config(format!(
                "folds must be at least 2, got {}",
                self.folds
            )));
        }
        if !(self.decision_threshold > 0.0 && self.decision_threshold < 1.0) {
            return Err(SentimentError::config(format!(
                "decision_threshold must be in (0, 1), got {}",
                self.decision_threshold
            )));
        }
        if !self.dataset.delimiter.is_ascii() {
            return Err(SentimentError::config(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.dataset.delimiter
            )));
        }
        self.featurizer.validate()?;
        self.trainer.validate()?;
        Ok(())
    }
}
