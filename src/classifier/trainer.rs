//! Trainer capability trait.

use crate::classifier::linear::LinearClassifier;
use crate::error::Result;
use crate::features::FeatureVector;

/// Trait for binary classifier trainers.
///
/// Implementations must be deterministic: identical inputs produce identical
/// classifiers.
pub trait BinaryTrainer: Send + Sync {
    /// Fit a classifier on `features` with parallel `labels`.
    ///
    /// # Errors
    ///
    /// [`SentimentError::Training`](crate::error::SentimentError::Training)
    /// when the inputs are empty, mismatched in length or dimension, or
    /// contain a single label class.
    fn train(&self, features: &[FeatureVector], labels: &[bool]) -> Result<LinearClassifier>;

    /// Get the name of this trainer for logging and model metadata.
    fn name(&self) -> &'static str;
}
