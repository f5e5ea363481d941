//! The trained model artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::{LinearClassifier, Prediction};
use crate::error::{Result, SentimentError};
use crate::features::{FeatureVector, FittedExtractor};

/// Provenance of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Unique identifier assigned at training time.
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Feature layout version of the fitted extractor.
    pub feature_schema_version: u32,
    /// Number of examples the final fit used.
    pub training_examples: usize,
    /// Name of the feature extractor backend.
    pub extractor: String,
    /// Name of the trainer backend.
    pub trainer: String,
    /// Version of this crate that wrote the model.
    pub library_version: String,
}

impl ModelMetadata {
    /// Fresh metadata for a model fitted on `training_examples` examples.
    pub fn new(
        feature_schema_version: u32,
        training_examples: usize,
        extractor: &str,
        trainer: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            feature_schema_version,
            training_examples,
            extractor: extractor.to_string(),
            trainer: trainer.to_string(),
            library_version: crate::VERSION.to_string(),
        }
    }
}

/// A fitted extractor plus classifier, ready for inference.
///
/// Prediction takes `&self` and touches no shared mutable state, so one model
/// can serve any number of threads.
#[derive(Debug, Serialize, Deserialize)]
pub struct SentimentModel<X> {
    metadata: ModelMetadata,
    extractor: X,
    classifier: LinearClassifier,
    threshold: f64,
}

impl<X: FittedExtractor> SentimentModel<X> {
    /// Assemble a model, checking that its parts agree.
    pub fn new(
        metadata: ModelMetadata,
        extractor: X,
        classifier: LinearClassifier,
        threshold: f64,
    ) -> Result<Self> {
        let model = Self {
            metadata,
            extractor,
            classifier,
            threshold,
        };
        model.check_consistency()?;
        Ok(model)
    }

    pub(crate) fn check_consistency(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(SentimentError::config(format!(
                "decision threshold must be in (0, 1), got {}",
                self.threshold
            )));
        }
        if self.classifier.dimension() != self.extractor.dimension() {
            return Err(SentimentError::internal(format!(
                "classifier expects {} features but the extractor produces {}",
                self.classifier.dimension(),
                self.extractor.dimension()
            )));
        }
        Ok(())
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn extractor(&self) -> &X {
        &self.extractor
    }

    pub fn classifier(&self) -> &LinearClassifier {
        &self.classifier
    }

    /// Probability at or above which a text is labelled positive.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Width of the feature vectors the model consumes.
    pub fn dimension(&self) -> usize {
        self.extractor.dimension()
    }

    /// Classify an already featurized input.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        if features.dimension() != self.dimension() {
            return Err(SentimentError::internal(format!(
                "feature vector has dimension {}, model expects {}",
                features.dimension(),
                self.dimension()
            )));
        }
        Ok(self.classifier.predict(features, self.threshold))
    }

    /// Featurize and classify one text.
    pub fn predict_text(&self, text: &str) -> Result<Prediction> {
        let features = self.extractor.transform(text)?;
        self.predict(&features)
    }
}
