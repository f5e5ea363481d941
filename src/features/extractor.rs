//! Feature extractor capability traits.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::features::vector::FeatureVector;

/// An unfitted feature extractor.
///
/// Implementations must be deterministic: fitting the same corpus twice yields
/// fitted extractors that transform every text identically.
pub trait FeatureExtractor: Send + Sync {
    /// Fitted state produced by [`fit`](Self::fit).
    type Fitted: FittedExtractor;

    /// Learn corpus statistics from `texts`.
    fn fit(&self, texts: &[&str]) -> Result<Self::Fitted>;

    /// Get the name of this extractor for logging and model metadata.
    fn name(&self) -> &'static str;
}

/// Fitted featurizer state, persisted as part of a model.
pub trait FittedExtractor: Serialize + DeserializeOwned + Send + Sync + std::fmt::Debug {
    /// Feature layout version written by the running code.
    const SCHEMA_VERSION: u32;

    /// Map a text to a feature vector of [`dimension`](Self::dimension) width.
    fn transform(&self, text: &str) -> Result<FeatureVector>;

    /// Output dimensionality. Fixed for the lifetime of the state.
    fn dimension(&self) -> usize;

    /// Version of the feature layout this state produces. Models refuse to
    /// load when it differs from the running code's version.
    fn schema_version(&self) -> u32;

    /// Transform many texts, preserving order.
    fn transform_batch(&self, texts: &[&str]) -> Result<Vec<FeatureVector>> {
        texts.iter().map(|text| self.transform(text)).collect()
    }
}
