//! Feature extraction: turning raw text into fixed-width numeric vectors.
//!
//! # Architecture
//!
//! - [`FeatureExtractor`]: an unfitted featurizer configuration; `fit` learns
//!   corpus statistics and returns a [`FittedExtractor`].
//! - [`FittedExtractor`]: the persisted featurizer state; `transform` maps a
//!   text to a [`FeatureVector`] whose dimension never changes.
//! - [`TfIdfFeaturizer`]: default backend using word n-grams and character
//!   n-grams weighted by TF-IDF.

mod extractor;
mod tfidf;
mod vector;

pub use extractor::{FeatureExtractor, FittedExtractor};
pub use tfidf::{FEATURE_SCHEMA_VERSION, TfIdfConfig, TfIdfFeaturizer, TfIdfVocabulary};
pub use vector::FeatureVector;
