//! Batch inference over a trained model.

mod runner;

pub use runner::{InferenceRunner, PredictionResult};
