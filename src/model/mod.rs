//! Trained sentiment models and their on-disk format.
//!
//! A [`SentimentModel`] bundles the fitted feature extractor, the linear
//! classifier and the decision threshold, so a text can be scored without any
//! other state. Models are immutable once built and safe to share across
//! threads.

mod persistence;
mod sentiment;

pub use persistence::{
    MODEL_FORMAT_VERSION, MODEL_MAGIC, decode_model, encode_model, load_model, save_model,
};
pub use sentiment::{ModelMetadata, SentimentModel};
