//! Binary classifiers and the trainer capability that produces them.
//!
//! - [`BinaryTrainer`]: fits a [`LinearClassifier`] from feature vectors and
//!   boolean labels.
//! - [`LogisticRegressionTrainer`]: default backend, L2-regularised logistic
//!   regression fit by full-batch gradient descent.
//! - [`LinearClassifier`]: trained weights; scores a vector and turns the
//!   score into a [`Prediction`] under a decision threshold.

mod linear;
mod logistic;
mod trainer;

pub use linear::{LinearClassifier, Prediction, sigmoid};
pub use logistic::{LogisticRegressionConfig, LogisticRegressionTrainer};
pub use trainer::BinaryTrainer;
