//! L2-regularised logistic regression trainer.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::classifier::linear::{LinearClassifier, sigmoid};
use crate::classifier::trainer::BinaryTrainer;
use crate::dataset::ClassBalance;
use crate::error::{Result, SentimentError};
use crate::features::FeatureVector;

/// Hyper-parameters for [`LogisticRegressionTrainer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionConfig {
    /// Strength of the L2 penalty on the weights (the bias is not penalised).
    pub l2_regularization: f64,
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// Upper bound on gradient descent iterations.
    pub max_iterations: usize,
    /// Stop once the objective improves by less than this between iterations.
    pub tolerance: f64,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            l2_regularization: 1e-4,
            learning_rate: 2.0,
            max_iterations: 500,
            tolerance: 1e-7,
        }
    }
}

impl LogisticRegressionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(SentimentError::config("learning_rate must be positive"));
        }
        if !(self.l2_regularization.is_finite() && self.l2_regularization >= 0.0) {
            return Err(SentimentError::config(
                "l2_regularization must be non-negative",
            ));
        }
        if self.max_iterations == 0 {
            return Err(SentimentError::config("max_iterations must be at least 1"));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(SentimentError::config("tolerance must be non-negative"));
        }
        Ok(())
    }
}

/// Fits a [`LinearClassifier`] by full-batch gradient descent on the mean
/// log-loss plus an L2 penalty.
///
/// There is no randomness anywhere in the fit, so repeated calls on the same
/// data return bit-identical classifiers.
///
/// # Examples
///
/// ```
/// use sentiment::classifier::{BinaryTrainer, LogisticRegressionTrainer};
/// use sentiment::features::FeatureVector;
///
/// let features = vec![
///     FeatureVector::from_dense(&[1.0, 0.0]),
///     FeatureVector::from_dense(&[0.0, 1.0]),
/// ];
/// let classifier = LogisticRegressionTrainer::default()
///     .train(&features, &[true, false])
///     .unwrap();
///
/// assert!(classifier.probability(&features[0]) > 0.5);
/// assert!(classifier.probability(&features[1]) < 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogisticRegressionTrainer {
    config: LogisticRegressionConfig,
}

impl LogisticRegressionTrainer {
    pub fn new(config: LogisticRegressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LogisticRegressionConfig {
        &self.config
    }

    fn objective(&self, features: &[FeatureVector], targets: &[f64], weights: &[f64], bias: f64) -> f64 {
        let n = features.len() as f64;
        let data_loss: f64 = features
            .iter()
            .zip(targets)
            .map(|(x, y)| log_loss(x.dot(weights) + bias, *y))
            .sum::<f64>()
            / n;
        let penalty: f64 = weights.iter().map(|w| w * w).sum::<f64>();
        data_loss + 0.5 * self.config.l2_regularization * penalty
    }
}

/// Numerically stable `-[y ln σ(z) + (1 - y) ln(1 - σ(z))]`.
fn log_loss(score: f64, target: f64) -> f64 {
    // ln(1 + e^z) - y z
    let softplus = if score > 0.0 {
        score + (-score).exp().ln_1p()
    } else {
        score.exp().ln_1p()
    };
    softplus - target * score
}

impl BinaryTrainer for LogisticRegressionTrainer {
    fn train(&self, features: &[FeatureVector], labels: &[bool]) -> Result<LinearClassifier> {
        self.config.validate()?;

        if features.is_empty() {
            return Err(SentimentError::training("no training examples"));
        }
        if features.len() != labels.len() {
            return Err(SentimentError::training(format!(
                "{} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }
        let balance = ClassBalance::of_labels(labels);
        if !balance.has_both_classes() {
            return Err(SentimentError::training(format!(
                "training data contains a single label class ({} positive, {} negative)",
                balance.positive, balance.negative
            )));
        }
        let dimension = features[0].dimension();
        if let Some(bad) = features.iter().position(|x| x.dimension() != dimension) {
            return Err(SentimentError::training(format!(
                "feature vector {bad} has dimension {}, expected {dimension}",
                features[bad].dimension()
            )));
        }

        let n = features.len() as f64;
        let targets: Vec<f64> = labels.iter().map(|l| if *l { 1.0 } else { 0.0 }).collect();
        let lr = self.config.learning_rate;
        let lambda = self.config.l2_regularization;

        let mut weights = vec![0.0; dimension];
        let mut bias = 0.0;
        let mut gradient = vec![0.0; dimension];
        let mut previous = self.objective(features, &targets, &weights, bias);
        let mut iterations = 0;

        for iteration in 1..=self.config.max_iterations {
            iterations = iteration;
            gradient.iter_mut().for_each(|g| *g = 0.0);
            let mut bias_gradient = 0.0;

            for (x, y) in features.iter().zip(&targets) {
                let residual = sigmoid(x.dot(&weights) + bias) - y;
                for (i, v) in x.iter() {
                    gradient[i] += residual * v as f64;
                }
                bias_gradient += residual;
            }

            for (w, g) in weights.iter_mut().zip(&gradient) {
                *w -= lr * (g / n + lambda * *w);
            }
            bias -= lr * bias_gradient / n;

            let current = self.objective(features, &targets, &weights, bias);
            if !current.is_finite() {
                return Err(SentimentError::training(format!(
                    "objective diverged at iteration {iteration}; lower the learning rate"
                )));
            }
            if iteration % 100 == 0 {
                debug!("iteration {iteration}: objective {current:.6}");
            }
            if (previous - current).abs() < self.config.tolerance {
                previous = current;
                break;
            }
            previous = current;
        }

        info!(
            "Trained logistic regression on {} examples x {} features in {} iterations (objective {:.6})",
            features.len(),
            dimension,
            iterations,
            previous
        );

        Ok(LinearClassifier::new(weights, bias))
    }

    fn name(&self) -> &'static str {
        "logistic_regression"
    }
}
