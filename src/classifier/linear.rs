//! Linear binary classifier.

use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;

/// Logistic function.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Outcome of scoring one feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// `probability >= threshold`.
    pub label: bool,
    /// Probability of the positive class, in `[0, 1]`.
    pub probability: f64,
    /// Raw linear score; `probability = sigmoid(score)`.
    pub score: f64,
}

/// Weights and bias of a linear model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearClassifier {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Number of input features the classifier was trained on.
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    /// Raw score `w·x + b`.
    pub fn score(&self, features: &FeatureVector) -> f64 {
        features.dot(&self.weights) + self.bias
    }

    /// Probability of the positive class.
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        sigmoid(self.score(features))
    }

    /// Score and classify under `threshold`. Pure and allocation-free.
    pub fn predict(&self, features: &FeatureVector, threshold: f64) -> Prediction {
        let score = self.score(features);
        let probability = sigmoid(score);
        Prediction {
            label: probability >= threshold,
            probability,
            score,
        }
    }

    /// Indices of the `k` largest-magnitude weights, strongest first.
    pub fn top_weights(&self, k: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.weights.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()).then(a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
    }
}
