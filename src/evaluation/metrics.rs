//! Binary classification metrics computed per fold and aggregated across folds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::ClassBalance;
use crate::error::{Result, SentimentError};

/// Counts of a binary confusion matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_count: usize,
}

impl ConfusionMatrix {
    /// Tally predicted against ground-truth labels.
    pub fn from_predictions(predicted: &[bool], actual: &[bool]) -> Self {
        let mut matrix = ConfusionMatrix::default();
        for (&p, &a) in predicted.iter().zip(actual) {
            match (p, a) {
                (true, true) => matrix.tp += 1,
                (true, false) => matrix.fp += 1,
                (false, false) => matrix.tn += 1,
                (false, true) => matrix.fn_count += 1,
            }
        }
        matrix
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_count
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_count)
    }

    /// Harmonic mean of precision and recall; 0 when both are 0.
    pub fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator > 0 {
        numerator as f64 / denominator as f64
    } else {
        0.0
    }
}

/// Area under the ROC curve via the Mann-Whitney U statistic.
///
/// Tied scores share their average rank. Returns `None` when either class is
/// absent, since the curve is undefined then.
pub fn area_under_roc(labels: &[bool], scores: &[f64]) -> Option<f64> {
    let balance = ClassBalance::of_labels(labels);
    if !balance.has_both_classes() || labels.len() != scores.len() {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|a, b| scores[*a].total_cmp(&scores[*b]));

    let mut positive_rank_sum = 0.0;
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // Ranks are 1-based; ties get the mean of ranks start+1..=end.
        let average_rank = (start + 1 + end) as f64 / 2.0;
        let positives_in_run = order[start..end].iter().filter(|i| labels[**i]).count();
        positive_rank_sum += average_rank * positives_in_run as f64;
        start = end;
    }

    let n_pos = balance.positive as f64;
    let n_neg = balance.negative as f64;
    let u = positive_rank_sum - n_pos * (n_pos + 1.0) / 2.0;
    Some(u / (n_pos * n_neg))
}

/// Metrics of one cross-validation round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoldMetrics {
    pub accuracy: f64,
    pub auc: f64,
    pub f1: f64,
    pub precision: f64,
    pub recall: f64,
    /// Mean log-loss of the held-out probabilities.
    pub log_loss: f64,
    /// Number of held-out examples.
    pub examples: usize,
}

/// Evaluate held-out probabilities against ground truth.
///
/// # Errors
///
/// [`SentimentError::Training`] when the held-out labels contain one class
/// (AUC and F1 are degenerate) or the inputs differ in length.
pub fn evaluate(labels: &[bool], probabilities: &[f64], threshold: f64) -> Result<FoldMetrics> {
    if labels.len() != probabilities.len() {
        return Err(SentimentError::training(format!(
            "{} labels but {} predictions",
            labels.len(),
            probabilities.len()
        )));
    }
    let auc = area_under_roc(labels, probabilities).ok_or_else(|| {
        let balance = ClassBalance::of_labels(labels);
        SentimentError::training(format!(
            "held-out fold contains a single label class ({} positive, {} negative)",
            balance.positive, balance.negative
        ))
    })?;

    let predicted: Vec<bool> = probabilities.iter().map(|p| *p >= threshold).collect();
    let matrix = ConfusionMatrix::from_predictions(&predicted, labels);

    const EPS: f64 = 1e-15;
    let log_loss = labels
        .iter()
        .zip(probabilities)
        .map(|(y, p)| {
            let p = p.clamp(EPS, 1.0 - EPS);
            if *y { -p.ln() } else { -(1.0 - p).ln() }
        })
        .sum::<f64>()
        / labels.len() as f64;

    Ok(FoldMetrics {
        accuracy: matrix.accuracy(),
        auc,
        f1: matrix.f1(),
        precision: matrix.precision(),
        recall: matrix.recall(),
        log_loss,
        examples: labels.len(),
    })
}

/// Mean and spread of one metric across folds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl MetricSummary {
    /// Summarise values with Welford's update, so that k identical values
    /// average to exactly that value.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Self {
        let mut count = 0.0;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for value in values {
            count += 1.0;
            let delta = value - mean;
            mean += delta / count;
            m2 += delta * (value - mean);
        }
        let std_dev = if count > 0.0 { (m2 / count).sqrt() } else { 0.0 };
        Self { mean, std_dev }
    }
}

/// Cross-validation metrics averaged across folds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    pub accuracy: MetricSummary,
    pub auc: MetricSummary,
    pub f1: MetricSummary,
    pub precision: MetricSummary,
    pub recall: MetricSummary,
    pub log_loss: MetricSummary,
    /// Number of folds aggregated.
    pub folds: usize,
}

impl AggregatedMetrics {
    /// Arithmetic means over `folds`, in the order given.
    pub fn from_folds(folds: &[FoldMetrics]) -> Result<Self> {
        if folds.is_empty() {
            return Err(SentimentError::internal("no fold metrics to aggregate"));
        }
        Ok(Self {
            accuracy: MetricSummary::of(folds.iter().map(|f| f.accuracy)),
            auc: MetricSummary::of(folds.iter().map(|f| f.auc)),
            f1: MetricSummary::of(folds.iter().map(|f| f.f1)),
            precision: MetricSummary::of(folds.iter().map(|f| f.precision)),
            recall: MetricSummary::of(folds.iter().map(|f| f.recall)),
            log_loss: MetricSummary::of(folds.iter().map(|f| f.log_loss)),
            folds: folds.len(),
        })
    }
}

impl fmt::Display for FoldMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "acc={:.4} auc={:.4} f1={:.4} prec={:.4} rec={:.4} logloss={:.4} (n={})",
            self.accuracy,
            self.auc,
            self.f1,
            self.precision,
            self.recall,
            self.log_loss,
            self.examples
        )
    }
}
