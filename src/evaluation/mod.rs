//! Cross-validation partitioning and binary classification metrics.

mod folds;
mod metrics;

pub use folds::{Fold, StratifiedKFold};
pub use metrics::{
    AggregatedMetrics, ConfusionMatrix, FoldMetrics, MetricSummary, area_under_roc, evaluate,
};
