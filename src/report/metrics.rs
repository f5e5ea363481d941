//! Cross-validation metrics report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::evaluation::{AggregatedMetrics, FoldMetrics};

const RULE: &str = "=============================================";

/// Format a ratio in `[0, 1]` as a percentage with two decimals.
///
/// ```
/// use sentiment::report::format_percent;
///
/// assert_eq!(format_percent(0.834), "83.40%");
/// assert_eq!(format_percent(1.0), "100.00%");
/// ```
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Aggregated cross-validation metrics ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy: f64,
    pub auc: f64,
    pub f1: f64,
    pub folds: usize,
    /// Per-fold breakdown, shown only when present.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fold_metrics: Vec<FoldMetrics>,
}

impl MetricsReport {
    pub fn new(metrics: &AggregatedMetrics) -> Self {
        Self {
            accuracy: metrics.accuracy.mean,
            auc: metrics.auc.mean,
            f1: metrics.f1.mean,
            folds: metrics.folds,
            fold_metrics: Vec::new(),
        }
    }

    /// Include a per-fold breakdown.
    pub fn with_folds(mut self, folds: &[FoldMetrics]) -> Self {
        self.fold_metrics = folds.to_vec();
        self
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model quality metrics ({}-fold cross-validation):", self.folds)?;
        writeln!(f, "Accuracy: {}", format_percent(self.accuracy))?;
        writeln!(f, "AUC: {}", format_percent(self.auc))?;
        writeln!(f, "F1 Score: {}", format_percent(self.f1))?;
        for (i, fold) in self.fold_metrics.iter().enumerate() {
            writeln!(
                f,
                "  Fold {}: accuracy {}, AUC {}, F1 {}",
                i + 1,
                format_percent(fold.accuracy),
                format_percent(fold.auc),
                format_percent(fold.f1)
            )?;
        }
        write!(f, "{RULE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(accuracy: f64, auc: f64, f1: f64) -> FoldMetrics {
        FoldMetrics {
            accuracy,
            auc,
            f1,
            precision: 0.0,
            recall: 0.0,
            log_loss: 0.0,
            examples: 10,
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(0.5), "50.00%");
        assert_eq!(format_percent(0.12346), "12.35%");
    }

    #[test]
    fn test_report_lines() {
        let folds = [fold(0.834, 0.9, 0.8), fold(0.834, 0.9, 0.8)];
        let aggregated = AggregatedMetrics::from_folds(&folds).unwrap();
        let text = MetricsReport::new(&aggregated).to_string();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Accuracy: 83.40%");
        assert_eq!(lines[2], "AUC: 90.00%");
        assert_eq!(lines[3], "F1 Score: 80.00%");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_report_with_folds() {
        let folds = [fold(1.0, 1.0, 1.0), fold(0.5, 0.5, 0.5)];
        let aggregated = AggregatedMetrics::from_folds(&folds).unwrap();
        let report = MetricsReport::new(&aggregated).with_folds(&folds);
        let text = report.to_string();

        assert!(text.contains("Accuracy: 75.00%"));
        assert!(text.contains("  Fold 2: accuracy 50.00%, AUC 50.00%, F1 50.00%"));
    }
}
