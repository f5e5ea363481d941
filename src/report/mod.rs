//! Human-readable rendering of metrics and predictions.
//!
//! Nothing here computes; values are formatted as they arrive.

mod metrics;
mod predictions;

pub use metrics::{MetricsReport, format_percent};
pub use predictions::{PREDICTION_HEADER, format_prediction, render_predictions};
