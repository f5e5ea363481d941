//! Prediction lines: `<text> | <positive|negative> | <probability>`.

use crate::inference::PredictionResult;

/// Header printed above a block of prediction lines.
pub const PREDICTION_HEADER: &str = "Text | Prediction | Probability";

/// Render one prediction as a single line.
pub fn format_prediction(result: &PredictionResult) -> String {
    format!(
        "{} | {} | {:.4}",
        result.input_text,
        result.label_name(),
        result.probability
    )
}

/// Render predictions one per line, in order, optionally under
/// [`PREDICTION_HEADER`].
pub fn render_predictions(results: &[PredictionResult], header: bool) -> String {
    let mut lines = Vec::with_capacity(results.len() + 1);
    if header {
        lines.push(PREDICTION_HEADER.to_string());
    }
    lines.extend(results.iter().map(format_prediction));
    lines.join("\n")
}
