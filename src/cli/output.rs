//! Output formatting for CLI commands.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cli::args::{OutputFormat, SentimentArgs};
use crate::error::Result;
use crate::inference::PredictionResult;
use crate::report::{MetricsReport, render_predictions};

/// Result structure for a training run.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub metrics: MetricsReport,
    pub model_path: String,
    pub model_id: Uuid,
    pub training_examples: usize,
    pub dimension: usize,
}

/// Result structure for predictions.
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub predictions: Vec<PredictionResult>,
    #[serde(skip)]
    pub header: bool,
}

/// Result structure for the demo command.
#[derive(Debug, Serialize, Deserialize)]
pub struct DemoOutput {
    pub metrics: MetricsReport,
    pub predictions: PredictionOutput,
}

/// Model metadata for `inspect`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub path: String,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub format_version: u32,
    pub feature_schema_version: u32,
    pub library_version: String,
    pub extractor: String,
    pub trainer: String,
    pub dimension: usize,
    pub threshold: f64,
    pub training_examples: usize,
    pub top_features: Vec<FeatureWeight>,
}

/// A feature and its learned weight.
#[derive(Debug, Serialize, Deserialize)]
pub struct FeatureWeight {
    pub term: String,
    pub weight: f64,
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.metrics)?;
        write!(
            f,
            "Model {} saved to {} ({} examples, {} features)",
            self.model_id, self.model_path, self.training_examples, self.dimension
        )
    }
}

impl fmt::Display for PredictionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", render_predictions(&self.predictions, self.header))
    }
}

impl fmt::Display for DemoOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.metrics)?;
        writeln!(f)?;
        write!(f, "{}", self.predictions)
    }
}

impl fmt::Display for ModelInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.path)?;
        writeln!(f, "═════")?;
        writeln!(f, "Id: {}", self.id)?;
        writeln!(f, "Created: {}", self.created_at.to_rfc3339())?;
        writeln!(f, "Format version: {}", self.format_version)?;
        writeln!(f, "Feature schema version: {}", self.feature_schema_version)?;
        writeln!(f, "Written by: sentiment {}", self.library_version)?;
        writeln!(f, "Extractor: {}", self.extractor)?;
        writeln!(f, "Trainer: {}", self.trainer)?;
        writeln!(f, "Features: {}", self.dimension)?;
        writeln!(f, "Decision threshold: {}", self.threshold)?;
        write!(f, "Training examples: {}", self.training_examples)?;
        if !self.top_features.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            writeln!(f, "Strongest features:")?;
            writeln!(f, "──────────────────")?;
            let lines: Vec<String> = self
                .top_features
                .iter()
                .map(|fw| format!("{:>+9.4}  {}", fw.weight, fw.term))
                .collect();
            write!(f, "{}", lines.join("\n"))?;
        }
        Ok(())
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + fmt::Display>(result: &T, args: &SentimentArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(result),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: fmt::Display>(result: &T) -> Result<()> {
    println!("{result}");
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &SentimentArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(text: &str, label: bool, probability: f64) -> PredictionResult {
        PredictionResult {
            input_text: text.to_string(),
            predicted_label: label,
            probability,
            score: 0.0,
        }
    }

    #[test]
    fn test_prediction_output_human() {
        let output = PredictionOutput {
            predictions: vec![
                prediction("This is excellent!", true, 0.95),
                prediction("This is an awful!", false, 0.05),
            ],
            header: true,
        };
        assert_eq!(
            output.to_string(),
            "Text | Prediction | Probability\n\
             This is excellent! | positive | 0.9500\n\
             This is an awful! | negative | 0.0500"
        );
    }

    #[test]
    fn test_prediction_output_json() {
        let output = PredictionOutput {
            predictions: vec![prediction("ok", true, 0.75)],
            header: true,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["predictions"][0]["input_text"], "ok");
        assert_eq!(value["predictions"][0]["predicted_label"], true);
        assert!(value.get("header").is_none());
    }
}
