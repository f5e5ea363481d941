//! Command implementations for the sentiment CLI.

use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::features::TfIdfVocabulary;
use crate::inference::InferenceRunner;
use crate::model::{MODEL_FORMAT_VERSION, load_model, save_model};
use crate::pipeline::{DefaultModel, TrainingOrchestrator};
use crate::report::MetricsReport;

/// Opinions scored by the `demo` command.
pub const DEMO_OPINIONS: [&str; 4] = [
    "This is an awful!",
    "This is excellent!",
    "Service was very prompt.",
    "This was like the final blow!",
];

/// Execute a CLI command.
pub fn execute_command(args: SentimentArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train_model(train_args, &args),
        Command::Predict(predict_args) => predict(predict_args, &args),
        Command::Demo(demo_args) => run_demo(demo_args, &args),
        Command::Inspect(inspect_args) => inspect_model(inspect_args, &args),
    }
}

/// Cross-validate, fit on the full dataset and persist the model.
fn train_model(args: &TrainArgs, cli_args: &SentimentArgs) -> Result<()> {
    let config = args.to_config()?;
    let outcome = TrainingOrchestrator::new(config)?.run()?;

    // Only a fully fitted model reaches this point.
    save_model(&outcome.model, &args.model)?;

    let mut metrics = MetricsReport::new(&outcome.metrics);
    if args.show_folds {
        metrics = metrics.with_folds(&outcome.fold_metrics);
    }
    let metadata = outcome.model.metadata();
    output_result(
        &TrainingSummary {
            metrics,
            model_path: args.model.display().to_string(),
            model_id: metadata.id,
            training_examples: metadata.training_examples,
            dimension: outcome.model.dimension(),
        },
        cli_args,
    )
}

/// Classify the given texts with a persisted model.
fn predict(args: &PredictArgs, cli_args: &SentimentArgs) -> Result<()> {
    let model: DefaultModel = load_model(&args.model)?;
    let predictions = InferenceRunner::new(&model).run(&args.texts)?;
    output_result(
        &PredictionOutput {
            predictions,
            header: args.header,
        },
        cli_args,
    )
}

/// Train in memory, report metrics and score the built-in opinions.
fn run_demo(args: &DemoArgs, cli_args: &SentimentArgs) -> Result<()> {
    let config = args.to_config()?;
    let outcome = TrainingOrchestrator::new(config)?.run()?;
    info!("Scoring {} demo opinions", DEMO_OPINIONS.len());

    let predictions = InferenceRunner::new(&outcome.model).run(&DEMO_OPINIONS)?;
    output_result(
        &DemoOutput {
            metrics: MetricsReport::new(&outcome.metrics),
            predictions: PredictionOutput {
                predictions,
                header: true,
            },
        },
        cli_args,
    )
}

/// Print metadata and the strongest features of a persisted model.
fn inspect_model(args: &InspectArgs, cli_args: &SentimentArgs) -> Result<()> {
    let model: DefaultModel = load_model(&args.model)?;
    let metadata = model.metadata();

    output_result(
        &ModelInfo {
            path: args.model.display().to_string(),
            id: metadata.id,
            created_at: metadata.created_at,
            format_version: MODEL_FORMAT_VERSION,
            feature_schema_version: metadata.feature_schema_version,
            library_version: metadata.library_version.clone(),
            extractor: metadata.extractor.clone(),
            trainer: metadata.trainer.clone(),
            dimension: model.dimension(),
            threshold: model.threshold(),
            training_examples: metadata.training_examples,
            top_features: top_features(&model, args.top),
        },
        cli_args,
    )
}

fn top_features(model: &DefaultModel, k: usize) -> Vec<FeatureWeight> {
    let vocabulary: &TfIdfVocabulary = model.extractor();
    model
        .classifier()
        .top_weights(k)
        .into_iter()
        .filter_map(|(index, weight)| {
            vocabulary.term(index).map(|term| FeatureWeight {
                term: term.to_string(),
                weight,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LabeledExample;
    use crate::pipeline::TrainingConfig;

    #[test]
    fn test_top_features_are_named_terms() {
        let examples = vec![
            LabeledExample::new("great food", true),
            LabeledExample::new("great staff", true),
            LabeledExample::new("awful food", false),
            LabeledExample::new("awful staff", false),
        ];
        let model = TrainingOrchestrator::new(TrainingConfig::default())
            .unwrap()
            .pipeline()
            .fit(&examples)
            .unwrap();

        let features = top_features(&model, 3);
        assert_eq!(features.len(), 3);
        for pair in features.windows(2) {
            assert!(pair[0].weight.abs() >= pair[1].weight.abs());
        }
        assert!(features.iter().all(|f| f.term.starts_with("w:") || f.term.starts_with("c:")));
    }
}
