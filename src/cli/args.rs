//! Command line argument parsing for the sentiment CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::pipeline::TrainingConfig;

/// Default location of the persisted model.
pub const DEFAULT_MODEL_PATH: &str = "sentiment.model";

/// Sentiment - train and run binary text sentiment classifiers
#[derive(Parser, Debug, Clone)]
#[command(name = "sentiment")]
#[command(about = "Train and run binary text sentiment classifiers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SentimentArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SentimentArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cross-validate, fit and persist a model
    Train(TrainArgs),

    /// Classify texts with a persisted model
    Predict(PredictArgs),

    /// Train in memory and score a few built-in opinions
    Demo(DemoArgs),

    /// Show metadata of a persisted model
    Inspect(InspectArgs),
}

/// Dataset location and layout shared by `train` and `demo`.
#[derive(Parser, Debug, Clone)]
pub struct DataArgs {
    /// Labeled data file (text, label per line)
    #[arg(short, long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// The data file has no header row
    #[arg(long)]
    pub no_header: bool,

    /// Column delimiter: a single ASCII character, or "tab"
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<char>,

    /// Number of cross-validation folds
    #[arg(long)]
    pub folds: Option<usize>,

    /// Seed for the fold assignment
    #[arg(long)]
    pub seed: Option<u64>,
}

impl DataArgs {
    /// Apply these flags on top of `config`.
    pub fn apply(&self, config: &mut TrainingConfig) -> Result<()> {
        if let Some(path) = &self.data {
            config.dataset.path = path.clone();
        }
        if self.no_header {
            config.dataset.has_header = false;
        }
        if let Some(delimiter) = self.delimiter {
            config.dataset.delimiter = delimiter;
        }
        if let Some(folds) = self.folds {
            config.folds = folds;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if config.dataset.path.as_os_str().is_empty() {
            return Err(SentimentError::config(
                "no data file given (use --data or set dataset.path in --config)",
            ));
        }
        Ok(())
    }
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Where to write the trained model
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Training configuration file (JSON); flags override its values
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Probability at or above which a text is labelled positive
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Run cross-validation folds one after another
    #[arg(long)]
    pub sequential: bool,

    /// Include per-fold metrics in the report
    #[arg(long)]
    pub show_folds: bool,
}

impl TrainArgs {
    /// Resolve the effective training configuration.
    pub fn to_config(&self) -> Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_json_file(path)?,
            None => TrainingConfig::default(),
        };
        self.data.apply(&mut config)?;
        if let Some(threshold) = self.threshold {
            config.decision_threshold = threshold;
        }
        if self.sequential {
            config.parallel_folds = false;
        }
        Ok(config)
    }
}

/// Arguments for prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    /// Persisted model to load
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Print a header line above the predictions
    #[arg(long)]
    pub header: bool,

    /// Texts to classify
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub texts: Vec<String>,
}

/// Arguments for the demo
#[derive(Parser, Debug, Clone)]
pub struct DemoArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

impl DemoArgs {
    pub fn to_config(&self) -> Result<TrainingConfig> {
        let mut config = TrainingConfig::default();
        self.data.apply(&mut config)?;
        Ok(config)
    }
}

/// Arguments for model inspection
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Persisted model to inspect
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Number of strongest features to list
    #[arg(long, default_value = "10")]
    pub top: usize,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Parse a delimiter flag: one ASCII character, `tab` or `\t`.
fn parse_delimiter(value: &str) -> std::result::Result<char, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok('\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c),
                _ => Err(format!(
                    "delimiter must be a single ASCII character or \"tab\", got {value:?}"
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_train_command() {
        let args = SentimentArgs::try_parse_from([
            "sentiment",
            "train",
            "--data",
            "yelp_labelled.txt",
            "--folds",
            "10",
            "--seed",
            "7",
            "--sequential",
        ])
        .unwrap();

        if let Command::Train(train_args) = args.command {
            assert_eq!(train_args.model, PathBuf::from(DEFAULT_MODEL_PATH));
            let config = train_args.to_config().unwrap();
            assert_eq!(config.dataset.path, PathBuf::from("yelp_labelled.txt"));
            assert_eq!(config.folds, 10);
            assert_eq!(config.seed, 7);
            assert!(!config.parallel_folds);
            assert!(config.dataset.has_header);
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_train_requires_data() {
        let args = SentimentArgs::try_parse_from(["sentiment", "train"]).unwrap();
        if let Command::Train(train_args) = args.command {
            assert!(matches!(
                train_args.to_config(),
                Err(SentimentError::Config(_))
            ));
        } else {
            panic!("Expected Train command");
        }
    }

    #[test]
    fn test_predict_command() {
        let args = SentimentArgs::try_parse_from([
            "sentiment",
            "predict",
            "--model",
            "/tmp/m.model",
            "This is excellent!",
            "This is an awful!",
        ])
        .unwrap();

        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.model, PathBuf::from("/tmp/m.model"));
            assert_eq!(predict_args.texts.len(), 2);
        } else {
            panic!("Expected Predict command");
        }

        assert!(SentimentArgs::try_parse_from(["sentiment", "predict"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let args = SentimentArgs::try_parse_from([
            "sentiment",
            "inspect",
            "--format",
            "json",
            "--pretty",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
        assert_eq!(args.verbosity(), 3);

        let args = SentimentArgs::try_parse_from(["sentiment", "-q", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_delimiter_parsing() {
        assert_eq!(parse_delimiter("tab"), Ok('\t'));
        assert_eq!(parse_delimiter("\\t"), Ok('\t'));
        assert_eq!(parse_delimiter(","), Ok(','));
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("→").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn test_demo_command() {
        let args = SentimentArgs::try_parse_from([
            "sentiment",
            "demo",
            "--data",
            "reviews.csv",
            "--delimiter",
            ",",
            "--no-header",
        ])
        .unwrap();

        if let Command::Demo(demo_args) = args.command {
            let config = demo_args.to_config().unwrap();
            assert_eq!(config.dataset.delimiter, ',');
            assert!(!config.dataset.has_header);
            assert_eq!(config.folds, 5);
        } else {
            panic!("Expected Demo command");
        }
    }
}
