//! # Sentiment
//!
//! Binary text sentiment classification: load labeled reviews, estimate
//! quality with seeded cross-validation, fit a final model and score new text.
//!
//! ## Features
//!
//! - Tab-separated corpus loading with strict row validation
//! - TF-IDF features over word and character n-grams
//! - L2-regularised logistic regression
//! - Stratified k-fold cross-validation with accuracy, AUC and F1
//! - Versioned, checksummed model files
//!
//! ## Example
//!
//! ```
//! use sentiment::dataset::LabeledExample;
//! use sentiment::inference::InferenceRunner;
//! use sentiment::pipeline::{TrainingConfig, TrainingOrchestrator};
//!
//! let examples: Vec<LabeledExample> = (0..10)
//!     .map(|i| match i % 2 {
//!         0 => LabeledExample::new(format!("excellent meal {i}"), true),
//!         _ => LabeledExample::new(format!("awful meal {i}"), false),
//!     })
//!     .collect();
//!
//! let orchestrator = TrainingOrchestrator::new(TrainingConfig::default()).unwrap();
//! let outcome = orchestrator.run_on(&examples).unwrap();
//! let results = InferenceRunner::new(&outcome.model).run(&["This is excellent!"]).unwrap();
//! assert!(results[0].predicted_label);
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod inference;
pub mod model;
pub mod pipeline;
pub mod report;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
