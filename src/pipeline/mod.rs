//! Training workflow.
//!
//! [`TrainingPipeline`] runs cross-validation and the final fit for any
//! extractor/trainer pair. [`TrainingOrchestrator`] wires the default
//! backends to a [`TrainingConfig`] and adds dataset loading.
//!
//! # Example
//!
//! ```rust,no_run
//! use sentiment::dataset::DatasetConfig;
//! use sentiment::pipeline::{TrainingConfig, train};
//!
//! # fn main() -> sentiment::error::Result<()> {
//! let config = TrainingConfig {
//!     dataset: DatasetConfig::new("yelp_labelled.txt"),
//!     ..Default::default()
//! };
//! let outcome = train(config)?;
//! println!("accuracy {:.2}", outcome.metrics.accuracy.mean);
//! # Ok(())
//! # }
//! ```

mod config;
mod orchestrator;
mod training;

pub use config::TrainingConfig;
pub use orchestrator::{DefaultModel, DefaultPipeline, TrainingOrchestrator, TrainingOutcome, train};
pub use training::TrainingPipeline;
