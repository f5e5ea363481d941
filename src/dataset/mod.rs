//! Labeled text datasets and the delimited-file loader.
//!
//! # Example
//!
//! ```rust,no_run
//! use sentiment::dataset::{DatasetConfig, DatasetLoader};
//!
//! # fn main() -> sentiment::error::Result<()> {
//! let config = DatasetConfig::new("yelp_labelled.txt");
//! let examples = DatasetLoader::new(&config)?.load()?;
//! println!("{} examples", examples.len());
//! # Ok(())
//! # }
//! ```

mod loader;
mod types;

pub use loader::{DatasetConfig, DatasetLoader, load, parse_label};
pub use types::{ClassBalance, LabeledExample};
