//! Text analysis: tokenizers, token filters and analyzer pipelines.
//!
//! The feature extractor uses these building blocks to turn raw review text
//! into word tokens and character n-grams.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use token::{Token, TokenStream};
pub use token_filter::{Filter, LowercaseFilter, StopFilter};
pub use tokenizer::{NgramTokenizer, RegexTokenizer, Tokenizer};
