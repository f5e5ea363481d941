//! Stop filter implementation.
//!
//! Removes common words that rarely help a classifier. The default list is the
//! usual short English list; callers doing sentiment work usually want
//! [`StopFilter::keep_negations`] so that "not" and "no" survive.

use std::collections::HashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default English stop words list.
pub const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

const NEGATIONS: &[&str] = &["no", "not", "but"];

/// A filter that removes stop words from the token stream.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: HashSet<String>,
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl StopFilter {
    /// Create a stop filter with the default English list.
    pub fn new() -> Self {
        Self::from_words(DEFAULT_ENGLISH_STOP_WORDS.iter().copied())
    }

    /// Create a stop filter with the default English list minus negations and
    /// contrastive conjunctions.
    pub fn keep_negations() -> Self {
        Self::from_words(
            DEFAULT_ENGLISH_STOP_WORDS
                .iter()
                .copied()
                .filter(|w| !NEGATIONS.contains(w)),
        )
    }

    /// Create a stop filter from a custom word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            stop_words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Number of stop words in the list.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = self.stop_words.clone();
        Ok(Box::new(tokens.filter(move |token| {
            !token.is_stopped() && !stop_words.contains(&token.text)
        })))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}
