//! Character n-gram tokenizer.
//!
//! Grams are cut over extended grapheme clusters rather than `char`s, so a
//! combining accent or an emoji sequence never gets split in half.

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{Result, SentimentError};

/// Marker prepended to the text when boundaries are enabled.
pub const START_MARKER: &str = "<";
/// Marker appended to the text when boundaries are enabled.
pub const END_MARKER: &str = ">";

/// A tokenizer that generates character n-grams.
///
/// # Examples
///
/// ```
/// use sentiment::analysis::tokenizer::Tokenizer;
/// use sentiment::analysis::tokenizer::ngram::NgramTokenizer;
///
/// let tokenizer = NgramTokenizer::new(3, 3).unwrap();
/// let grams: Vec<_> = tokenizer.tokenize("good").unwrap().map(|t| t.text).collect();
/// assert_eq!(grams, vec!["goo", "ood"]);
///
/// let tokenizer = NgramTokenizer::new(3, 3).unwrap().with_boundaries(true);
/// let grams: Vec<_> = tokenizer.tokenize("ok").unwrap().map(|t| t.text).collect();
/// assert_eq!(grams, vec!["<ok", "ok>"]);
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    min_gram: usize,
    max_gram: usize,
    boundaries: bool,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_gram` is 0 or `max_gram` is less than `min_gram`.
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        if min_gram == 0 {
            return Err(SentimentError::analysis("min_gram must be at least 1"));
        }
        if max_gram < min_gram {
            return Err(SentimentError::analysis(format!(
                "max_gram ({max_gram}) must be >= min_gram ({min_gram})"
            )));
        }
        Ok(Self {
            min_gram,
            max_gram,
            boundaries: false,
        })
    }

    /// Create a trigram tokenizer (n=3).
    pub fn trigram() -> Self {
        Self {
            min_gram: 3,
            max_gram: 3,
            boundaries: false,
        }
    }

    /// Wrap the text in start/end markers before cutting grams.
    pub fn with_boundaries(mut self, boundaries: bool) -> Self {
        self.boundaries = boundaries;
        self
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut units: Vec<&str> = Vec::new();
        if self.boundaries {
            units.push(START_MARKER);
        }
        units.extend(text.graphemes(true));
        if self.boundaries {
            units.push(END_MARKER);
        }

        // Byte offsets refer to the original text; markers have zero width.
        let mut offsets = Vec::with_capacity(units.len() + 1);
        let mut offset = 0;
        for (i, unit) in units.iter().enumerate() {
            offsets.push(offset);
            let is_marker = self.boundaries && (i == 0 || i == units.len() - 1);
            if !is_marker {
                offset += unit.len();
            }
        }
        offsets.push(offset);

        let mut tokens = Vec::new();
        for start in 0..units.len() {
            for gram_size in self.min_gram..=self.max_gram {
                let end = start + gram_size;
                if end > units.len() {
                    break;
                }
                let gram: String = units[start..end].concat();
                tokens.push(Token::with_offsets(
                    gram,
                    tokens.len(),
                    offsets[start],
                    offsets[end],
                ));
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}
