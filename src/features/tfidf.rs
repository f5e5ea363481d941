//! TF-IDF text featurizer over word n-grams and character n-grams.
//!
//! Terms come from two sources:
//! - word n-grams (`w:` prefix) over the analyzed word tokens, lengths
//!   `1..=word_ngram_max`;
//! - character n-grams (`c:` prefix) of length `char_ngram` over the
//!   whitespace-collapsed text with `<`/`>` boundary markers.
//!
//! The vocabulary is assigned in first-seen order over the fit corpus, so the
//! same corpus always yields the same feature layout. Output vectors are
//! L2-normalised.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::debug;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::{LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::{NgramTokenizer, RegexTokenizer, Tokenizer};
use crate::error::{Result, SentimentError};
use crate::features::extractor::{FeatureExtractor, FittedExtractor};
use crate::features::vector::FeatureVector;

/// Version of the term layout produced by [`TfIdfVocabulary`].
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

const WORD_PREFIX: &str = "w:";
const CHAR_PREFIX: &str = "c:";

/// Configuration for [`TfIdfFeaturizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfIdfConfig {
    /// Longest word n-gram. 0 disables word features.
    pub word_ngram_max: usize,
    /// Character n-gram length. `None` disables character features.
    pub char_ngram: Option<usize>,
    /// Lowercase text before extracting terms.
    pub lowercase: bool,
    /// Drop English stop words (negations are always kept).
    pub remove_stop_words: bool,
    /// Terms seen in fewer documents than this are dropped.
    pub min_document_frequency: usize,
    /// Keep at most this many terms, preferring the most frequent.
    pub max_features: Option<usize>,
    /// Use `1 + ln(tf)` instead of raw term counts.
    pub sublinear_tf: bool,
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self {
            word_ngram_max: 2,
            char_ngram: Some(3),
            lowercase: true,
            remove_stop_words: false,
            min_document_frequency: 1,
            max_features: None,
            sublinear_tf: false,
        }
    }
}

impl TfIdfConfig {
    /// Check the configuration for values that cannot produce features.
    pub fn validate(&self) -> Result<()> {
        if self.word_ngram_max == 0 && self.char_ngram.is_none() {
            return Err(SentimentError::config(
                "at least one of word n-grams or character n-grams must be enabled",
            ));
        }
        if self.char_ngram == Some(0) {
            return Err(SentimentError::config("char_ngram must be at least 1"));
        }
        if self.min_document_frequency == 0 {
            return Err(SentimentError::config(
                "min_document_frequency must be at least 1",
            ));
        }
        if self.max_features == Some(0) {
            return Err(SentimentError::config("max_features must be at least 1"));
        }
        Ok(())
    }
}

/// Splits text into prefixed terms according to a [`TfIdfConfig`].
struct TermExtractor {
    config: TfIdfConfig,
    words: PipelineAnalyzer,
    chars: Option<NgramTokenizer>,
}

impl TermExtractor {
    fn new(config: TfIdfConfig) -> Result<Self> {
        config.validate()?;

        let mut words = PipelineAnalyzer::new(Arc::new(RegexTokenizer::new()?));
        if config.lowercase {
            words = words.add_filter(Arc::new(LowercaseFilter::new()));
        }
        if config.remove_stop_words {
            words = words.add_filter(Arc::new(StopFilter::keep_negations()));
        }
        let words = words.with_name("tfidf_words");

        let chars = match config.char_ngram {
            Some(n) => Some(NgramTokenizer::new(n, n)?.with_boundaries(true)),
            None => None,
        };

        Ok(Self {
            config,
            words,
            chars,
        })
    }

    fn terms(&self, text: &str) -> Result<Vec<String>> {
        let mut terms = Vec::new();

        if self.config.word_ngram_max > 0 {
            let tokens: Vec<String> = self.words.analyze(text)?.map(|t| t.text).collect();
            for n in 1..=self.config.word_ngram_max {
                for window in tokens.windows(n) {
                    terms.push(format!("{WORD_PREFIX}{}", window.join(" ")));
                }
            }
        }

        if let Some(chars) = &self.chars {
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            let normalized = if self.config.lowercase {
                collapsed.to_lowercase()
            } else {
                collapsed
            };
            if !normalized.is_empty() {
                terms.extend(
                    chars
                        .tokenize(&normalized)?
                        .map(|t| format!("{CHAR_PREFIX}{}", t.text)),
                );
            }
        }

        Ok(terms)
    }
}

/// TF-IDF featurizer configuration. Fitting produces a [`TfIdfVocabulary`].
///
/// # Examples
///
/// ```
/// use sentiment::features::{FeatureExtractor, FittedExtractor, TfIdfFeaturizer};
///
/// let featurizer = TfIdfFeaturizer::default();
/// let vocabulary = featurizer.fit(&["great food", "awful service"]).unwrap();
///
/// let features = vocabulary.transform("great service").unwrap();
/// assert_eq!(features.dimension(), vocabulary.dimension());
/// assert!((features.norm() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TfIdfFeaturizer {
    config: TfIdfConfig,
}

impl TfIdfFeaturizer {
    pub fn new(config: TfIdfConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TfIdfConfig {
        &self.config
    }
}

impl FeatureExtractor for TfIdfFeaturizer {
    type Fitted = TfIdfVocabulary;

    fn fit(&self, texts: &[&str]) -> Result<TfIdfVocabulary> {
        if texts.is_empty() {
            return Err(SentimentError::training(
                "cannot fit a featurizer on an empty corpus",
            ));
        }

        let extractor = TermExtractor::new(self.config.clone())?;

        // First-seen order keeps the layout independent of hash seeds.
        let mut order: Vec<String> = Vec::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let mut seen: HashSet<String> = HashSet::new();
            for term in extractor.terms(text)? {
                if seen.insert(term.clone()) {
                    let df = document_frequency.entry(term.clone()).or_insert(0);
                    if *df == 0 {
                        order.push(term);
                    }
                    *df += 1;
                }
            }
        }

        let mut kept: Vec<(usize, String, usize)> = order
            .into_iter()
            .enumerate()
            .filter_map(|(rank, term)| {
                let df = document_frequency.get(&term).copied().unwrap_or(0);
                (df >= self.config.min_document_frequency).then_some((rank, term, df))
            })
            .collect();

        if let Some(max_features) = self.config.max_features {
            if kept.len() > max_features {
                kept.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
                kept.truncate(max_features);
                kept.sort_by_key(|(rank, _, _)| *rank);
            }
        }

        let n_documents = texts.len();
        let mut terms = Vec::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (_, term, df) in kept {
            // IDF = ln((N + 1) / (df + 1)) + 1
            idf.push((((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0) as f32);
            terms.push(term);
        }

        debug!(
            "Fitted TF-IDF vocabulary: {} terms from {} documents",
            terms.len(),
            n_documents
        );

        TfIdfVocabulary::from_parts(TfIdfSnapshot {
            config: self.config.clone(),
            terms,
            idf,
            n_documents,
            schema_version: FEATURE_SCHEMA_VERSION,
        })
    }

    fn name(&self) -> &'static str {
        "tfidf"
    }
}

/// Serialized form of a fitted vocabulary. Terms are listed in index order.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TfIdfSnapshot {
    config: TfIdfConfig,
    terms: Vec<String>,
    idf: Vec<f32>,
    n_documents: usize,
    schema_version: u32,
}

/// A fitted TF-IDF vocabulary: term index, IDF weights and the analyzer that
/// produced them.
pub struct TfIdfVocabulary {
    snapshot: TfIdfSnapshot,
    index: HashMap<String, u32>,
    extractor: TermExtractor,
}

impl TfIdfVocabulary {
    fn from_parts(snapshot: TfIdfSnapshot) -> Result<Self> {
        if snapshot.terms.len() != snapshot.idf.len() {
            return Err(SentimentError::data_format(format!(
                "vocabulary has {} terms but {} idf weights",
                snapshot.terms.len(),
                snapshot.idf.len()
            )));
        }
        let index = snapshot
            .terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i as u32))
            .collect();
        let extractor = TermExtractor::new(snapshot.config.clone())?;
        Ok(Self {
            snapshot,
            index,
            extractor,
        })
    }

    /// Configuration the vocabulary was fitted with.
    pub fn config(&self) -> &TfIdfConfig {
        &self.snapshot.config
    }

    /// Number of documents seen while fitting.
    pub fn n_documents(&self) -> usize {
        self.snapshot.n_documents
    }

    /// Index of a raw term (including its `w:`/`c:` prefix).
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.index.get(term).map(|i| *i as usize)
    }

    /// Term at a feature index.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.snapshot.terms.get(index).map(String::as_str)
    }
}

impl FittedExtractor for TfIdfVocabulary {
    const SCHEMA_VERSION: u32 = FEATURE_SCHEMA_VERSION;

    fn transform(&self, text: &str) -> Result<FeatureVector> {
        let mut counts: HashMap<u32, f32> = HashMap::new();
        for term in self.extractor.terms(text)? {
            if let Some(&idx) = self.index.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let pairs = counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.snapshot.config.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (idx, tf * self.snapshot.idf[idx as usize])
            })
            .collect();

        let mut vector = FeatureVector::from_pairs(self.dimension(), pairs)?;
        vector.normalize();
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.snapshot.terms.len()
    }

    fn schema_version(&self) -> u32 {
        self.snapshot.schema_version
    }
}

impl std::fmt::Debug for TfIdfVocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVocabulary")
            .field("vocabulary_size", &self.snapshot.terms.len())
            .field("n_documents", &self.snapshot.n_documents)
            .field("analyzer", &self.extractor.words.name())
            .finish()
    }
}

impl Serialize for TfIdfVocabulary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.snapshot.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TfIdfVocabulary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let snapshot = TfIdfSnapshot::deserialize(deserializer)?;
        TfIdfVocabulary::from_parts(snapshot).map_err(D::Error::custom)
    }
}
