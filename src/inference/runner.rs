//! Scores batches of raw text with a [`SentimentModel`].

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::FittedExtractor;
use crate::model::SentimentModel;

/// Prediction for one input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub input_text: String,
    /// `true` for positive sentiment.
    pub predicted_label: bool,
    /// Probability of positive sentiment, in `[0, 1]`.
    pub probability: f64,
    /// Raw classifier score; larger means more positive.
    pub score: f64,
}

impl PredictionResult {
    /// `"positive"` or `"negative"`.
    pub fn label_name(&self) -> &'static str {
        if self.predicted_label {
            "positive"
        } else {
            "negative"
        }
    }
}

/// Runs a model over batches of texts.
///
/// Borrowing the model keeps the runner stateless: the same model can back
/// any number of runners, on any number of threads.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use sentiment::features::TfIdfVocabulary;
/// use sentiment::inference::InferenceRunner;
/// use sentiment::model::load_model;
///
/// # fn main() -> sentiment::error::Result<()> {
/// let model = load_model::<TfIdfVocabulary>(Path::new("sentiment.model"))?;
/// let results = InferenceRunner::new(&model).run(&["This is excellent!"])?;
/// println!("{}: {}", results[0].input_text, results[0].label_name());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct InferenceRunner<'m, X> {
    model: &'m SentimentModel<X>,
}

impl<'m, X: FittedExtractor> InferenceRunner<'m, X> {
    pub fn new(model: &'m SentimentModel<X>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'m SentimentModel<X> {
        self.model
    }

    /// Score one text.
    pub fn predict<S: AsRef<str>>(&self, text: S) -> Result<PredictionResult> {
        let text = text.as_ref();
        let prediction = self.model.predict_text(text)?;
        Ok(PredictionResult {
            input_text: text.to_string(),
            predicted_label: prediction.label,
            probability: prediction.probability,
            score: prediction.score,
        })
    }

    /// Score every text, returning results in input order.
    pub fn run<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<PredictionResult>> {
        debug!("Scoring {} texts", texts.len());
        texts.iter().map(|text| self.predict(text)).collect()
    }

    /// Like [`run`](Self::run), spreading the batch over the rayon pool.
    /// Output order still matches input order.
    pub fn run_parallel<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Vec<PredictionResult>> {
        debug!("Scoring {} texts in parallel", texts.len());
        texts.par_iter().map(|text| self.predict(text)).collect()
    }
}
