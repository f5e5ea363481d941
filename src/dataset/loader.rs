//! Delimited text loader producing [`LabeledExample`]s.
//!
//! The expected layout is one example per line: free text in the first
//! column, a boolean label in the second. Extra columns are ignored. Quotes are
//! not special, since review text routinely contains unbalanced `"` characters.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dataset::types::{ClassBalance, LabeledExample};
use crate::error::{Result, SentimentError};

/// Where and how to read a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path of the delimited text file.
    pub path: PathBuf,
    /// Whether the first row is a header to skip.
    pub has_header: bool,
    /// Column delimiter. Must be a single ASCII character.
    pub delimiter: char,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            has_header: true,
            delimiter: '\t',
        }
    }
}

impl DatasetConfig {
    /// Tab-separated file with a header row at `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Reads labeled examples from delimited text.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    path: PathBuf,
    has_header: bool,
    delimiter: u8,
}

impl DatasetLoader {
    /// Create a loader from a config, validating the delimiter.
    pub fn new(config: &DatasetConfig) -> Result<Self> {
        if !config.delimiter.is_ascii() {
            return Err(SentimentError::config(format!(
                "delimiter must be an ASCII character, got {:?}",
                config.delimiter
            )));
        }
        Ok(Self {
            path: config.path.clone(),
            has_header: config.has_header,
            delimiter: config.delimiter as u8,
        })
    }

    /// Load every example from the configured file, in file order.
    ///
    /// # Errors
    ///
    /// [`SentimentError::NotFound`] if the file does not exist,
    /// [`SentimentError::DataFormat`] on the first malformed row.
    pub fn load(&self) -> Result<Vec<LabeledExample>> {
        let file = File::open(&self.path).map_err(|e| SentimentError::from_io(e, &self.path))?;
        let examples = self.from_reader(file)?;

        let balance = ClassBalance::of(&examples);
        info!(
            "Loaded {} examples from {} ({} positive, {} negative)",
            examples.len(),
            self.path.display(),
            balance.positive,
            balance.negative
        );
        Ok(examples)
    }

    /// Load examples from any reader.
    pub fn from_reader<R: Read>(&self, reader: R) -> Result<Vec<LabeledExample>> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_header)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        if self.has_header {
            let header = csv_reader.headers().map_err(map_csv_error)?;
            debug!("Skipping header row: {:?}", header);
        }

        let mut examples = Vec::new();
        let mut record = StringRecord::new();
        loop {
            match csv_reader.read_record(&mut record) {
                Ok(true) => examples.push(parse_record(&record)?),
                Ok(false) => break,
                Err(e) => return Err(map_csv_error(e)),
            }
        }

        Ok(examples)
    }
}

/// Load a dataset from `path`.
pub fn load<P: AsRef<Path>>(path: P, has_header: bool, delimiter: char) -> Result<Vec<LabeledExample>> {
    let config = DatasetConfig::new(path.as_ref())
        .with_header(has_header)
        .with_delimiter(delimiter);
    DatasetLoader::new(&config)?.load()
}

/// Parse a label column. Accepts `0`/`1` and `true`/`false` (any case).
pub fn parse_label(value: &str) -> Option<bool> {
    let value = value.trim();
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ if value.eq_ignore_ascii_case("true") => Some(true),
        _ if value.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn parse_record(record: &StringRecord) -> Result<LabeledExample> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();

    if record.len() < 2 {
        return Err(SentimentError::data_format(format!(
            "line {line}: expected at least 2 fields (text, label), found {}",
            record.len()
        )));
    }

    let raw_label = &record[1];
    let label = parse_label(raw_label).ok_or_else(|| {
        SentimentError::data_format(format!(
            "line {line}: label {raw_label:?} is not a boolean (expected 0/1 or true/false)"
        ))
    })?;

    Ok(LabeledExample::new(&record[0], label))
}

fn map_csv_error(err: csv::Error) -> SentimentError {
    let line = err.position().map(|p| p.line());
    match err.into_kind() {
        csv::ErrorKind::Io(io) => SentimentError::Io(io),
        kind => {
            let detail = match kind {
                csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {err}"),
                other => format!("{other:?}"),
            };
            match line {
                Some(line) => SentimentError::data_format(format!("line {line}: {detail}")),
                None => SentimentError::data_format(detail),
            }
        }
    }
}
