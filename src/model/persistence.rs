//! Versioned binary model files.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! magic "SNTM" | format version u32 | crc32(payload) u32 | payload length u64 | payload
//! ```
//!
//! The payload is the bincode encoding of the [`SentimentModel`], whose
//! metadata leads so that version checks can run before the extractor state is
//! decoded.

use std::fs;
use std::io::Write;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{Result, SentimentError};
use crate::features::FittedExtractor;
use crate::model::sentiment::{ModelMetadata, SentimentModel};

/// File signature of a model file.
pub const MODEL_MAGIC: &[u8; 4] = b"SNTM";

/// Version of the container layout. Bump on any incompatible change.
pub const MODEL_FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = 4 + 4 + 4 + 8;

/// Encode a model into the versioned container.
pub fn encode_model<X: FittedExtractor>(model: &SentimentModel<X>) -> Result<Vec<u8>> {
    let payload = bincode::serialize(model)
        .map_err(|e| SentimentError::internal(format!("failed to serialize model: {e}")))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MODEL_MAGIC);
    bytes.write_u32::<LittleEndian>(MODEL_FORMAT_VERSION)?;
    bytes.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
    bytes.write_u64::<LittleEndian>(payload.len() as u64)?;
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode a model from the versioned container.
///
/// # Errors
///
/// [`SentimentError::ModelVersion`] when the container or feature schema
/// version differs from the running code, [`SentimentError::DataFormat`] when
/// the bytes are not an intact model file.
pub fn decode_model<X: FittedExtractor>(bytes: &[u8]) -> Result<SentimentModel<X>> {
    if bytes.len() < HEADER_LEN {
        return Err(SentimentError::data_format(format!(
            "model file is truncated: {} bytes, header needs {HEADER_LEN}",
            bytes.len()
        )));
    }
    if &bytes[..4] != MODEL_MAGIC {
        return Err(SentimentError::data_format("not a sentiment model file"));
    }

    let mut header = &bytes[4..HEADER_LEN];
    let version = header.read_u32::<LittleEndian>()?;
    if version != MODEL_FORMAT_VERSION {
        return Err(SentimentError::model_version(format!(
            "model format version {version} is not supported (expected {MODEL_FORMAT_VERSION})"
        )));
    }
    let checksum = header.read_u32::<LittleEndian>()?;
    let length = header.read_u64::<LittleEndian>()?;

    let payload = &bytes[HEADER_LEN..];
    if payload.len() as u64 != length {
        return Err(SentimentError::data_format(format!(
            "model payload is {} bytes, header declares {length}",
            payload.len()
        )));
    }
    if crc32fast::hash(payload) != checksum {
        return Err(SentimentError::data_format("model checksum mismatch"));
    }

    let metadata: ModelMetadata = bincode::deserialize(payload)
        .map_err(|e| SentimentError::data_format(format!("invalid model metadata: {e}")))?;
    if metadata.feature_schema_version != X::SCHEMA_VERSION {
        return Err(SentimentError::model_version(format!(
            "feature schema version {} is not supported (expected {})",
            metadata.feature_schema_version,
            X::SCHEMA_VERSION
        )));
    }

    let model: SentimentModel<X> = bincode::deserialize(payload)
        .map_err(|e| SentimentError::data_format(format!("invalid model payload: {e}")))?;
    if model.extractor().schema_version() != X::SCHEMA_VERSION {
        return Err(SentimentError::model_version(format!(
            "extractor state has schema version {}, expected {}",
            model.extractor().schema_version(),
            X::SCHEMA_VERSION
        )));
    }
    model
        .check_consistency()
        .map_err(|e| SentimentError::data_format(e.to_string()))?;

    debug!(
        "Decoded model {} ({} features)",
        model.metadata().id,
        model.dimension()
    );
    Ok(model)
}

/// Write a model to `path`.
///
/// The bytes go to a temporary file in the destination directory which is then
/// renamed over `path`, so readers never observe a partial model.
pub fn save_model<X: FittedExtractor>(model: &SentimentModel<X>, path: &Path) -> Result<()> {
    let bytes = encode_model(model)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| SentimentError::from_io(e, dir))?;
    file.write_all(&bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| SentimentError::Io(e.error))?;

    info!(
        "Saved model {} to {} ({} bytes)",
        model.metadata().id,
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// Read a model from `path`.
pub fn load_model<X: FittedExtractor>(path: &Path) -> Result<SentimentModel<X>> {
    let bytes = fs::read(path).map_err(|e| SentimentError::from_io(e, path))?;
    let model = decode_model(&bytes)?;
    info!(
        "Loaded model {} from {} (trained on {} examples)",
        model.metadata().id,
        path.display(),
        model.metadata().training_examples
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{BinaryTrainer, LogisticRegressionTrainer};
    use crate::features::{FeatureExtractor, TfIdfFeaturizer, TfIdfVocabulary};
    use tempfile::TempDir;

    fn model_with_schema(schema_version: u32) -> SentimentModel<TfIdfVocabulary> {
        let texts = ["great food", "loved it", "awful food", "hated it"];
        let vocabulary = TfIdfFeaturizer::default().fit(&texts).unwrap();
        let features = vocabulary.transform_batch(&texts).unwrap();
        let classifier = LogisticRegressionTrainer::default()
            .train(&features, &[true, true, false, false])
            .unwrap();
        let metadata = ModelMetadata::new(schema_version, texts.len(), "tfidf", "logistic_regression");
        SentimentModel::new(metadata, vocabulary, classifier, 0.5).unwrap()
    }

    fn model() -> SentimentModel<TfIdfVocabulary> {
        model_with_schema(TfIdfVocabulary::SCHEMA_VERSION)
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sentiment.model");
        let model = model();

        save_model(&model, &path).unwrap();
        let loaded: SentimentModel<TfIdfVocabulary> = load_model(&path).unwrap();

        assert_eq!(loaded.metadata(), model.metadata());
        assert_eq!(loaded.classifier(), model.classifier());
        assert_eq!(loaded.threshold(), model.threshold());
        for text in ["great food", "hated the place", "unseen words"] {
            assert_eq!(
                loaded.predict_text(text).unwrap(),
                model.predict_text(text).unwrap()
            );
        }
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sentiment.model");
        fs::write(&path, b"stale").unwrap();

        save_model(&model(), &path).unwrap();
        assert!(load_model::<TfIdfVocabulary>(&path).is_ok());
        // Only the model itself remains; the temporary file was renamed.
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode_model(&model()).unwrap();
        assert_eq!(&bytes[..4], b"SNTM");
        assert_eq!(
            u32::from_le_bytes(bytes[4..8].try_into().unwrap()),
            MODEL_FORMAT_VERSION
        );
        let length = u64::from_le_bytes(bytes[12..20].try_into().unwrap());
        assert_eq!(length as usize, bytes.len() - HEADER_LEN);
    }

    #[test]
    fn test_format_version_mismatch() {
        let mut bytes = encode_model(&model()).unwrap();
        bytes[4..8].copy_from_slice(&(MODEL_FORMAT_VERSION + 1).to_le_bytes());
        assert!(matches!(
            decode_model::<TfIdfVocabulary>(&bytes),
            Err(SentimentError::ModelVersion(_))
        ));
    }

    #[test]
    fn test_feature_schema_mismatch() {
        let bytes = encode_model(&model_with_schema(TfIdfVocabulary::SCHEMA_VERSION + 1)).unwrap();
        assert!(matches!(
            decode_model::<TfIdfVocabulary>(&bytes),
            Err(SentimentError::ModelVersion(_))
        ));
    }

    #[test]
    fn test_corrupt_files() {
        let bytes = encode_model(&model()).unwrap();

        let mut bad_magic = bytes.clone();
        bad_magic[0] = b'X';
        assert!(matches!(
            decode_model::<TfIdfVocabulary>(&bad_magic),
            Err(SentimentError::DataFormat(_))
        ));

        let mut flipped = bytes.clone();
        let last = flipped.len() - 1;
        flipped[last] ^= 0xff;
        assert!(matches!(
            decode_model::<TfIdfVocabulary>(&flipped),
            Err(SentimentError::DataFormat(_))
        ));

        assert!(matches!(
            decode_model::<TfIdfVocabulary>(&bytes[..bytes.len() - 3]),
            Err(SentimentError::DataFormat(_))
        ));
        assert!(matches!(
            decode_model::<TfIdfVocabulary>(&bytes[..10]),
            Err(SentimentError::DataFormat(_))
        ));
    }

    #[test]
    fn test_missing_model_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_model::<TfIdfVocabulary>(&temp_dir.path().join("absent.model")).unwrap_err();
        assert!(matches!(err, SentimentError::NotFound(_)));
    }
}
