//! Sparse, fixed-dimension feature vector.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};

/// A feature vector of fixed `dimension`, stored sparsely.
///
/// Indices are strictly increasing and every index is below `dimension`.
/// Entries that are absent are zero.
///
/// # Examples
///
/// ```
/// use sentiment::features::FeatureVector;
///
/// let v = FeatureVector::from_pairs(5, vec![(3, 0.5), (1, 2.0), (3, 0.5)]).unwrap();
/// assert_eq!(v.dimension(), 5);
/// assert_eq!(v.to_dense(), vec![0.0, 2.0, 0.0, 1.0, 0.0]);
/// assert_eq!(v.dot(&[1.0, 1.0, 1.0, 2.0, 1.0]), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dimension: usize,
    indices: Vec<u32>,
    values: Vec<f32>,
}

impl FeatureVector {
    /// An all-zero vector.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from `(index, value)` pairs in any order. Duplicate indices are
    /// summed and zero values dropped.
    pub fn from_pairs(dimension: usize, mut pairs: Vec<(u32, f32)>) -> Result<Self> {
        pairs.sort_unstable_by_key(|(index, _)| *index);

        let mut indices: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f32> = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            if index as usize >= dimension {
                return Err(SentimentError::internal(format!(
                    "feature index {index} out of range for dimension {dimension}"
                )));
            }
            if indices.last() == Some(&index) {
                if let Some(last) = values.last_mut() {
                    *last += value;
                }
            } else {
                indices.push(index);
                values.push(value);
            }
        }

        let mut vector = Self {
            dimension,
            indices,
            values,
        };
        vector.prune_zeros();
        Ok(vector)
    }

    /// Build from a dense slice.
    pub fn from_dense(dense: &[f32]) -> Self {
        let (indices, values) = dense
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (i as u32, *v))
            .unzip();
        Self {
            dimension: dense.len(),
            indices,
            values,
        }
    }

    fn prune_zeros(&mut self) {
        if self.values.iter().all(|v| *v != 0.0) {
            return;
        }
        let (indices, values) = self
            .indices
            .iter()
            .zip(&self.values)
            .filter(|(_, v)| **v != 0.0)
            .map(|(i, v)| (*i, *v))
            .unzip();
        self.indices = indices;
        self.values = values;
    }

    /// Logical width of the vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Iterate over the non-zero `(index, value)` entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices
            .iter()
            .zip(&self.values)
            .map(|(i, v)| (*i as usize, *v))
    }

    /// Dot product with a dense weight vector. Entries past the end of
    /// `weights` contribute nothing. Does not allocate.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.iter()
            .filter_map(|(i, v)| weights.get(i).map(|w| w * v as f64))
            .sum()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.values
            .iter()
            .map(|v| (*v as f64) * (*v as f64))
            .sum::<f64>()
            .sqrt()
    }

    /// Scale to unit Euclidean norm. Zero vectors stay zero.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for value in &mut self.values {
                *value = (*value as f64 / norm) as f32;
            }
        }
    }

    /// Expand to a dense vector of length `dimension`.
    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0; self.dimension];
        for (i, v) in self.iter() {
            dense[i] = v;
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_sorts_and_merges() {
        let v = FeatureVector::from_pairs(4, vec![(2, 1.0), (0, 0.5), (2, 1.5), (1, 0.0)]).unwrap();
        let entries: Vec<(usize, f32)> = v.iter().collect();
        assert_eq!(entries, vec![(0, 0.5), (2, 2.5)]);
        assert_eq!(v.nnz(), 2);
    }

    #[test]
    fn test_from_pairs_rejects_out_of_range() {
        assert!(FeatureVector::from_pairs(2, vec![(2, 1.0)]).is_err());
    }

    #[test]
    fn test_dense_round_trip() {
        let dense = vec![0.0, 1.5, 0.0, -2.0];
        let v = FeatureVector::from_dense(&dense);
        assert_eq!(v.dimension(), 4);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.to_dense(), dense);
    }

    #[test]
    fn test_normalize() {
        let mut v = FeatureVector::from_pairs(3, vec![(0, 3.0), (2, 4.0)]).unwrap();
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.to_dense()[0] - 0.6).abs() < 1e-6);

        let mut zero = FeatureVector::zeros(3);
        zero.normalize();
        assert_eq!(zero.norm(), 0.0);
    }

    #[test]
    fn test_dot_ignores_missing_weights() {
        let v = FeatureVector::from_pairs(10, vec![(1, 2.0), (9, 1.0)]).unwrap();
        assert_eq!(v.dot(&[0.0, 0.5]), 1.0);
    }
}
