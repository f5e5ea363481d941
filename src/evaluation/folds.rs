//! Seeded, stratified k-fold partitioning.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::dataset::ClassBalance;
use crate::error::{Result, SentimentError};

/// One round of cross-validation: indices to train on and to hold out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    /// Round number, starting at 0.
    pub index: usize,
    /// Training indices in ascending order.
    pub train: Vec<usize>,
    /// Held-out indices in ascending order.
    pub test: Vec<usize>,
}

/// Stratified k-fold splitter.
///
/// Each class's indices are shuffled with a ChaCha8 generator seeded from
/// `seed`, then dealt round-robin across the folds. The deal continues from
/// where the previous class stopped, so fold sizes differ by at most one and
/// every fold holds both classes whenever each class has at least `k` members.
///
/// # Examples
///
/// ```
/// use sentiment::evaluation::StratifiedKFold;
///
/// let labels = [true, false, true, false, true, false];
/// let folds = StratifiedKFold::new(3, 7).unwrap().split(&labels).unwrap();
///
/// assert_eq!(folds.len(), 3);
/// for fold in &folds {
///     assert_eq!(fold.test.len(), 2);
///     assert_eq!(fold.train.len(), 4);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StratifiedKFold {
    folds: usize,
    seed: u64,
}

impl StratifiedKFold {
    /// Create a splitter with `folds` rounds.
    pub fn new(folds: usize, seed: u64) -> Result<Self> {
        if folds < 2 {
            return Err(SentimentError::config(format!(
                "cross-validation needs at least 2 folds, got {folds}"
            )));
        }
        Ok(Self { folds, seed })
    }

    pub fn folds(&self) -> usize {
        self.folds
    }

    /// Assign every example to a held-out fold.
    ///
    /// # Errors
    ///
    /// [`SentimentError::Training`] if there are fewer examples than folds, or
    /// if either class has fewer members than folds (some held-out fold would
    /// then contain a single class).
    pub fn assign(&self, labels: &[bool]) -> Result<Vec<usize>> {
        if labels.len() < self.folds {
            return Err(SentimentError::training(format!(
                "{} examples is fewer than {} folds",
                labels.len(),
                self.folds
            )));
        }
        let balance = ClassBalance::of_labels(labels);
        if balance.minority() < self.folds {
            return Err(SentimentError::training(format!(
                "each class needs at least {} examples for {}-fold cross-validation \
                 ({} positive, {} negative)",
                self.folds, self.folds, balance.positive, balance.negative
            )));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut negatives: Vec<usize> = (0..labels.len()).filter(|i| !labels[*i]).collect();
        let mut positives: Vec<usize> = (0..labels.len()).filter(|i| labels[*i]).collect();
        negatives.shuffle(&mut rng);
        positives.shuffle(&mut rng);

        let mut assignment = vec![0; labels.len()];
        for (slot, index) in negatives.into_iter().chain(positives).enumerate() {
            assignment[index] = slot % self.folds;
        }
        Ok(assignment)
    }

    /// Split into `folds` rounds, returned in round order.
    pub fn split(&self, labels: &[bool]) -> Result<Vec<Fold>> {
        let assignment = self.assign(labels)?;
        Ok((0..self.folds)
            .map(|k| {
                let (test, train): (Vec<usize>, Vec<usize>) =
                    (0..labels.len()).partition(|i| assignment[*i] == k);
                Fold {
                    index: k,
                    train,
                    test,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced(n: usize) -> Vec<bool> {
        (0..n).map(|i| i % 2 == 0).collect()
    }

    #[test]
    fn test_folds_are_disjoint_and_cover_everything() {
        let labels = balanced(23);
        let folds = StratifiedKFold::new(5, 1).unwrap().split(&labels).unwrap();

        let mut seen = vec![0usize; labels.len()];
        for fold in &folds {
            for i in &fold.test {
                seen[*i] += 1;
            }
            assert_eq!(fold.train.len() + fold.test.len(), labels.len());
            assert!(fold.train.iter().all(|i| !fold.test.contains(i)));
        }
        assert!(seen.iter().all(|count| *count == 1));
    }

    #[test]
    fn test_fold_sizes_are_balanced() {
        let labels = balanced(23);
        let folds = StratifiedKFold::new(5, 3).unwrap().split(&labels).unwrap();
        let sizes: Vec<usize> = folds.iter().map(|f| f.test.len()).collect();
        let min = sizes.iter().min().unwrap();
        let max = sizes.iter().max().unwrap();
        assert!(max - min <= 1, "{sizes:?}");
    }

    #[test]
    fn test_every_fold_has_both_classes() {
        let labels = balanced(10);
        let folds = StratifiedKFold::new(5, 42).unwrap().split(&labels).unwrap();
        for fold in &folds {
            let balance = ClassBalance::of_labels(
                &fold.test.iter().map(|i| labels[*i]).collect::<Vec<_>>(),
            );
            assert_eq!(balance.positive, 1);
            assert_eq!(balance.negative, 1);
        }
    }

    #[test]
    fn test_seed_determinism() {
        let labels = balanced(40);
        let a = StratifiedKFold::new(4, 9).unwrap().split(&labels).unwrap();
        let b = StratifiedKFold::new(4, 9).unwrap().split(&labels).unwrap();
        let c = StratifiedKFold::new(4, 10).unwrap().split(&labels).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_too_few_examples() {
        let err = StratifiedKFold::new(5, 1)
            .unwrap()
            .split(&balanced(4))
            .unwrap_err();
        assert!(matches!(err, SentimentError::Training(_)));
    }

    #[test]
    fn test_minority_class_too_small() {
        let mut labels = vec![true; 12];
        labels[0] = false;
        labels[1] = false;
        let err = StratifiedKFold::new(3, 1).unwrap().split(&labels).unwrap_err();
        assert!(matches!(err, SentimentError::Training(_)));
    }

    #[test]
    fn test_rejects_single_fold() {
        assert!(matches!(
            StratifiedKFold::new(1, 0),
            Err(SentimentError::Config(_))
        ));
    }
}
