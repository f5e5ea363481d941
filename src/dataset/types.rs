//! Common types for labeled datasets.

use serde::{Deserialize, Serialize};

/// One row of a sentiment corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Free text of the review or opinion.
    pub text: String,
    /// `true` for positive sentiment.
    pub label: bool,
}

impl LabeledExample {
    /// Create a new example.
    pub fn new<S: Into<String>>(text: S, label: bool) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Positive/negative counts of a set of examples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBalance {
    pub positive: usize,
    pub negative: usize,
}

impl ClassBalance {
    /// Count the labels of `examples`.
    pub fn of(examples: &[LabeledExample]) -> Self {
        let positive = examples.iter().filter(|e| e.label).count();
        Self {
            positive,
            negative: examples.len() - positive,
        }
    }

    /// Count raw labels.
    pub fn of_labels(labels: &[bool]) -> Self {
        let positive = labels.iter().filter(|l| **l).count();
        Self {
            positive,
            negative: labels.len() - positive,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative
    }

    /// Size of the smaller class.
    pub fn minority(&self) -> usize {
        self.positive.min(self.negative)
    }

    /// Whether both classes are present.
    pub fn has_both_classes(&self) -> bool {
        self.positive > 0 && self.negative > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_balance() {
        let examples = vec![
            LabeledExample::new("good", true),
            LabeledExample::new("bad", false),
            LabeledExample::new("great", true),
        ];
        let balance = ClassBalance::of(&examples);
        assert_eq!(balance.positive, 2);
        assert_eq!(balance.negative, 1);
        assert_eq!(balance.total(), 3);
        assert_eq!(balance.minority(), 1);
        assert!(balance.has_both_classes());

        assert!(!ClassBalance::of_labels(&[true, true]).has_both_classes());
    }
}
