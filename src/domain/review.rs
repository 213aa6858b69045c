// ============================================================
// Layer 3 — LabeledReview Domain Type
// ============================================================
// One training or test example: the review's word indices and
// whether it is positive or negative.
//
// Class numbering matches the model's output columns:
//   0 → Positive
//   1 → Negative

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// The class index used by the classifier head.
    pub fn class(self) -> usize {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Negative => 1,
        }
    }
}

impl TryFrom<i64> for Sentiment {
    type Error = anyhow::Error;

    fn try_from(label: i64) -> Result<Self> {
        match label {
            0 => Ok(Sentiment::Positive),
            1 => Ok(Sentiment::Negative),
            other => bail!("label must be 0 (positive) or 1 (negative), got {other}"),
        }
    }
}

/// A review encoded against the word dictionary, with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledReview {
    pub words: Vec<i64>,
    pub label: Sentiment,
}

impl LabeledReview {
    pub fn new(words: Vec<i64>, label: Sentiment) -> Self {
        Self { words, label }
    }
}
