// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to data sources and scorers
// through these traits, so the JSON loader and the Burn
// inferencer can be swapped or faked in tests.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::lod::LodTensor;
use crate::domain::review::LabeledReview;
use crate::domain::word_dict::WordDict;

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Anything that can produce raw review texts and labelled examples.
///
/// Implementations:
///   - JsonReviewFile → a JSON file of word/label pairs
pub trait ReviewSource {
    /// All review texts in file order, used to build the vocabulary.
    fn texts(&self) -> Result<Vec<String>>;

    /// Labelled examples encoded against `dict`.
    fn load_all(&self, dict: &WordDict) -> Result<Vec<LabeledReview>>;
}

// ─── SentimentScorer ──────────────────────────────────────────────────────────
/// Anything that can score a batch of encoded reviews.
///
/// Returns one class-probability row per sequence in `words`, in the
/// same order. Column 0 is positive, column 1 negative.
pub trait SentimentScorer {
    fn score(&self, words: &LodTensor) -> Result<Vec<Vec<f32>>>;
}
