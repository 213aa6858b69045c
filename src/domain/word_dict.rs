// ============================================================
// Layer 3 — Word Dictionary
// ============================================================
// Maps every token seen in the full dataset to an integer index
// used by the embedding table.
//
// Index assignment:
//   1. Count each whitespace-separated token over all reviews
//   2. Sort by descending count, ties broken alphabetically
//   3. Assign 0, 1, 2, ... in that order
//   4. Append "<unk>" as the very last index
//
// The <unk> entry is the fallback for any word the model never
// saw, so lookups never fail.
//
// Example:
//   reviews: ["good", "bad", "good"]
//   → {"good": 0, "bad": 1, "<unk>": 2}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The out-of-vocabulary sentinel token.
pub const UNK_TOKEN: &str = "<unk>";

/// Read-only vocabulary built once from the full dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordDict {
    index: HashMap<String, usize>,
    unk:   usize,
}

impl WordDict {
    /// Build the vocabulary from raw review texts.
    pub fn build<S: AsRef<str>>(reviews: &[S]) -> Self {
        let mut freq: HashMap<&str, usize> = HashMap::new();
        for review in reviews {
            for word in review.as_ref().split_whitespace() {
                *freq.entry(word).or_insert(0) += 1;
            }
        }

        let mut words: Vec<(&str, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let mut index: HashMap<String, usize> = words
            .iter()
            .enumerate()
            .map(|(i, (w, _))| (w.to_string(), i))
            .collect();

        // The sentinel always takes the final index, even if "<unk>"
        // also appears literally in the data.
        let unk = index.len();
        index.insert(UNK_TOKEN.to_string(), unk);

        tracing::debug!("Built word dictionary with {} entries", index.len());
        Self { index, unk }
    }

    /// Exact lookup, `None` for unknown words.
    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Lookup with `<unk>` fallback.
    pub fn index_of(&self, word: &str) -> usize {
        self.get(word).unwrap_or(self.unk)
    }

    /// Split a review on whitespace and map each word to its index.
    pub fn encode(&self, review: &str) -> Vec<i64> {
        review
            .split_whitespace()
            .map(|w| self.index_of(w) as i64)
            .collect()
    }

    pub fn unk_index(&self) -> usize {
        self.unk
    }

    /// Number of entries including `<unk>` — the embedding table height.
    pub fn len(&self) -> usize {
        self.unk + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
