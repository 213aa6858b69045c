// ============================================================
// Layer 4 — Review File Loader
// ============================================================
// Reads a JSON dataset of one-word reviews. Two layouts are
// accepted:
//
//   1. An array of records
//        [{"word": "angel", "label": 0}, {"word": "grief", "label": 1}]
//      ("review" is accepted in place of "word")
//
//   2. An object mapping review text to label
//        {"angel": 0, "grief": 1}
//
// Labels: 0 = positive, 1 = negative.
//
// The same file type backs all three dataset paths (full set used
// for the vocabulary, train split, test split).
//
// Reference: serde_json documentation (untagged enums)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::domain::review::{LabeledReview, Sentiment};
use crate::domain::traits::ReviewSource;
use crate::domain::word_dict::WordDict;

#[derive(Debug, Deserialize)]
struct ReviewRecord {
    #[serde(alias = "review")]
    word:  String,
    label: i64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReviewFileLayout {
    Records(Vec<ReviewRecord>),
    Map(BTreeMap<String, i64>),
}

impl ReviewFileLayout {
    fn into_pairs(self) -> Vec<(String, i64)> {
        match self {
            ReviewFileLayout::Records(records) => {
                records.into_iter().map(|r| (r.word, r.label)).collect()
            }
            ReviewFileLayout::Map(map) => map.into_iter().collect(),
        }
    }
}

/// A JSON review file on disk.
pub struct JsonReviewFile {
    path: PathBuf,
}

impl JsonReviewFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse the file into raw (text, label) pairs in file order.
    fn read_pairs(&self) -> Result<Vec<(String, i64)>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read dataset '{}'", self.path.display()))?;
        let layout: ReviewFileLayout = serde_json::from_str(&json)
            .with_context(|| format!("Malformed dataset '{}'", self.path.display()))?;
        Ok(layout.into_pairs())
    }
}

impl ReviewSource for JsonReviewFile {
    fn texts(&self) -> Result<Vec<String>> {
        Ok(self.read_pairs()?.into_iter().map(|(text, _)| text).collect())
    }

    fn load_all(&self, dict: &WordDict) -> Result<Vec<LabeledReview>> {
        let mut reviews = Vec::new();
        let mut skipped = 0usize;

        for (text, label) in self.read_pairs()? {
            let label = Sentiment::try_from(label).with_context(|| {
                format!("Bad label for '{}' in '{}'", text, self.path.display())
            })?;
            let words = dict.encode(&text);
            // An empty sequence cannot be convolved meaningfully
            if words.is_empty() {
                skipped += 1;
                continue;
            }
            reviews.push(LabeledReview::new(words, label));
        }

        if skipped > 0 {
            tracing::warn!(
                "Skipped {} empty reviews in '{}'",
                skipped,
                self.path.display()
            );
        }
        tracing::info!("Loaded {} reviews from '{}'", reviews.len(), self.path.display());
        Ok(reviews)
    }
}
