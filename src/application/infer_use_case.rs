// ============================================================
// Layer 2 — Infer Use Case
// ============================================================
// Scores a list of reviews with a trained checkpoint:
//   1. Rebuild the word dictionary from the full dataset
//   2. Load the model from the params directory
//   3. Split each review on whitespace, map words to indices
//      (unknown words → <unk>)
//   4. Pack everything into one LoD batch and run a single
//      forward pass

use anyhow::{bail, Result};
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;

use crate::application::train_use_case::{build_word_dict, DEFAULT_PARAMS_DIR};
use crate::domain::lod::LodTensor;
use crate::domain::traits::SentimentScorer;
use crate::domain::word_dict::WordDict;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::backend::BackendTask;
use crate::ml::inferencer::Inferencer;

/// Words scored when no list is given on the command line.
pub const DEFAULT_REVIEWS: [&str; 20] = [
    "angel", "assure", "brave", "clear", "convience", "desiring", "ease",
    "enjoy", "fast", "healthy", "grief", "haste", "incense", "lack", "mad",
    "odor", "pig", "rash", "rip", "shame",
];

#[derive(Debug, Clone)]
pub struct InferConfig {
    pub all_data:   String,
    pub params_dir: String,
    pub reviews:    Vec<String>,
}

impl Default for InferConfig {
    fn default() -> Self {
        Self {
            all_data:   "data/one_word_reviews.json".to_string(),
            params_dir: DEFAULT_PARAMS_DIR.to_string(),
            reviews:    DEFAULT_REVIEWS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Class probabilities for one review.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewScore {
    pub review: String,
    pub probs:  Vec<f32>,
}

impl ReviewScore {
    pub fn positive(&self) -> f32 {
        self.probs.first().copied().unwrap_or(0.0)
    }

    pub fn negative(&self) -> f32 {
        self.probs.get(1).copied().unwrap_or(0.0)
    }
}

pub struct InferUseCase {
    config: InferConfig,
}

impl InferUseCase {
    pub fn new(config: InferConfig) -> Self {
        Self { config }
    }

    pub fn execute<B: Backend>(&self, device: B::Device) -> Result<Vec<ReviewScore>> {
        let cfg = &self.config;

        let word_dict  = build_word_dict(&cfg.all_data)?;
        let ckpt       = CheckpointManager::new(&cfg.params_dir);
        let inferencer = Inferencer::<B>::from_checkpoint(&ckpt, device)?;

        match ckpt.load_train_config() {
            Ok(saved) if saved.all_data != cfg.all_data => tracing::warn!(
                "Checkpoint was trained with the dictionary of '{}', rebuilding from '{}'",
                saved.all_data, cfg.all_data
            ),
            Ok(_)  => {}
            Err(e) => tracing::debug!("No training config next to the weights: {:#}", e),
        }

        if inferencer.dict_dim() != word_dict.len() {
            bail!(
                "Checkpoint in '{}' was trained with {} dictionary entries but '{}' \
                 yields {}; retrain or point --all-data at the original dataset",
                cfg.params_dir,
                inferencer.dict_dim(),
                cfg.all_data,
                word_dict.len()
            );
        }

        score_reviews(&inferencer, &word_dict, &cfg.reviews)
    }
}

impl BackendTask for InferUseCase {
    type Output = Vec<ReviewScore>;

    fn run<B: AutodiffBackend>(self, device: B::Device) -> Result<Vec<ReviewScore>> {
        // Inference needs no gradients
        self.execute::<B::InnerBackend>(device)
    }
}

/// Encode `reviews`, score them in one batch and pair each with its text.
pub fn score_reviews<S: SentimentScorer + ?Sized>(
    scorer:  &S,
    dict:    &WordDict,
    reviews: &[String],
) -> Result<Vec<ReviewScore>> {
    let encoded: Vec<Vec<i64>> = reviews.iter().map(|r| dict.encode(r)).collect();
    let lod = LodTensor::from_sequences(&encoded);
    tracing::debug!("Scoring {} reviews, {} words total", lod.num_sequences(), lod.total_len());

    let rows = scorer.score(&lod)?;
    if rows.len() != reviews.len() {
        bail!("scorer returned {} rows for {} reviews", rows.len(), reviews.len());
    }

    Ok(reviews
        .iter()
        .zip(rows)
        .map(|(review, probs)| ReviewScore { review: review.clone(), probs })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records the batch it was given and scores every review 0.25 / 0.75.
    struct RecordingScorer {
        seen: RefCell<Option<LodTensor>>,
    }

    impl SentimentScorer for RecordingScorer {
        fn score(&self, words: &LodTensor) -> Result<Vec<Vec<f32>>> {
            *self.seen.borrow_mut() = Some(words.clone());
            Ok(vec![vec![0.25, 0.75]; words.num_sequences()])
        }
    }

    #[test]
    fn test_unknown_words_use_unk_index() {
        let dict    = WordDict::build(&["angel", "grief"]);
        let scorer  = RecordingScorer { seen: RefCell::new(None) };
        let reviews = vec!["angel".to_string(), "zebra".to_string()];

        let scores = score_reviews(&scorer, &dict, &reviews).unwrap();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[1].review, "zebra");
        assert_eq!(scores[1].positive(), 0.25);
        assert_eq!(scores[1].negative(), 0.75);

        let lod = scorer.seen.borrow().clone().unwrap();
        assert_eq!(lod.sequence(1), Some(&[dict.unk_index() as i64][..]));
    }

    #[test]
    fn test_lod_metadata_matches_packed_words() {
        let dict    = WordDict::build(&["a", "b"]);
        let scorer  = RecordingScorer { seen: RefCell::new(None) };
        let reviews: Vec<String> = ["a", "a b unknown", ""].iter().map(|s| s.to_string()).collect();

        score_reviews(&scorer, &dict, &reviews).unwrap();
        let lod = scorer.seen.borrow().clone().unwrap();
        assert_eq!(lod.lengths(), &[1, 3, 0]);
        assert_eq!(lod.lengths().iter().sum::<usize>(), lod.total_len());
    }

    #[test]
    fn test_default_reviews_are_single_words() {
        assert_eq!(DEFAULT_REVIEWS.len(), 20);
        assert!(DEFAULT_REVIEWS.iter().all(|w| w.split_whitespace().count() == 1));
        assert!(DEFAULT_REVIEWS.contains(&"enjoy"));
        assert!(DEFAULT_REVIEWS.contains(&"fast"));
    }
}
