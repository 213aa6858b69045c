// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the training pipeline in order:
//
//   Step 1: Build the word dictionary from the full dataset (Layer 3/4)
//   Step 2: Load the train and test splits                  (Layer 4)
//   Step 3: Save the training config next to the weights    (Layer 6)
//   Step 4: Run the training loop                           (Layer 5)
//
// Reference: Burn Book §5 (Training)

use anyhow::{bail, Result};
use burn::tensor::backend::AutodiffBackend;
use serde::{Deserialize, Serialize};

use crate::data::{dataset::ReviewDataset, loader::JsonReviewFile};
use crate::domain::traits::ReviewSource;
use crate::domain::word_dict::WordDict;
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::ml::backend::BackendTask;
use crate::ml::model::SentimentModelConfig;
use crate::ml::trainer::{run_training, TrainSummary};

/// Directory the trained parameters are written to by default.
pub const DEFAULT_PARAMS_DIR: &str = "oneword_understand_sentiment_conv.inference.model";

// ─── Hyperparameters ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    pub class_dim:     usize,
    pub emb_dim:       usize,
    pub hid_dim:       usize,
    pub batch_size:    usize,
    pub learning_rate: f64,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            class_dim:     2,
            emb_dim:       128,
            hid_dim:       512,
            batch_size:    32,
            learning_rate: 0.002,
        }
    }
}

impl SentimentConfig {
    /// Architecture for a vocabulary of `dict_dim` entries.
    pub fn model_config(&self, dict_dim: usize) -> SentimentModelConfig {
        SentimentModelConfig::new(dict_dim)
            .with_class_dim(self.class_dim)
            .with_emb_dim(self.emb_dim)
            .with_hid_dim(self.hid_dim)
    }
}

// ─── Training Configuration ──────────────────────────────────────────────────
// Serialisable so it can be saved next to the checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Full dataset, used only to build the vocabulary
    pub all_data:    String,
    pub train_file:  String,
    pub test_file:   String,
    pub params_dir:  String,
    pub num_epochs:  usize,
    pub shuffle_buf: usize,
    /// Evaluate on the test split every this many steps
    pub eval_every:  usize,
    pub hyper:       SentimentConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            all_data:    "data/one_word_reviews.json".to_string(),
            train_file:  "data/one_word_reviews_train.json".to_string(),
            test_file:   "data/one_word_reviews_test.json".to_string(),
            params_dir:  DEFAULT_PARAMS_DIR.to_string(),
            num_epochs:  1,
            shuffle_buf: 25000,
            eval_every:  10,
            hyper:       SentimentConfig::default(),
        }
    }
}

impl TrainConfig {
    /// Reject settings the reader decorators and model cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.hyper.batch_size == 0 {
            bail!("batch size must be positive");
        }
        if self.shuffle_buf == 0 {
            bail!("shuffle buffer size must be positive");
        }
        if self.eval_every == 0 {
            bail!("eval interval must be positive");
        }
        if self.hyper.class_dim < 2 {
            bail!("class_dim must be at least 2, got {}", self.hyper.class_dim);
        }
        if self.hyper.emb_dim == 0 || self.hyper.hid_dim == 0 {
            bail!("emb_dim and hid_dim must be positive");
        }
        if !(self.hyper.learning_rate > 0.0) {
            bail!("learning rate must be positive, got {}", self.hyper.learning_rate);
        }
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Run the full training pipeline on backend `B`.
    pub fn execute<B: AutodiffBackend>(&self, device: B::Device) -> Result<TrainSummary> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Word dictionary ───────────────────────────────────────────
        tracing::info!("Loading OneWord word dict from '{}'", cfg.all_data);
        let word_dict = build_word_dict(&cfg.all_data)?;
        tracing::info!("Vocabulary size {} (including <unk>)", word_dict.len());

        // ── Step 2: Train / test splits ───────────────────────────────────────
        tracing::info!("Reading training data from '{}'", cfg.train_file);
        let train_set = ReviewDataset::new(JsonReviewFile::new(&cfg.train_file).load_all(&word_dict)?);

        tracing::info!("Reading testing data from '{}'", cfg.test_file);
        let test_set = ReviewDataset::new(JsonReviewFile::new(&cfg.test_file).load_all(&word_dict)?);
        tracing::info!(
            "Split: {} train, {} test",
            train_set.review_count(),
            test_set.review_count()
        );

        // ── Step 3: Save config for inference ─────────────────────────────────
        let ckpt    = CheckpointManager::new(&cfg.params_dir);
        ckpt.save_train_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.params_dir)?;

        // ── Step 4: Training loop (Layer 5) ───────────────────────────────────
        run_training::<B>(cfg, word_dict.len(), train_set, test_set, &ckpt, &metrics, device)
    }
}

impl BackendTask for TrainUseCase {
    type Output = TrainSummary;

    fn run<B: AutodiffBackend>(self, device: B::Device) -> Result<TrainSummary> {
        self.execute::<B>(device)
    }
}

/// Vocabulary over every review in the full dataset file.
pub fn build_word_dict(all_data: &str) -> Result<WordDict> {
    let texts = JsonReviewFile::new(all_data).texts()?;
    Ok(WordDict::build(&texts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_hyperparameters() {
        let cfg = TrainConfig::default();
        assert_eq!(cfg.hyper.class_dim, 2);
        assert_eq!(cfg.hyper.emb_dim, 128);
        assert_eq!(cfg.hyper.hid_dim, 512);
        assert_eq!(cfg.hyper.batch_size, 32);
        assert_eq!(cfg.hyper.learning_rate, 0.002);
        assert_eq!(cfg.shuffle_buf, 25000);
        assert_eq!(cfg.num_epochs, 1);
        assert_eq!(cfg.params_dir, DEFAULT_PARAMS_DIR);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let mut cfg = TrainConfig::default();
        cfg.hyper.batch_size = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_model_config_carries_hyperparameters() {
        let hyper = SentimentConfig { emb_dim: 16, hid_dim: 8, ..SentimentConfig::default() };
        let m = hyper.model_config(42);
        assert_eq!((m.dict_dim, m.emb_dim, m.hid_dim, m.class_dim), (42, 16, 8, 2));
    }
}
