// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model parameters using Burn's CompactRecorder.
//
// What gets saved in the params directory:
//   1. model_epoch_<n>.mpk.gz — all learned parameters after epoch n
//   2. latest_epoch.json      — which epoch was last saved
//   3. model_config.json      — architecture (dict_dim, emb_dim, ...)
//   4. train_config.json      — the full training configuration
//
// The inferencer rebuilds the network from model_config.json and
// then loads the newest weights into it. Loading fails if the
// architecture does not match the record.
//
// Layout:
//   oneword_understand_sentiment_conv.inference.model/
//     model_epoch_1.mpk.gz
//     latest_epoch.json
//     model_config.json
//     train_config.json
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{SentimentConvNet, SentimentModelConfig};

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Point at a params directory. Nothing is created until the
    /// first save, so inference against a missing directory fails
    /// with a clear message instead of leaving an empty folder.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create params dir '{}'", self.dir.display()))
    }

    /// Save model weights for a given epoch and advance the latest pointer.
    pub fn save_model<B: Backend>(
        &self,
        model: &SentimentConvNet<B>,
        epoch: usize,
    ) -> Result<()> {
        self.ensure_dir()?;

        // Without extension — the recorder adds .mpk.gz
        let path = self.dir.join(format!("model_epoch_{epoch}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        let latest_path = self.dir.join("latest_epoch.json");
        fs::write(&latest_path, serde_json::to_string(&epoch)?)
            .with_context(|| "Failed to write latest_epoch.json")?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Load the newest saved weights into `model`.
    ///
    /// `model` must have the architecture the checkpoint was saved with.
    pub fn load_model<B: Backend>(
        &self,
        model:  SentimentConvNet<B>,
        device: &B::Device,
    ) -> Result<SentimentConvNet<B>> {
        let epoch = self.latest_epoch()?;
        let path  = self.dir.join(format!("model_epoch_{epoch}"));

        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    pub fn save_model_config(&self, cfg: &SentimentModelConfig) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join("model_config.json");
        cfg.save(&path)
            .with_context(|| format!("Cannot write model config to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_model_config(&self) -> Result<SentimentModelConfig> {
        let path = self.dir.join("model_config.json");
        SentimentModelConfig::load(&path).map_err(|e| {
            anyhow::anyhow!(
                "Cannot read model config from '{}' ({:?}). \
                 Make sure you have run 'train' before 'infer'.",
                path.display(),
                e
            )
        })
    }

    /// Save the training configuration next to the weights.
    pub fn save_train_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| {
                format!("Cannot write config to '{}'", path.display())
            })?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    pub fn load_train_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Read latest_epoch.json and return the epoch number.
    fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join("latest_epoch.json");

        let s = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot find '{}'. Have you run 'train' first?",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str::<usize>(&s)?)
    }
}
