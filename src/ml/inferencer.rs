// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::Result;
use burn::prelude::*;

use crate::data::batcher::SequenceBatch;
use crate::domain::lod::LodTensor;
use crate::domain::traits::SentimentScorer;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::SentimentConvNet;

pub struct Inferencer<B: Backend> {
    model:    SentimentConvNet<B>,
    dict_dim: usize,
    device:   B::Device,
}

impl<B: Backend> Inferencer<B> {
    /// Rebuild the network from the saved config and load the newest weights.
    pub fn from_checkpoint(ckpt: &CheckpointManager, device: B::Device) -> Result<Self> {
        let cfg   = ckpt.load_model_config()?;
        let model = ckpt.load_model(cfg.init::<B>(&device), &device)?;
        tracing::info!("Model loaded from '{}'", ckpt.dir().display());
        Ok(Self { model, dict_dim: cfg.dict_dim, device })
    }

    pub fn from_model(model: SentimentConvNet<B>, dict_dim: usize, device: B::Device) -> Self {
        Self { model, dict_dim, device }
    }

    /// Embedding table height the model was trained with.
    pub fn dict_dim(&self) -> usize {
        self.dict_dim
    }

    /// One forward pass over the whole LoD batch.
    pub fn infer(&self, words: &LodTensor) -> Result<Vec<Vec<f32>>> {
        if words.num_sequences() == 0 {
            return Ok(Vec::new());
        }
        if let Some(&bad) = words.data().iter().find(|&&w| w < 0 || w as usize >= self.dict_dim) {
            anyhow::bail!("word index {bad} is outside the model vocabulary (size {})", self.dict_dim);
        }

        let probs = self.model.forward(SequenceBatch::from_lod(words, &self.device));
        let [_, class_dim] = probs.dims();

        let flat: Vec<f32> = probs
            .into_data()
            .convert::<f32>()
            .to_vec()
            .map_err(|e| anyhow::anyhow!("Cannot read model output: {e:?}"))?;

        Ok(flat.chunks(class_dim).map(<[f32]>::to_vec).collect())
    }
}

impl<B: Backend> SentimentScorer for Inferencer<B> {
    fn score(&self, words: &LodTensor) -> Result<Vec<Vec<f32>>> {
        self.infer(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::SentimentModelConfig;
    use burn::backend::NdArray;

    fn inferencer() -> Inferencer<NdArray> {
        let device = Default::default();
        let model = SentimentModelConfig::new(6).with_emb_dim(4).with_hid_dim(3).init(&device);
        Inferencer::from_model(model, 6, device)
    }

    #[test]
    fn test_one_row_per_review() {
        let lod = LodTensor::from_sequences(&[vec![1i64], vec![], vec![2, 3]]);
        let rows = inferencer().infer(&lod).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_empty_batch_scores_nothing() {
        let rows = inferencer().infer(&LodTensor::default()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_rejects_out_of_vocabulary_index() {
        let lod = LodTensor::from_sequences(&[vec![6i64]]);
        assert!(inferencer().infer(&lod).is_err());
    }
}
