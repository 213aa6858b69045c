// ============================================================
// Layer 5 — Sentiment Model (Burn)
// ============================================================
// A text CNN over word embeddings:
//
//   words [batch, len]
//       │
//       ▼
//   Embedding            → [batch, len, emb_dim]
//       │
//       ├──► SequenceConvPool(width 3) ─┐
//       │                               ├─► concat [batch, 2 * hid_dim]
//       └──► SequenceConvPool(width 4) ─┘
//                                       │
//                                       ▼
//                          Linear → softmax [batch, class_dim]
//
// SequenceConvPool is a 1-D convolution over each sequence, tanh,
// then "sqrt" pooling: the sum over the sequence's real positions
// divided by sqrt(length).
//
// The convolution window for width k covers positions
// [i - k/2, i - k/2 + k). Positions outside the sequence read as
// zero. Padded slots are zeroed before the convolution and masked
// out again before pooling, so a padded batch scores every review
// exactly as if it were alone.
//
// Reference: Kim (2014) Convolutional Neural Networks for Sentence Classification
//            Burn Book §3 (Building Blocks)

use burn::{
    nn::{
        conv::{Conv1d, Conv1dConfig},
        loss::CrossEntropyLossConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        PaddingConfig1d,
    },
    prelude::*,
    tensor::activation::softmax,
};

use crate::data::batcher::{SentimentBatch, SequenceBatch};

/// Architecture of [`SentimentConvNet`]; saved as `model_config.json`.
#[derive(Config, Debug)]
pub struct SentimentModelConfig {
    /// Vocabulary size including `<unk>`
    pub dict_dim:  usize,
    #[config(default = 2)]
    pub class_dim: usize,
    #[config(default = 128)]
    pub emb_dim:   usize,
    #[config(default = 512)]
    pub hid_dim:   usize,
}

impl SentimentModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SentimentConvNet<B> {
        let embedding = EmbeddingConfig::new(self.dict_dim, self.emb_dim).init(device);
        let conv_3    = SequenceConvPool::new(self.emb_dim, self.hid_dim, 3, device);
        let conv_4    = SequenceConvPool::new(self.emb_dim, self.hid_dim, 4, device);
        let fc        = LinearConfig::new(2 * self.hid_dim, self.class_dim).init(device);
        SentimentConvNet { embedding, conv_3, conv_4, fc }
    }
}

// ─── SequenceConvPool ─────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct SequenceConvPool<B: Backend> {
    pub conv: Conv1d<B>,
}

impl<B: Backend> SequenceConvPool<B> {
    pub fn new(in_dim: usize, filters: usize, width: usize, device: &B::Device) -> Self {
        // Symmetric padding of k/2 on both sides; for even k the extra
        // trailing output column is sliced off in forward().
        let conv = Conv1dConfig::new(in_dim, filters, width)
            .with_padding(PaddingConfig1d::Explicit(width / 2))
            .init(device);
        Self { conv }
    }

    /// x: [batch, in_dim, len], mask: [batch, len], lengths: [batch, 1]
    /// → [batch, filters]
    pub fn forward(&self, x: Tensor<B, 3>, mask: Tensor<B, 2>, lengths: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, _, max_len] = x.dims();

        let h = self.conv.forward(x);
        let [_, filters, _] = h.dims();
        let h = h.slice([0..batch, 0..filters, 0..max_len]).tanh();

        let mask = mask.unsqueeze_dim::<3>(1).expand([batch, filters, max_len]);
        let pooled = (h * mask).sum_dim(2).reshape([batch, filters]);

        pooled / lengths.sqrt().expand([batch, filters])
    }
}

// ─── SentimentConvNet ─────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct SentimentConvNet<B: Backend> {
    pub embedding: Embedding<B>,
    pub conv_3:    SequenceConvPool<B>,
    pub conv_4:    SequenceConvPool<B>,
    pub fc:        Linear<B>,
}

/// Loss and predictions for one labelled batch.
pub struct ClassificationStep<B: Backend> {
    pub loss:   Tensor<B, 1>,
    pub probs:  Tensor<B, 2>,
    pub labels: Tensor<B, 1, Int>,
}

impl<B: Backend> SentimentConvNet<B> {
    /// Unnormalised class scores: [batch, class_dim]
    pub fn forward_logits(&self, batch: SequenceBatch<B>) -> Tensor<B, 2> {
        let SequenceBatch { words, mask, lengths } = batch;
        let [batch_size, max_len] = words.dims();

        let emb = self.embedding.forward(words); // [batch, len, emb_dim]
        let [_, _, emb_dim] = emb.dims();
        let emb = emb * mask.clone().unsqueeze_dim::<3>(2).expand([batch_size, max_len, emb_dim]);
        let emb = emb.swap_dims(1, 2); // [batch, emb_dim, len]

        let pooled_3 = self.conv_3.forward(emb.clone(), mask.clone(), lengths.clone());
        let pooled_4 = self.conv_4.forward(emb, mask, lengths);

        self.fc.forward(Tensor::cat(vec![pooled_3, pooled_4], 1))
    }

    /// Class probabilities: [batch, class_dim], rows sum to 1.
    pub fn forward(&self, batch: SequenceBatch<B>) -> Tensor<B, 2> {
        softmax(self.forward_logits(batch), 1)
    }

    /// Mean cross-entropy over the batch plus the predicted probabilities.
    pub fn forward_classification(&self, batch: SentimentBatch<B>) -> ClassificationStep<B> {
        let logits = self.forward_logits(batch.sequences);
        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), batch.labels.clone());
        ClassificationStep {
            loss,
            probs:  softmax(logits, 1),
            labels: batch.labels,
        }
    }
}

/// Fraction of rows whose argmax matches the label.
pub fn accuracy<B: Backend>(probs: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> f64 {
    let [batch_size, _] = probs.dims();
    if batch_size == 0 {
        return 0.0;
    }
    // argmax(1) returns [batch, 1] — flatten before comparing with [batch]
    let predicted = probs.argmax(1).reshape([batch_size]);
    let correct: i64 = predicted
        .equal(labels)
        .int().sum().into_scalar().elem::<i64>();
    correct as f64 / batch_size as f64
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lod::LodTensor;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn small_model(device: &<TestBackend as Backend>::Device) -> SentimentConvNet<TestBackend> {
        SentimentModelConfig::new(10)
            .with_emb_dim(8)
            .with_hid_dim(6)
            .init(device)
    }

    fn probs_of(model: &SentimentConvNet<TestBackend>, seqs: &[Vec<i64>]) -> Vec<f32> {
        let device = Default::default();
        let lod = LodTensor::from_sequences(seqs);
        model
            .forward(SequenceBatch::from_lod(&lod, &device))
            .into_data()
            .convert::<f32>()
            .to_vec()
            .unwrap()
    }

    #[test]
    fn test_output_is_a_distribution() {
        let device = Default::default();
        let model = small_model(&device);
        let probs = probs_of(&model, &[vec![1], vec![2, 3, 4], vec![]]);
        assert_eq!(probs.len(), 3 * 2);
        for row in probs.chunks(2) {
            assert!((row[0] + row[1] - 1.0).abs() < 1e-5);
            assert!(row.iter().all(|p| p.is_finite()));
        }
    }

    #[test]
    fn test_padding_does_not_change_scores() {
        let device = Default::default();
        let model = small_model(&device);
        let alone  = probs_of(&model, &[vec![5]]);
        let padded = probs_of(&model, &[vec![5], vec![1, 2, 3, 4, 6, 7]]);
        assert!((alone[0] - padded[0]).abs() < 1e-5);
        assert!((alone[1] - padded[1]).abs() < 1e-5);
    }

    #[test]
    fn test_accuracy_counts_argmax_matches() {
        let device = Default::default();
        let probs = Tensor::<TestBackend, 1>::from_floats(
            [0.9f32, 0.1, 0.2, 0.8, 0.6, 0.4, 0.3, 0.7].as_slice(), &device,
        ).reshape([4, 2]);
        let labels = Tensor::<TestBackend, 1, Int>::from_ints([0i32, 1, 1, 1].as_slice(), &device);
        assert!((accuracy(probs, labels) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_config_defaults() {
        let cfg = SentimentModelConfig::new(100);
        assert_eq!(cfg.class_dim, 2);
        assert_eq!(cfg.emb_dim, 128);
        assert_eq!(cfg.hid_dim, 512);
    }
}
