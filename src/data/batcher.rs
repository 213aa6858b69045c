// ============================================================
// Layer 4 — Sentiment Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<LabeledReview>
// into model-ready tensors.
//
// Reviews have different lengths, so they travel as a LodTensor
// (flat indices + lengths) until this point. Here they are packed
// into a dense [batch, max_len] grid:
//
//   lod:     [a a a | b | c c]          lengths [3, 1, 2]
//   words:   [[a, a, a],
//             [b, 0, 0],
//             [c, c, 0]]
//   mask:    [[1, 1, 1],
//             [1, 0, 0],
//             [1, 1, 0]]
//
// The mask lets the model ignore padded slots, so the result is
// the same as running each sequence on its own.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::lod::LodTensor;
use crate::domain::review::LabeledReview;

// ─── SequenceBatch ────────────────────────────────────────────────────────────
/// Padded variable-length word sequences.
#[derive(Debug, Clone)]
pub struct SequenceBatch<B: Backend> {
    /// Word indices — shape: [batch_size, max_len], padding = 0
    pub words: Tensor<B, 2, Int>,

    /// 1.0 for real words, 0.0 for padding — shape: [batch_size, max_len]
    pub mask: Tensor<B, 2>,

    /// Sequence lengths as floats, clamped to at least 1 so an empty
    /// sequence can be pooled — shape: [batch_size, 1]
    pub lengths: Tensor<B, 2>,
}

impl<B: Backend> SequenceBatch<B> {
    /// Pad a LoD batch onto `device`.
    ///
    /// The grid is at least one column wide so a batch made only of
    /// empty sequences still has a valid shape.
    pub fn from_lod(lod: &LodTensor, device: &B::Device) -> Self {
        let batch_size = lod.num_sequences();
        let max_len    = lod.max_len().max(1);

        let mut words_flat = vec![0i32; batch_size * max_len];
        let mut mask_flat  = vec![0f32; batch_size * max_len];
        for (row, seq) in lod.iter().enumerate() {
            let base = row * max_len;
            for (col, &word) in seq.iter().enumerate() {
                words_flat[base + col] = word as i32;
                mask_flat[base + col]  = 1.0;
            }
        }

        let lengths_flat: Vec<f32> = lod
            .lengths()
            .iter()
            .map(|&len| len.max(1) as f32)
            .collect();

        let words = Tensor::<B, 1, Int>::from_ints(
            words_flat.as_slice(), device
        ).reshape([batch_size, max_len]);

        let mask = Tensor::<B, 1>::from_floats(
            mask_flat.as_slice(), device
        ).reshape([batch_size, max_len]);

        let lengths = Tensor::<B, 1>::from_floats(
            lengths_flat.as_slice(), device
        ).reshape([batch_size, 1]);

        Self { words, mask, lengths }
    }

    pub fn batch_size(&self) -> usize {
        self.words.dims()[0]
    }
}

// ─── SentimentBatch ───────────────────────────────────────────────────────────
/// A training/test batch: padded sequences plus class labels.
#[derive(Debug, Clone)]
pub struct SentimentBatch<B: Backend> {
    pub sequences: SequenceBatch<B>,

    /// Class index per review — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── SentimentBatcher ─────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the right backend.
#[derive(Clone, Debug)]
pub struct SentimentBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SentimentBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<LabeledReview, SentimentBatch<B>> for SentimentBatcher<B> {
    fn batch(&self, items: Vec<LabeledReview>) -> SentimentBatch<B> {
        let labels: Vec<i32> = items
            .iter()
            .map(|r| r.label.class() as i32)
            .collect();

        let sequences: Vec<&[i64]> = items.iter().map(|r| r.words.as_slice()).collect();
        let lod = LodTensor::from_sequences(&sequences);

        SentimentBatch {
            sequences: SequenceBatch::from_lod(&lod, &self.device),
            labels:    Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device),
        }
    }
}
