// ============================================================
// Layer 2 — Run Use Case
// ============================================================
// Train, then immediately score the review list against the
// checkpoint the training just wrote. Both halves run on the
// same device; inference uses the non-autodiff inner backend.

use anyhow::Result;
use burn::tensor::backend::AutodiffBackend;

use crate::application::infer_use_case::{InferConfig, InferUseCase, ReviewScore};
use crate::application::train_use_case::{TrainConfig, TrainUseCase};
use crate::ml::backend::BackendTask;
use crate::ml::trainer::TrainSummary;

pub struct RunUseCase {
    train:   TrainConfig,
    reviews: Vec<String>,
}

impl RunUseCase {
    pub fn new(train: TrainConfig, reviews: Vec<String>) -> Self {
        Self { train, reviews }
    }

    fn infer_config(&self) -> InferConfig {
        InferConfig {
            all_data:   self.train.all_data.clone(),
            params_dir: self.train.params_dir.clone(),
            reviews:    self.reviews.clone(),
        }
    }
}

impl BackendTask for RunUseCase {
    type Output = (TrainSummary, Vec<ReviewScore>);

    fn run<B: AutodiffBackend>(self, device: B::Device) -> Result<Self::Output> {
        let infer   = InferUseCase::new(self.infer_config());
        let summary = TrainUseCase::new(self.train).execute::<B>(device.clone())?;
        let scores  = infer.execute::<B::InnerBackend>(device)?;
        Ok((summary, scores))
    }
}
