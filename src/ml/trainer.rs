// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Shuffle-buffered mini-batch training with Adagrad.
//
// Each epoch the shuffle buffer fixes the visiting order, and
// Burn's DataLoader batches that order unchanged (no loader-level
// shuffle, trailing partial batch kept). The test split gets a
// plain DataLoader built once.
//
// Per step:
//   forward → cross-entropy → backward → Adagrad update
//
// Every `eval_every` steps (step 0 included) the current weights
// are evaluated on the whole test split and the numbers printed:
//
//   Step 0, Test Loss 0.69, Acc 0.5
//   Step 0, Epoch 0 Metrics [0.693412, 0.468750]
//
// At the end of every epoch the parameters are checkpointed.
//
// Backends:
//   - Training runs on B (an AutodiffBackend)
//   - model.valid() gives the same model on B::InnerBackend, which
//     evaluation uses so no autodiff graph is recorded
//
// Reference: Burn Book §5, Duchi et al. (2011) Adagrad

use std::sync::Arc;

use anyhow::Result;
use burn::{
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::Dataset,
    },
    module::AutodiffModule,
    optim::{AdaGradConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::{SentimentBatch, SentimentBatcher},
    dataset::ReviewDataset,
    reader::shuffle,
};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{MetricsLogger, StepMetrics};
use crate::ml::model::{accuracy, SentimentConvNet};

/// Mean loss and accuracy over a split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalMetrics {
    pub loss:     f64,
    pub accuracy: f64,
}

/// What a finished training run reports back.
#[derive(Debug, Clone)]
pub struct TrainSummary {
    /// Optimizer steps taken over all epochs
    pub steps:     usize,
    pub epochs:    usize,
    /// The most recent test-split evaluation, if any step triggered one
    pub last_eval: Option<EvalMetrics>,
}

/// Batches `dataset` in its stored order onto `device`.
pub fn review_loader<B: Backend>(
    device:     &B::Device,
    dataset:    ReviewDataset,
    batch_size: usize,
) -> Arc<dyn DataLoader<SentimentBatch<B>>> {
    DataLoaderBuilder::new(SentimentBatcher::<B>::new(device.clone()))
        .batch_size(batch_size)
        .build(dataset)
}

pub fn run_training<B: AutodiffBackend>(
    cfg:       &TrainConfig,
    dict_dim:  usize,
    train_set: ReviewDataset,
    test_set:  ReviewDataset,
    ckpt:      &CheckpointManager,
    metrics:   &MetricsLogger,
    device:    B::Device,
) -> Result<TrainSummary> {
    let hyper = &cfg.hyper;

    let model_cfg = hyper.model_config(dict_dim);
    ckpt.save_model_config(&model_cfg)?;
    let mut model: SentimentConvNet<B> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: dict_dim={}, emb_dim={}, hid_dim={}",
        dict_dim, hyper.emb_dim, hyper.hid_dim
    );

    let mut optim = AdaGradConfig::new().with_epsilon(1e-6).init();

    // ── Test data loader (InnerBackend — no autodiff overhead) ────────────────
    let test_loader = review_loader::<B::InnerBackend>(&device, test_set, hyper.batch_size);

    let mut rng       = rand::thread_rng();
    let mut steps     = 0usize;
    let mut last_eval = None;

    for epoch in 0..cfg.num_epochs {
        // ── Epoch order from the shuffle buffer ───────────────────────────────
        let order = ReviewDataset::new(
            shuffle(train_set.iter(), cfg.shuffle_buf, &mut rng).collect(),
        );
        let train_loader = review_loader::<B>(&device, order, hyper.batch_size);

        for (step, batch) in train_loader.iter().enumerate() {
            let output = model.forward_classification(batch);

            let train_loss: f64 = output.loss.clone().into_scalar().elem::<f64>();
            let train_acc = accuracy(output.probs.clone(), output.labels.clone());

            let grads = output.loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(hyper.learning_rate, model, grads);
            steps += 1;

            if step % cfg.eval_every == 0 {
                let eval = evaluate(&model.valid(), &*test_loader);

                println!(
                    "Step {}, Test Loss {}, Acc {}",
                    step, significant(eval.loss, 2), significant(eval.accuracy, 2)
                );
                println!(
                    "Step {}, Epoch {} Metrics [{:.6}, {:.6}]",
                    step, epoch, train_loss, train_acc
                );

                metrics.log(&StepMetrics {
                    step,
                    epoch,
                    test_loss: eval.loss,
                    test_acc:  eval.accuracy,
                    train_loss,
                    train_acc,
                })?;
                last_eval = Some(eval);
            }
        }

        // Checkpoint files are numbered from 1
        ckpt.save_model(&model, epoch + 1)?;
        tracing::info!("Epoch {} done, parameters saved to '{}'", epoch, ckpt.dir().display());
    }

    tracing::info!("Training complete after {} steps", steps);
    Ok(TrainSummary { steps, epochs: cfg.num_epochs, last_eval })
}

/// Average of per-batch loss and accuracy over everything `loader` yields.
///
/// An empty loader yields NaN loss and zero accuracy.
pub fn evaluate<B: Backend>(
    model:  &SentimentConvNet<B>,
    loader: &dyn DataLoader<SentimentBatch<B>>,
) -> EvalMetrics {
    let mut loss_sum = 0.0f64;
    let mut acc_sum  = 0.0f64;
    let mut batches  = 0usize;

    for batch in loader.iter() {
        let output = model.forward_classification(batch);
        loss_sum += output.loss.into_scalar().elem::<f64>();
        acc_sum  += accuracy(output.probs, output.labels);
        batches  += 1;
    }

    if batches == 0 {
        return EvalMetrics { loss: f64::NAN, accuracy: 0.0 };
    }
    EvalMetrics {
        loss:     loss_sum / batches as f64,
        accuracy: acc_sum / batches as f64,
    }
}

/// `value` rounded to `digits` significant digits, trailing zeros
/// dropped: 0.6931 → "0.69", 0.5 → "0.5", 1.234 → "1.2".
pub fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{value}");
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals  = (digits as i32 - 1 - magnitude).max(0) as usize;
    let text      = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::SentimentConfig;
    use crate::domain::review::{LabeledReview, Sentiment};
    use burn::backend::{Autodiff, NdArray};

    type TestBackend = Autodiff<NdArray>;

    fn tiny_config(params_dir: &std::path::Path) -> TrainConfig {
        TrainConfig {
            params_dir: params_dir.to_string_lossy().into_owned(),
            hyper: SentimentConfig {
                emb_dim:    4,
                hid_dim:    3,
                batch_size: 2,
                ..SentimentConfig::default()
            },
            shuffle_buf: 4,
            eval_every:  2,
            ..TrainConfig::default()
        }
    }

    fn reviews() -> Vec<LabeledReview> {
        vec![
            LabeledReview::new(vec![0], Sentiment::Positive),
            LabeledReview::new(vec![1], Sentiment::Negative),
            LabeledReview::new(vec![2], Sentiment::Positive),
            LabeledReview::new(vec![3], Sentiment::Negative),
            LabeledReview::new(vec![0, 2], Sentiment::Positive),
        ]
    }

    #[test]
    fn test_one_epoch_steps_and_checkpoint() {
        let tmp     = tempfile::tempdir().unwrap();
        let cfg     = tiny_config(tmp.path());
        let ckpt    = CheckpointManager::new(tmp.path());
        let metrics = MetricsLogger::new(tmp.path()).unwrap();

        let train = ReviewDataset::new(reviews());
        let test  = ReviewDataset::new(reviews());

        let summary = run_training::<TestBackend>(
            &cfg, 5, train, test, &ckpt, &metrics, Default::default(),
        ).unwrap();

        // 5 reviews in batches of 2 → 3 steps; evals at steps 0 and 2
        assert_eq!(summary.steps, 3);
        let eval = summary.last_eval.unwrap();
        assert!(eval.loss.is_finite());
        assert!((0.0..=1.0).contains(&eval.accuracy));

        assert!(tmp.path().join("model_config.json").exists());
        assert!(tmp.path().join("latest_epoch.json").exists());
        let csv = std::fs::read_to_string(metrics.csv_path()).unwrap();
        assert_eq!(csv.lines().count(), 1 + 2);
    }

    #[test]
    fn test_evaluate_empty_split() {
        let device  = Default::default();
        let model: SentimentConvNet<NdArray> =
            crate::ml::model::SentimentModelConfig::new(3).with_emb_dim(2).with_hid_dim(2).init(&device);
        let loader  = review_loader::<NdArray>(&device, ReviewDataset::new(Vec::new()), 4);
        let eval    = evaluate(&model, &*loader);
        assert!(eval.loss.is_nan());
        assert_eq!(eval.accuracy, 0.0);
    }

    #[test]
    fn test_loader_keeps_order_and_partial_tail() {
        let device = Default::default();
        let loader = review_loader::<NdArray>(&device, ReviewDataset::new(reviews()), 2);

        let sizes: Vec<usize> = loader.iter().map(|b| b.sequences.batch_size()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let labels: Vec<i64> = loader
            .iter()
            .flat_map(|b| b.labels.into_data().convert::<i64>().to_vec::<i64>().unwrap())
            .collect();
        assert_eq!(labels, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_significant_digits() {
        assert_eq!(significant(0.693147, 2), "0.69");
        assert_eq!(significant(0.5, 2), "0.5");
        assert_eq!(significant(1.234, 2), "1.2");
        assert_eq!(significant(0.0, 2), "0");
        assert_eq!(significant(12.0, 2), "12");
    }
}
