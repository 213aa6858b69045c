// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn-specific model code lives here. Other layers only see
// the narrow operations this layer exposes:
//
//   build model     → SentimentModelConfig::init
//   train an epoch  → trainer::run_training
//   evaluate        → trainer::evaluate
//   save / load     → infra::checkpoint (called from here)
//   infer a batch   → Inferencer::infer
//
//   model.rs      — embedding + two sequence conv/pool branches
//                   + softmax classifier
//   trainer.rs    — shuffled mini-batch loop with Adagrad, periodic
//                   test evaluation and per-epoch checkpoints
//   inferencer.rs — loads a checkpoint and scores LoD batches
//   backend.rs    — CPU / GPU backend selection
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Convolutional sentiment classifier
pub mod model;

/// Training loop with evaluation and checkpointing
pub mod trainer;

/// Inference engine — loads a checkpoint and scores reviews
pub mod inferencer;

/// Backend selection for CPU / GPU placement
pub mod backend;
