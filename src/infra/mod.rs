// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence used by the training and inference
// workflows:
//
//   checkpoint.rs — model weights (CompactRecorder) plus the model
//                   and training configs as JSON, so inference can
//                   rebuild the exact network it is loading into.
//
//   metrics.rs    — evaluation metrics appended to a CSV file.
//
// Reference: Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;
