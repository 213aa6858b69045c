// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a JSON file on disk and a tensor batch:
//
//   reviews.json
//       │
//       ▼
//   JsonReviewFile    → parses word/label pairs, encodes words
//       │
//       ▼
//   ReviewDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   shuffle / batch   → reader decorators (shuffle buffer, batching)
//       │
//       ▼
//   SentimentBatcher  → pads sequences into tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads JSON review datasets
pub mod loader;

/// Implements Burn's Dataset trait for labelled reviews
pub mod dataset;

/// Shuffle-buffer and batching iterator adapters
pub mod reader;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
