// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe what the sentiment pipeline
// works with. Nothing in here knows about Burn:
//
//   word_dict.rs — token → index mapping with an <unk> sentinel
//   review.rs    — a labelled review and the Sentiment label
//   lod.rs       — a variable-length batch of word sequences
//   traits.rs    — the abstractions other layers implement
//
// Keeping these free of framework types means every rule about
// vocabulary lookup and sequence packing is testable on the CPU
// without building a model.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Vocabulary built from the full dataset
pub mod word_dict;

// Labelled training/test examples
pub mod review;

// Level-of-detail (variable-length) sequence batches
pub mod lod;

// Core abstractions (traits) that other layers implement
pub mod traits;
