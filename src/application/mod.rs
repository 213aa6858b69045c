// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for each command:
//
//   train_use_case.rs — dictionary, datasets, training loop
//   infer_use_case.rs — checkpoint load and review scoring
//   run_use_case.rs   — train followed by infer
//
// Rules for this layer:
//   - No model math (that's Layer 5)
//   - No argument parsing (that's Layer 1)
//   - Only workflow coordination
//
// Each use case implements ml::backend::BackendTask so the CLI
// can hand it to whichever backend the placement selects.

// The training workflow
pub mod train_use_case;

// The inference workflow
pub mod infer_use_case;

// Training followed by inference
pub mod run_use_case;
