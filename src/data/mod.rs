// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything from the raw corpus files to burn tensors.
//
//   lm.*.txt + lm.*.txt.out
//       │
//       ▼
//   TextCorpusLoader  → reads each aligned file pair
//       │
//       ▼
//   Preprocessor      → newline → <eos>, whitespace split
//       │
//       ▼
//   Vocabulary        → frequency-ranked ids, labels.txt
//       │
//       ▼
//   reader            → aligned (input, output) id pairs
//       │
//       ▼
//   LmWindows         → batch-major grid, time-shifted windows
//       │
//       ▼
//   LmBatcher         → [batch_size, num_steps] Int tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads aligned corpus file pairs
pub mod loader;

/// Whitespace tokenization with the end-of-sequence marker
pub mod preprocessor;

/// Frequency-ranked token <-> id mapping
pub mod vocab;

/// Data-loading entry point
pub mod reader;

/// Window rows and loaded splits
pub mod dataset;

/// Batch-major windowing, burn Dataset and the cycling producer
pub mod producer;

/// Implements burn's Batcher trait for window rows
pub mod batcher;

/// Encodes typed history against a saved label list
pub mod history;
