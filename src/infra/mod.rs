// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Files written for consumers outside this crate:
//
//   tokenizer_store.rs - HuggingFace WordLevel export of the
//                        vocabulary, validated by reloading it
//                        with the tokenizers crate.
//
//   manifest.rs        - JSON summary of a prepared corpus
//                        (vocab size, split lengths, paths).
//
// labels.txt itself is written by the Vocabulary, since the
// reader entry point must produce it on every load.

/// Tokenizer JSON export and reload
pub mod tokenizer_store;

/// Prepared-corpus manifest
pub mod manifest;
