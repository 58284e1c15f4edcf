// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain structs, enums and traits describing the corpus:
// which split a file belongs to, the token streams read
// from an aligned file pair, and the id pairs they become.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only plain Rust data and the traits other layers implement

/// Train / validation / test splits and their file names
pub mod split;

/// Aligned token streams and (input, output) id pairs
pub mod pair;

/// Abstractions implemented by the data layer
pub mod traits;
