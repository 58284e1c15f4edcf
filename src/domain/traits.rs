// ============================================================
// Layer 3 - Core Traits
// ============================================================
// The reader only needs "give me the token streams of a split".
// The text-file loader implements it; tests can substitute an
// in-memory source.

use anyhow::Result;

use crate::domain::{pair::TokenPair, split::Split};

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the aligned token streams of a split.
///
/// Implementations:
///   - TextCorpusLoader -> `<dir>/lm.<split>.txt` and its `.out` sibling
pub trait CorpusSource {
    /// Load both token streams for `split`.
    fn load_pair(&self, split: Split) -> Result<TokenPair>;
}
