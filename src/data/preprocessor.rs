// ============================================================
// Layer 4 - Tokenizer Preprocessor
// ============================================================
// Turns raw corpus text into whitespace tokens.
//
// Steps (applied in order):
//   1. Trim leading/trailing whitespace of the whole file
//   2. Replace every '\n' with the end-of-sequence marker
//   3. Split on whitespace
//
// The marker is substituted in place, without padding spaces.
// Corpora in this format end every line with a separator
// symbol followed by a space or not, and the trained label set
// depends on which: "a _\nb" yields ["a", "_<eos>b"], while
// "a _ \nb" yields ["a", "_", "<eos>b"]. Downstream consumers
// detect boundaries by labels that END with "<eos>", so the
// marker must stay glued to whatever precedes it.

/// End-of-sequence marker substituted for newlines
pub const EOS_MARKER: &str = "<eos>";

#[derive(Debug, Clone)]
pub struct Preprocessor {
    eos: String,
}

impl Preprocessor {
    /// Preprocessor using the standard `<eos>` marker
    pub fn new() -> Self {
        Self::with_marker(EOS_MARKER)
    }

    pub fn with_marker(eos: impl Into<String>) -> Self {
        Self { eos: eos.into() }
    }

    pub fn marker(&self) -> &str {
        &self.eos
    }

    /// Split `text` into tokens, substituting the marker for newlines.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.trim()
            .replace('\n', &self.eos)
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
