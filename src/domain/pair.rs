// ============================================================
// Layer 3 - Paired Streams
// ============================================================
// Every corpus file `<file>` comes with an aligned `<file>.out`.
// Position k of the input stream is paired with position k of
// the output stream, both before and after id mapping.

use serde::{Deserialize, Serialize};

/// The whitespace tokens of one aligned file pair.
/// The two streams may differ in length before vocabulary filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub input:  Vec<String>,
    pub output: Vec<String>,
}

impl TokenPair {
    pub fn new(input: Vec<String>, output: Vec<String>) -> Self {
        Self { input, output }
    }

    /// Iterate both streams, input first
    pub fn all_tokens(&self) -> impl Iterator<Item = &str> {
        self.input.iter().chain(self.output.iter()).map(String::as_str)
    }
}

/// One aligned position after id mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdPair {
    pub input:  u32,
    pub output: u32,
}

impl IdPair {
    pub fn new(input: u32, output: u32) -> Self {
        Self { input, output }
    }
}

/// Zip two filtered id streams into pairs.
///
/// # Panics
/// Panics if the streams differ in length: the corpus pair is corrupt
/// and nothing downstream can recover the alignment.
pub fn zip_aligned(inputs: &[u32], outputs: &[u32]) -> Vec<IdPair> {
    assert_eq!(
        inputs.len(),
        outputs.len(),
        "input and output streams differ in length after vocabulary filtering ({} vs {})",
        inputs.len(),
        outputs.len()
    );
    inputs
        .iter()
        .zip(outputs)
        .map(|(&i, &o)| IdPair::new(i, o))
        .collect()
}
