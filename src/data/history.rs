// ============================================================
// Layer 4 - Typing History Encoder
// ============================================================
// Prepares model input from what a user has typed so far,
// using the labels.txt written at load time.
//
// The on-device model is fed a fixed window of 30 symbols:
//   - spaces are written as "_"
//   - shorter histories are left-padded with "_"
//   - longer histories keep only their last 30 symbols
//   - a symbol found in the labels maps to its id
//   - '\n' maps to "<eos>", anything else unknown to "_"
//
// Labels ending in "@", "_" or "<eos>" close a word or
// morpheme; boundary_ids() exposes them for decoding.

use anyhow::{anyhow, Result};
use burn::prelude::*;

use crate::data::{preprocessor::EOS_MARKER, vocab::Vocabulary};

/// Symbols fed to the model per prediction
pub const MAX_HISTORY: usize = 30;

/// Stands for a space and pads short histories
pub const PAD_SYMBOL: char = '_';

const BOUNDARY_SUFFIXES: [&str; 3] = ["@", "_", EOS_MARKER];

pub struct HistoryEncoder {
    vocab:  Vocabulary,
    pad_id: u32,
    eos_id: Option<u32>,
}

impl HistoryEncoder {
    /// Fails if the labels have no "_" entry.
    pub fn new(vocab: Vocabulary) -> Result<Self> {
        let pad_id = vocab
            .id(&PAD_SYMBOL.to_string())
            .ok_or_else(|| anyhow!("labels have no '{PAD_SYMBOL}' entry to pad histories with"))?;
        let eos_id = vocab.id(EOS_MARKER);
        Ok(Self { vocab, pad_id, eos_id })
    }

    /// Encode the last MAX_HISTORY symbols of `history`.
    pub fn encode(&self, history: &str) -> Result<Vec<u32>> {
        let symbols: Vec<char> = history
            .chars()
            .map(|c| if c == ' ' { PAD_SYMBOL } else { c })
            .collect();

        let skip    = symbols.len().saturating_sub(MAX_HISTORY);
        let padding = MAX_HISTORY.saturating_sub(symbols.len());

        let mut ids = vec![self.pad_id; padding];
        ids.reserve(MAX_HISTORY - padding);
        for &c in &symbols[skip..] {
            ids.push(self.symbol_id(c)?);
        }
        Ok(ids)
    }

    fn symbol_id(&self, c: char) -> Result<u32> {
        let mut buf = [0u8; 4];
        if let Some(id) = self.vocab.id(c.encode_utf8(&mut buf)) {
            return Ok(id);
        }
        if c == '\n' {
            return self
                .eos_id
                .ok_or_else(|| anyhow!("history contains a newline but labels have no '{EOS_MARKER}'"));
        }
        Ok(self.pad_id)
    }

    /// `[1, MAX_HISTORY]` model input
    pub fn to_tensor<B: Backend>(&self, ids: &[u32], device: &B::Device) -> Tensor<B, 2, Int> {
        let flat: Vec<i32> = ids.iter().map(|&x| x as i32).collect();
        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device).reshape([1, ids.len()])
    }

    /// Ids of labels that end a word or morpheme
    pub fn boundary_ids(&self) -> Vec<u32> {
        self.vocab
            .tokens()
            .iter()
            .enumerate()
            .filter(|(_, t)| BOUNDARY_SUFFIXES.iter().any(|s| t.ends_with(s)))
            .map(|(id, _)| id as u32)
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::tensor_rows;
    use burn::backend::NdArray;

    // _=0 a=1 b=2 <eos>=3 c@=4 d_<eos>=5
    fn encoder() -> HistoryEncoder {
        let labels = ["_", "a", "b", "<eos>", "c@", "d_<eos>"];
        let vocab  = Vocabulary::from_ordered(labels.iter().map(|s| s.to_string()).collect()).unwrap();
        HistoryEncoder::new(vocab).unwrap()
    }

    #[test]
    fn test_short_history_is_left_padded() {
        let ids = encoder().encode("ab a").unwrap();
        assert_eq!(ids.len(), MAX_HISTORY);
        assert!(ids[..26].iter().all(|&id| id == 0));
        assert_eq!(&ids[26..], &[1, 2, 0, 1]);
    }

    #[test]
    fn test_long_history_keeps_tail() {
        let history = format!("{}b", "a".repeat(40));
        let ids     = encoder().encode(&history).unwrap();
        assert_eq!(ids.len(), MAX_HISTORY);
        assert!(ids[..29].iter().all(|&id| id == 1));
        assert_eq!(ids[29], 2);
    }

    #[test]
    fn test_newline_and_unknown_symbols() {
        let ids = encoder().encode("a\nz").unwrap();
        assert_eq!(&ids[27..], &[1, 3, 0]);
    }

    #[test]
    fn test_newline_without_eos_label_fails() {
        let vocab = Vocabulary::from_ordered(vec!["_".into(), "a".into()]).unwrap();
        let enc   = HistoryEncoder::new(vocab).unwrap();
        assert!(enc.encode("a\n").is_err());
        assert!(enc.encode("a b").is_ok());
    }

    #[test]
    fn test_requires_pad_label() {
        let vocab = Vocabulary::from_ordered(vec!["a".into()]).unwrap();
        assert!(HistoryEncoder::new(vocab).is_err());
    }

    #[test]
    fn test_boundary_ids() {
        assert_eq!(encoder().boundary_ids(), vec![0, 3, 4, 5]);
    }

    #[test]
    fn test_tensor_shape() {
        let enc    = encoder();
        let ids    = enc.encode("ab").unwrap();
        let tensor = enc.to_tensor::<NdArray>(&ids, &Default::default());
        assert_eq!(tensor.dims(), [1, MAX_HISTORY]);
        assert_eq!(tensor_rows(&tensor).unwrap(), vec![ids]);
    }
}
