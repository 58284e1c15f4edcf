// ============================================================
// Layer 2 - HistoryUseCase
// ============================================================
// Loads labels.txt and encodes a typed history into the fixed
// window the on-device model reads.

use anyhow::Result;

use crate::data::{history::HistoryEncoder, vocab::Vocabulary};

pub struct HistoryUseCase {
    encoder: HistoryEncoder,
}

impl HistoryUseCase {
    pub fn new(labels_path: &str) -> Result<Self> {
        let vocab = Vocabulary::load_labels(labels_path)?;
        tracing::debug!("Loaded {} labels from '{}'", vocab.len(), labels_path);
        Ok(Self { encoder: HistoryEncoder::new(vocab)? })
    }

    pub fn encode(&self, history: &str) -> Result<Vec<u32>> {
        self.encoder.encode(history)
    }

    pub fn boundary_ids(&self) -> Vec<u32> {
        self.encoder.boundary_ids()
    }
}
