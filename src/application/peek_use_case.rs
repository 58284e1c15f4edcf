// ============================================================
// Layer 2 - PeekUseCase
// ============================================================
// Loads a corpus and pulls the first `count` windows of one
// split from the cycling producer, exactly as a training loop
// would receive them. Asking for more windows than one epoch
// holds shows the wrap-around.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::CpuBackend;
use crate::data::{producer::lm_producer, reader::lm_raw_data, vocab::Vocabulary};
use crate::domain::split::Split;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeekConfig {
    pub data_dir:    String,
    pub labels_path: String,
    pub split:       Split,
    pub batch_size:  usize,
    pub num_steps:   usize,
    pub count:       usize,
}

impl Default for PeekConfig {
    fn default() -> Self {
        Self {
            data_dir:    "data".to_string(),
            labels_path: "labels.txt".to_string(),
            split:       Split::Train,
            batch_size:  20,
            num_steps:   20,
            count:       2,
        }
    }
}

/// One window copied back from the batch tensors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeekedWindow {
    /// Position within the epoch
    pub index:   usize,
    pub inputs:  Vec<Vec<u32>>,
    pub targets: Vec<Vec<u32>>,
}

impl PeekedWindow {
    /// Render one row as tokens, for display
    pub fn render_row(row: &[u32], vocab: &Vocabulary) -> String {
        row.iter()
            .map(|&id| vocab.token(id).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct PeekReport {
    pub epoch_size: usize,
    pub vocab:      Vocabulary,
    pub windows:    Vec<PeekedWindow>,
}

pub struct PeekUseCase {
    config: PeekConfig,
}

impl PeekUseCase {
    pub fn new(config: PeekConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PeekReport> {
        let cfg = &self.config;
        let raw = lm_raw_data(&cfg.data_dir, &cfg.labels_path)?;

        let device = Default::default();
        let mut producer = lm_producer::<CpuBackend>(raw.split(cfg.split), cfg.batch_size, cfg.num_steps, &device)
            .with_context(|| format!("Cannot window the {} split", cfg.split))?;

        let mut windows = Vec::with_capacity(cfg.count);
        for _ in 0..cfg.count {
            let index = producer.cursor();
            let (inputs, targets) = producer.next_batch().to_rows()?;
            windows.push(PeekedWindow { index, inputs, targets });
        }

        Ok(PeekReport { epoch_size: producer.epoch_size(), vocab: raw.vocab, windows })
    }
}
