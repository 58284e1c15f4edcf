// ============================================================
// Layer 2 - PrepareUseCase
// ============================================================
// Runs the reader end to end:
//
//   Step 1: Load all splits, build vocab, write labels.txt (Layer 4)
//   Step 2: Check each split supports the window settings  (Layer 4)
//   Step 3: Export tokenizer JSON, if requested            (Layer 6)
//   Step 4: Save the manifest, if requested                (Layer 6)
//
// A split too small for the window settings is reported, not
// fatal: validation and test sets are often much smaller than
// train and a caller may use different settings for them.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{dataset::LmRawData, producer::{LmWindows, ProducerError}, reader::lm_raw_data};
use crate::domain::split::Split;
use crate::infra::{manifest::DataManifest, tokenizer_store::TokenizerStore};

// ─── Reader Configuration ────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    pub data_dir:       String,
    pub labels_path:    String,
    pub tokenizer_path: Option<String>,
    pub manifest_path:  Option<String>,
    pub batch_size:     usize,
    pub num_steps:      usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            data_dir:       "data".to_string(),
            labels_path:    "labels.txt".to_string(),
            tokenizer_path: None,
            manifest_path:  None,
            batch_size:     20,
            num_steps:      20,
        }
    }
}

/// Outcome of windowing one split
#[derive(Debug, Clone)]
pub struct SplitReport {
    pub split:      Split,
    pub ids:        usize,
    pub epoch_size: Result<usize, ProducerError>,
}

#[derive(Debug, Clone)]
pub struct PrepareReport {
    pub manifest: DataManifest,
    pub splits:   Vec<SplitReport>,
}

pub struct PrepareUseCase {
    config: ReaderConfig,
}

impl PrepareUseCase {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PrepareReport> {
        let cfg = &self.config;

        // ── Step 1: Load corpus ──────────────────────────────────────────────
        tracing::info!("Loading corpus from '{}'", cfg.data_dir);
        let raw = lm_raw_data(&cfg.data_dir, &cfg.labels_path)?;

        // ── Step 2: Window check per split ───────────────────────────────────
        let splits = split_reports(&raw, cfg.batch_size, cfg.num_steps);
        for report in &splits {
            match &report.epoch_size {
                Ok(n)  => tracing::info!("{}: {} ids, epoch_size={}", report.split, report.ids, n),
                Err(e) => tracing::warn!("{}: {} ids, {}", report.split, report.ids, e),
            }
        }

        // ── Step 3: Tokenizer export ─────────────────────────────────────────
        if let Some(path) = &cfg.tokenizer_path {
            TokenizerStore::new(path).save(&raw.vocab)?;
        }

        // ── Step 4: Manifest ─────────────────────────────────────────────────
        let manifest = DataManifest::from_raw(
            &cfg.data_dir,
            &cfg.labels_path,
            cfg.tokenizer_path.clone(),
            &raw,
        );
        if let Some(path) = &cfg.manifest_path {
            manifest.save(path)?;
        }

        Ok(PrepareReport { manifest, splits })
    }
}

fn split_reports(raw: &LmRawData, batch_size: usize, num_steps: usize) -> Vec<SplitReport> {
    Split::ALL
        .into_iter()
        .map(|split| {
            let ids = raw.split(split);
            SplitReport {
                split,
                ids:        ids.len(),
                epoch_size: LmWindows::new(ids, batch_size, num_steps).map(|w| w.epoch_size()),
            }
        })
        .collect()
}
