// ============================================================
// Layer 6 - Data Manifest
// ============================================================
// Records what a `prepare` run produced so a training loop can
// size its embedding and output layers without re-reading the
// corpus:
//
//   {
//     "data_dir": "data/lm",
//     "labels_path": "labels.txt",
//     "vocab_size": 138,
//     "train_len": 929589,
//     ...
//   }

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::data::dataset::LmRawData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataManifest {
    pub data_dir:       String,
    pub labels_path:    String,
    pub tokenizer_path: Option<String>,
    pub vocab_size:     usize,
    pub train_len:      usize,
    pub valid_len:      usize,
    pub test_len:       usize,
}

impl DataManifest {
    pub fn from_raw(
        data_dir:       impl Into<String>,
        labels_path:    impl Into<String>,
        tokenizer_path: Option<String>,
        raw:            &LmRawData,
    ) -> Self {
        Self {
            data_dir:    data_dir.into(),
            labels_path: labels_path.into(),
            tokenizer_path,
            vocab_size:  raw.vocab_size,
            train_len:   raw.train.len(),
            valid_len:   raw.valid.len(),
            test_len:    raw.test.len(),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write manifest to '{}'", path.display()))?;
        tracing::debug!("Saved manifest to '{}'", path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_context(|| {
            format!(
                "Cannot read manifest from '{}'. Run 'prepare' first.",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
