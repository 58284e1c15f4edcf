// ============================================================
// Layer 6 - Tokenizer Store
// ============================================================
// Exports the corpus vocabulary as a HuggingFace tokenizer so
// consumers outside this crate encode text with the same ids.
//
// The JSON is written by hand as a WordLevel model with a
// WhitespaceSplit pre-tokenizer, then loaded back with the
// tokenizers crate. That reload is the validation step: if the
// file does not parse, saving fails.
//
// WhitespaceSplit (not Whitespace) keeps tokens such as
// "_<eos>b" intact instead of splitting off punctuation.

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tokenizers::Tokenizer;

use crate::data::vocab::Vocabulary;

/// Token a WordLevel model reports for out-of-vocabulary words
pub const UNK_TOKEN: &str = "<unk>";

pub struct TokenizerStore {
    path: PathBuf,
}

impl TokenizerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load a previously saved tokenizer
    pub fn load(&self) -> Result<Tokenizer> {
        Tokenizer::from_file(&self.path).map_err(|e| {
            anyhow!("Cannot load tokenizer from '{}': {}", self.path.display(), e)
        })
    }

    /// Write `vocab` as tokenizer JSON and return the reloaded tokenizer.
    pub fn save(&self, vocab: &Vocabulary) -> Result<Tokenizer> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create '{}'", parent.display()))?;
        }

        let mut vocab_json: serde_json::Map<String, serde_json::Value> = vocab
            .tokens()
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), serde_json::json!(id)))
            .collect();
        // WordLevel requires its unk token; it goes after the labels so 0..len match labels.txt
        if vocab.id(UNK_TOKEN).is_none() {
            vocab_json.insert(UNK_TOKEN.to_string(), serde_json::json!(vocab.len()));
        }

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [],
            "normalizer": null,
            "pre_tokenizer": {
                "type": "WhitespaceSplit"
            },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab_json,
                "unk_token": UNK_TOKEN
            }
        });

        std::fs::write(&self.path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| format!("Cannot write tokenizer JSON '{}'", self.path.display()))?;

        tracing::info!(
            "Tokenizer with {} words saved to '{}'",
            vocab.len(),
            self.path.display()
        );

        self.load()
    }
}
