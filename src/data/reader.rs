// ============================================================
// Layer 4 - Reader Entry Point
// ============================================================
// Loads the whole corpus in the order the training pipeline
// expects:
//
//   Step 1: tokenize the training pair
//   Step 2: build the vocabulary from it, write labels.txt
//   Step 3: map train / valid / test to aligned id pairs
//
// Tokens missing from the training vocabulary are dropped on
// both sides independently; if that leaves the two streams of
// a pair with different lengths the corpus is corrupt and we
// panic rather than guess at the alignment.

use anyhow::Result;
use std::path::Path;

use crate::data::{dataset::LmRawData, loader::TextCorpusLoader, vocab::Vocabulary};
use crate::domain::{
    pair::{zip_aligned, IdPair, TokenPair},
    split::Split,
    traits::CorpusSource,
};

/// Load `lm.{train,valid,test}.txt` (+ `.out`) from `data_dir`.
/// The ordered vocabulary is written to `labels_path`.
///
/// # Panics
/// Panics if any split's input and output streams differ in
/// length after vocabulary filtering.
pub fn lm_raw_data(data_dir: impl AsRef<Path>, labels_path: impl AsRef<Path>) -> Result<LmRawData> {
    let loader = TextCorpusLoader::new(data_dir.as_ref());
    load_from_source(&loader, labels_path.as_ref())
}

/// Same as `lm_raw_data` for any CorpusSource.
pub fn load_from_source<S: CorpusSource>(source: &S, labels_path: &Path) -> Result<LmRawData> {
    let train_tokens = source.load_pair(Split::Train)?;
    let vocab        = Vocabulary::from_pair(&train_tokens);
    vocab.save_labels(labels_path)?;
    tracing::info!(
        "Vocabulary: {} tokens, labels written to '{}'",
        vocab.len(),
        labels_path.display()
    );

    let train = file_to_word_ids(Split::Train, &train_tokens, &vocab);
    let valid = file_to_word_ids(Split::Valid, &source.load_pair(Split::Valid)?, &vocab);
    let test  = file_to_word_ids(Split::Test,  &source.load_pair(Split::Test)?,  &vocab);

    Ok(LmRawData { train, valid, test, vocab_size: vocab.len(), vocab })
}

/// Map both streams of a pair through `vocab` and zip them.
///
/// # Panics
/// Panics if the filtered streams differ in length.
pub fn file_to_word_ids(split: Split, tokens: &TokenPair, vocab: &Vocabulary) -> Vec<IdPair> {
    tracing::info!("Converting {} to IDs", split);
    let ids_in  = vocab.map_tokens(&tokens.input);
    let ids_out = vocab.map_tokens(&tokens.output);
    tracing::debug!(
        "{}: {} ids (last {:?}) | {} ids (last {:?})",
        split,
        ids_in.len(),
        ids_in.last(),
        ids_out.len(),
        ids_out.last(),
    );
    zip_aligned(&ids_in, &ids_out)
}
