// ============================================================
// Layer 4 - Vocabulary
// ============================================================
// Frequency-ranked, bijective token <-> id mapping.
//
// Construction:
//   1. Count every token of the training pair
//   2. Sort by (count descending, token ascending)
//   3. Assign ids 0, 1, 2, ... in that order
//
// Example: "a b a c" paired with "x y x z"
//   counts: a=2 x=2 b=1 c=1 y=1 z=1
//   ids:    a=0 x=1 b=2 c=3 y=4 z=5
//
// Ties compare raw UTF-8 bytes, which orders strings by
// code point. The ordered token list is what gets written to
// labels.txt; line N of that file is the token with id N.

use anyhow::{bail, Context, Result};
use std::{
    collections::HashMap,
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use crate::domain::pair::TokenPair;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// Tokens ordered by id
    tokens: Vec<String>,
    ids:    HashMap<String, u32>,
}

impl Vocabulary {
    /// Build a vocabulary from a token stream.
    pub fn build<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Self {
        let mut freq: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *freq.entry(token).or_insert(0) += 1;
        }

        let mut counted: Vec<(&str, usize)> = freq.into_iter().collect();
        counted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let tokens: Vec<String> = counted.into_iter().map(|(t, _)| t.to_owned()).collect();
        Self::from_unique(tokens)
    }

    /// Build from both streams of the training pair.
    /// Output tokens must be in the vocabulary too, otherwise the
    /// target stream would be filtered away entirely.
    pub fn from_pair(pair: &TokenPair) -> Self {
        Self::build(pair.all_tokens())
    }

    /// Rebuild from a list already ordered by id, e.g. labels.txt.
    /// Fails on duplicates since ids must stay bijective.
    pub fn from_ordered(tokens: Vec<String>) -> Result<Self> {
        let mut ids = HashMap::with_capacity(tokens.len());
        for (id, token) in tokens.iter().enumerate() {
            if let Some(prev) = ids.insert(token.clone(), id as u32) {
                bail!("duplicate vocabulary entry '{token}' at ids {prev} and {id}");
            }
        }
        Ok(Self { tokens, ids })
    }

    fn from_unique(tokens: Vec<String>) -> Self {
        let ids = tokens
            .iter()
            .enumerate()
            .map(|(id, t)| (t.clone(), id as u32))
            .collect();
        Self { tokens, ids }
    }

    pub fn id(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    pub fn token(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens ordered by id
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Map tokens to ids, silently dropping out-of-vocabulary tokens.
    pub fn map_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<u32> {
        tokens.iter().filter_map(|t| self.id(t.as_ref())).collect()
    }

    /// Write one token per line, ordered by id.
    pub fn save_labels(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = fs::File::create(path)
            .with_context(|| format!("Cannot create labels file '{}'", path.display()))?;

        let mut out = BufWriter::new(file);
        for token in &self.tokens {
            writeln!(out, "{token}")?;
        }
        out.flush()
            .with_context(|| format!("Cannot write labels file '{}'", path.display()))?;

        tracing::debug!("Saved {} labels to '{}'", self.len(), path.display());
        Ok(())
    }

    /// Read a labels file written by `save_labels`. Line N gets id N.
    pub fn load_labels(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read labels file '{}'", path.display()))?;
        Self::from_ordered(text.lines().map(str::to_owned).collect())
            .with_context(|| format!("Invalid labels file '{}'", path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_words;
    use tempfile::tempdir;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn test_frequency_then_lexical_order() {
        let pair  = TokenPair::new(words("a b a c"), words("x y x z"));
        let vocab = Vocabulary::from_pair(&pair);

        assert_eq!(vocab.tokens(), ["a", "x", "b", "c", "y", "z"]);
        assert!(vocab.id("a").unwrap() < vocab.id("b").unwrap());
        assert!(vocab.id("a").unwrap() < vocab.id("c").unwrap());
        assert!(vocab.id("b").unwrap() < vocab.id("c").unwrap());
    }

    #[test]
    fn test_ids_are_contiguous_and_unique() {
        let text  = words("the cat sat on the mat the end on");
        let vocab = Vocabulary::build(text.iter().map(String::as_str));

        let mut ids: Vec<u32> = vocab.tokens().iter().map(|t| vocab.id(t).unwrap()).collect();
        ids.sort_unstable();
        let expected: Vec<u32> = (0..vocab.len() as u32).collect();
        assert_eq!(ids, expected);

        for id in 0..vocab.len() as u32 {
            assert_eq!(vocab.id(vocab.token(id).unwrap()), Some(id));
        }
    }

    #[test]
    fn test_source_maps_without_drops() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("lm.train.txt");
        fs::write(&path, "q w e\nr q w \n q e_\ne\n").unwrap();

        let text  = read_words(&path).unwrap();
        assert!(text.iter().any(|t| t == "e<eos>r"));
        assert!(text.iter().any(|t| t == "e_<eos>e"));

        let vocab = Vocabulary::build(text.iter().map(String::as_str));
        let ids   = vocab.map_tokens(&text);
        assert_eq!(ids.len(), text.len());
        for (id, token) in ids.iter().zip(&text) {
            assert_eq!(vocab.token(*id), Some(token.as_str()));
        }
    }

    #[test]
    fn test_unknown_tokens_are_dropped() {
        let vocab = Vocabulary::build(["a", "b"]);
        assert_eq!(vocab.map_tokens(&["a", "zzz", "b", "a"]), vec![0, 1, 0]);
    }

    #[test]
    fn test_empty_vocabulary() {
        let vocab = Vocabulary::build(std::iter::empty());
        assert!(vocab.is_empty());
        assert_eq!(vocab.token(0), None);
    }

    #[test]
    fn test_labels_round_trip() {
        let dir   = tempdir().unwrap();
        let path  = dir.path().join("labels.txt");
        let vocab = Vocabulary::build(["b", "a", "b", "_<eos>", "é"]);

        vocab.save_labels(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "b\n_<eos>\na\né\n");

        let loaded = Vocabulary::load_labels(&path).unwrap();
        assert_eq!(loaded, vocab);
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let err = Vocabulary::from_ordered(words("a b a")).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
