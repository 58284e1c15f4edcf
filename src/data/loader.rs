// ============================================================
// Layer 4 - Corpus Loader
// ============================================================
// Reads the aligned text files of a corpus directory.
//
// Layout expected under the directory:
//   lm.train.txt   lm.train.txt.out
//   lm.valid.txt   lm.valid.txt.out
//   lm.test.txt    lm.test.txt.out
//
// Unlike a document crawler, a missing file here is fatal:
// the error is propagated with the offending path attached.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::preprocessor::Preprocessor;
use crate::domain::{pair::TokenPair, split::Split, traits::CorpusSource};

/// Suffix of the file holding the aligned target stream
pub const OUTPUT_SUFFIX: &str = ".out";

/// Loads token pairs for each split from a corpus directory.
/// Implements the CorpusSource trait from Layer 3.
#[derive(Debug, Clone)]
pub struct TextCorpusLoader {
    dir:          PathBuf,
    preprocessor: Preprocessor,
}

impl TextCorpusLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), preprocessor: Preprocessor::new() }
    }

    /// Path of the input-side file for `split`
    pub fn path_for(&self, split: Split) -> PathBuf {
        self.dir.join(split.file_name())
    }
}

impl CorpusSource for TextCorpusLoader {
    fn load_pair(&self, split: Split) -> Result<TokenPair> {
        read_pair(&self.path_for(split), &self.preprocessor)
    }
}

/// `<path>.out`, the aligned target file of `path`
pub fn output_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(OUTPUT_SUFFIX);
    PathBuf::from(s)
}

/// Read a file and tokenize it with the default `<eos>` marker.
pub fn read_words(path: &Path) -> Result<Vec<String>> {
    read_words_with(path, &Preprocessor::new())
}

fn read_words_with(path: &Path, preprocessor: &Preprocessor) -> Result<Vec<String>> {
    tracing::info!("Reading {}...", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read corpus file '{}'", path.display()))?;
    Ok(preprocessor.tokenize(&text))
}

/// Read `path` and its `.out` sibling.
pub fn read_pair(path: &Path, preprocessor: &Preprocessor) -> Result<TokenPair> {
    let input  = read_words_with(path, preprocessor)?;
    let output = read_words_with(&output_path(path), preprocessor)?;
    Ok(TokenPair::new(input, output))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_path_appends_suffix() {
        let p = output_path(Path::new("corpus/lm.train.txt"));
        assert_eq!(p, PathBuf::from("corpus/lm.train.txt.out"));
    }

    #[test]
    fn test_read_words_tokenizes_file() {
        let dir  = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "a b \n c\n").unwrap();
        assert_eq!(read_words(&path).unwrap(), ["a", "b", "<eos>", "c"]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let err = read_words(&dir.path().join("nope.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("nope.txt"));
    }

    #[test]
    fn test_load_pair_reads_both_sides() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lm.valid.txt"), "a b").unwrap();
        fs::write(dir.path().join("lm.valid.txt.out"), "x y").unwrap();

        let loader = TextCorpusLoader::new(dir.path());
        let pair   = loader.load_pair(Split::Valid).unwrap();
        assert_eq!(pair.input,  ["a", "b"]);
        assert_eq!(pair.output, ["x", "y"]);
    }

    #[test]
    fn test_load_pair_requires_out_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lm.test.txt"), "a b").unwrap();

        let loader = TextCorpusLoader::new(dir.path());
        let err    = loader.load_pair(Split::Test).unwrap_err();
        assert!(format!("{err:#}").contains("lm.test.txt.out"));
    }
}
