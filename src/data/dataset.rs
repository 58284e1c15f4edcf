use serde::{Deserialize, Serialize};

use crate::data::vocab::Vocabulary;
use crate::domain::{pair::IdPair, split::Split};

/// One row of one window: `num_steps` input ids and the
/// `num_steps` target ids that follow them one position later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LmSample {
    pub inputs:  Vec<u32>,
    pub targets: Vec<u32>,
}

impl LmSample {
    pub fn num_steps(&self) -> usize {
        self.inputs.len()
    }
}

/// Id sequences of all three splits plus the vocabulary they were mapped with.
#[derive(Debug, Clone)]
pub struct LmRawData {
    pub train:      Vec<IdPair>,
    pub valid:      Vec<IdPair>,
    pub test:       Vec<IdPair>,
    pub vocab_size: usize,
    pub vocab:      Vocabulary,
}

impl LmRawData {
    pub fn split(&self, split: Split) -> &[IdPair] {
        match split {
            Split::Train => &self.train,
            Split::Valid => &self.valid,
            Split::Test  => &self.test,
        }
    }

    /// `(train, valid, test, vocab_size)`
    pub fn into_parts(self) -> (Vec<IdPair>, Vec<IdPair>, Vec<IdPair>, usize) {
        (self.train, self.valid, self.test, self.vocab_size)
    }
}
