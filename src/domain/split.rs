// ============================================================
// Layer 3 - Corpus Split
// ============================================================
// The corpus directory always holds three aligned file pairs:
//
//   lm.train.txt  + lm.train.txt.out
//   lm.valid.txt  + lm.valid.txt.out
//   lm.test.txt   + lm.test.txt.out
//
// Only the training pair contributes to the vocabulary.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Valid,
    Test,
}

impl Split {
    /// All splits in the order they are loaded
    pub const ALL: [Split; 3] = [Split::Train, Split::Valid, Split::Test];

    /// Name of the input-side file inside the corpus directory
    pub fn file_name(self) -> &'static str {
        match self {
            Split::Train => "lm.train.txt",
            Split::Valid => "lm.valid.txt",
            Split::Test  => "lm.test.txt",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Valid => "valid",
            Split::Test  => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Split {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "train"                  => Ok(Split::Train),
            "valid" | "validation"   => Ok(Split::Valid),
            "test"                   => Ok(Split::Test),
            other => Err(format!("unknown split '{other}', expected train, valid or test")),
        }
    }
}
