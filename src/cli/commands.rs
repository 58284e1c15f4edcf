// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Three subcommands: `prepare`, `peek` and `history`.
// Each Args struct converts into an application-layer config,
// so Layer 2 never sees clap types.

use clap::{Args, Subcommand};

use crate::application::{peek_use_case::PeekConfig, prepare_use_case::ReaderConfig};
use crate::domain::split::Split;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a corpus, build the vocabulary and write labels.txt
    Prepare(PrepareArgs),

    /// Print the first windows the batch producer serves
    Peek(PeekArgs),

    /// Encode typed history with a saved labels.txt
    History(HistoryArgs),
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Directory holding lm.{train,valid,test}.txt and their .out files
    #[arg(long)]
    pub data_dir: String,

    /// Where to write the vocabulary, one token per line
    #[arg(long, default_value = "labels.txt")]
    pub labels: String,

    /// Also export a HuggingFace tokenizer JSON here
    #[arg(long)]
    pub tokenizer_json: Option<String>,

    /// Also write a JSON manifest here
    #[arg(long)]
    pub manifest: Option<String>,

    /// Rows per batch, used to report epoch sizes
    #[arg(long, default_value_t = 20)]
    pub batch_size: usize,

    /// Window length, used to report epoch sizes
    #[arg(long, default_value_t = 20)]
    pub num_steps: usize,
}

impl From<PrepareArgs> for ReaderConfig {
    fn from(a: PrepareArgs) -> Self {
        ReaderConfig {
            data_dir:       a.data_dir,
            labels_path:    a.labels,
            tokenizer_path: a.tokenizer_json,
            manifest_path:  a.manifest,
            batch_size:     a.batch_size,
            num_steps:      a.num_steps,
        }
    }
}

#[derive(Args, Debug)]
pub struct PeekArgs {
    #[arg(long)]
    pub data_dir: String,

    #[arg(long, default_value = "labels.txt")]
    pub labels: String,

    /// train, valid or test
    #[arg(long, default_value = "train")]
    pub split: Split,

    #[arg(long, default_value_t = 20)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 20)]
    pub num_steps: usize,

    /// Number of windows to print
    #[arg(long, default_value_t = 2)]
    pub count: usize,
}

impl From<PeekArgs> for PeekConfig {
    fn from(a: PeekArgs) -> Self {
        PeekConfig {
            data_dir:    a.data_dir,
            labels_path: a.labels,
            split:       a.split,
            batch_size:  a.batch_size,
            num_steps:   a.num_steps,
            count:       a.count,
        }
    }
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// The text typed so far
    #[arg(long)]
    pub text: String,

    #[arg(long, default_value = "labels.txt")]
    pub labels: String,
}
