//! Corpus reader for paired language-model training data.
//!
//! Reads `lm.{train,valid,test}.txt` and their aligned `.out` siblings,
//! builds a frequency-ranked vocabulary, maps tokens to ids and serves
//! fixed-size `[batch_size, num_steps]` windows as burn tensors.
//!
//! ```no_run
//! use burn::backend::NdArray;
//! use lm_reader::{lm_producer, lm_raw_data};
//!
//! # fn main() -> anyhow::Result<()> {
//! let raw = lm_raw_data("data/lm", "labels.txt")?;
//! let device = Default::default();
//! let mut producer = lm_producer::<NdArray>(&raw.train, 20, 20, &device)?;
//! let batch = producer.next_batch();
//! assert_eq!(batch.inputs.dims(), [20, 20]);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;

pub use data::batcher::{LmBatch, LmBatcher};
pub use data::dataset::{LmRawData, LmSample};
pub use data::producer::{lm_producer, LmProducer, LmWindows, ProducerError};
pub use data::reader::lm_raw_data;
pub use data::vocab::Vocabulary;
pub use domain::pair::{IdPair, TokenPair};
pub use domain::split::Split;
