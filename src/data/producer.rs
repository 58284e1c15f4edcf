// ============================================================
// Layer 4 - Window Producer
// ============================================================
// Slices a paired id sequence into time-shifted windows.
//
// Layout:
//   batch_len = data_len / batch_size
//   Each stream's first batch_size * batch_len ids are laid
//   out row-major as a [batch_size, batch_len] grid; the
//   remainder is discarded.
//
// Windowing, for i in 0..epoch_size:
//   x = inputs [:, i*num_steps     .. (i+1)*num_steps    ]
//   y = outputs[:, i*num_steps + 1 .. (i+1)*num_steps + 1]
//
//   epoch_size = (batch_len - 1) / num_steps
//
// The "- 1" reserves the final column for the last target.
//
// Example, 10 ids, batch_size=2, num_steps=2:
//   grid    = [0 1 2 3 4]
//             [5 6 7 8 9]        batch_len=5, epoch_size=2
//   window0 = x [[0 1] [5 6]]   y [[1 2] [6 7]]
//   window1 = x [[2 3] [7 8]]   y [[3 4] [8 9]]
//
// Windows are served in order and never shuffled. LmProducer
// cycles through them forever; LmWindows exposes one epoch as
// a burn Dataset so a DataLoader can drive the same order.

use burn::{
    data::{
        dataloader::{DataLoader, DataLoaderBuilder},
        dataset::Dataset,
    },
    prelude::*,
};
use std::sync::Arc;
use thiserror::Error;

use crate::data::{
    batcher::{LmBatch, LmBatcher},
    dataset::LmSample,
};
use crate::domain::pair::IdPair;

/// Window settings the data cannot support.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProducerError {
    #[error("batch_size must be positive")]
    ZeroBatchSize,

    #[error("num_steps must be positive")]
    ZeroNumSteps,

    #[error(
        "epoch_size == 0, decrease batch_size or num_steps \
         ({data_len} ids, batch_size={batch_size}, num_steps={num_steps}, \
         rows of {batch_len} ids)"
    )]
    EmptyEpoch {
        data_len:   usize,
        batch_size: usize,
        num_steps:  usize,
        batch_len:  usize,
    },
}

// ─── LmWindows ────────────────────────────────────────────────────────────────
/// One epoch of windows over a batch-major id grid.
#[derive(Debug, Clone)]
pub struct LmWindows {
    inputs:     Vec<u32>,
    outputs:    Vec<u32>,
    batch_size: usize,
    batch_len:  usize,
    num_steps:  usize,
    epoch_size: usize,
}

impl LmWindows {
    pub fn new(raw: &[IdPair], batch_size: usize, num_steps: usize) -> Result<Self, ProducerError> {
        if batch_size == 0 {
            return Err(ProducerError::ZeroBatchSize);
        }
        if num_steps == 0 {
            return Err(ProducerError::ZeroNumSteps);
        }

        let data_len   = raw.len();
        let batch_len  = data_len / batch_size;
        let epoch_size = batch_len.saturating_sub(1) / num_steps;
        if epoch_size == 0 {
            return Err(ProducerError::EmptyEpoch { data_len, batch_size, num_steps, batch_len });
        }

        let used = &raw[..batch_size * batch_len];
        Ok(Self {
            inputs:  used.iter().map(|p| p.input).collect(),
            outputs: used.iter().map(|p| p.output).collect(),
            batch_size,
            batch_len,
            num_steps,
            epoch_size,
        })
    }

    pub fn batch_size(&self) -> usize { self.batch_size }

    pub fn num_steps(&self) -> usize { self.num_steps }

    /// Columns of the batch-major grid
    pub fn batch_len(&self) -> usize { self.batch_len }

    /// Number of windows before the producer wraps
    pub fn epoch_size(&self) -> usize { self.epoch_size }

    /// Row `row` of window `window`.
    ///
    /// # Panics
    /// Panics if `window >= epoch_size` or `row >= batch_size`.
    pub fn row(&self, window: usize, row: usize) -> LmSample {
        assert!(window < self.epoch_size, "window {window} out of range (epoch_size={})", self.epoch_size);
        assert!(row < self.batch_size, "row {row} out of range (batch_size={})", self.batch_size);

        let start = row * self.batch_len + window * self.num_steps;
        LmSample {
            inputs:  self.inputs[start..start + self.num_steps].to_vec(),
            targets: self.outputs[start + 1..start + self.num_steps + 1].to_vec(),
        }
    }

    /// All rows of window `window`, or None past the end of the epoch.
    pub fn window(&self, window: usize) -> Option<Vec<LmSample>> {
        (window < self.epoch_size)
            .then(|| (0..self.batch_size).map(|r| self.row(window, r)).collect())
    }

    /// Non-shuffled burn DataLoader yielding this epoch's windows in order.
    pub fn into_data_loader<B: Backend>(self, device: B::Device) -> Arc<dyn DataLoader<LmBatch<B>>> {
        let batch_size = self.batch_size;
        DataLoaderBuilder::new(LmBatcher::<B>::new(device))
            .batch_size(batch_size)
            .build(self)
    }
}

/// Item `k` is row `k % batch_size` of window `k / batch_size`,
/// so consecutive groups of `batch_size` items form one window.
impl Dataset<LmSample> for LmWindows {
    fn get(&self, index: usize) -> Option<LmSample> {
        (index < self.len()).then(|| self.row(index / self.batch_size, index % self.batch_size))
    }

    fn len(&self) -> usize {
        self.epoch_size * self.batch_size
    }
}

// ─── LmProducer ───────────────────────────────────────────────────────────────
/// Serves windows one at a time, wrapping after `epoch_size` calls.
pub struct LmProducer<B: Backend> {
    windows: LmWindows,
    batcher: LmBatcher<B>,
    cursor:  usize,
}

impl<B: Backend> LmProducer<B> {
    pub fn new(windows: LmWindows, device: B::Device) -> Self {
        Self { windows, batcher: LmBatcher::new(device), cursor: 0 }
    }

    pub fn epoch_size(&self) -> usize {
        self.windows.epoch_size()
    }

    /// Index of the window the next call returns
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Return the current window and advance.
    pub fn next_batch(&mut self) -> LmBatch<B> {
        use burn::data::dataloader::batcher::Batcher;

        let rows = (0..self.windows.batch_size())
            .map(|r| self.windows.row(self.cursor, r))
            .collect();
        self.cursor = (self.cursor + 1) % self.windows.epoch_size();
        self.batcher.batch(rows)
    }

    /// Restart from the first window
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// Never ends: the producer wraps at the epoch boundary.
impl<B: Backend> Iterator for LmProducer<B> {
    type Item = LmBatch<B>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_batch())
    }
}

/// Build a cycling producer over `raw_data`.
///
/// Returns `ProducerError` if `batch_size` or `num_steps` leave
/// no complete window, rather than an empty producer.
pub fn lm_producer<B: Backend>(
    raw_data:   &[IdPair],
    batch_size: usize,
    num_steps:  usize,
    device:     &B::Device,
) -> Result<LmProducer<B>, ProducerError> {
    let windows = LmWindows::new(raw_data, batch_size, num_steps)?;
    tracing::debug!(
        "Producer: {} ids -> [{}, {}] grid, epoch_size={}",
        raw_data.len(),
        batch_size,
        windows.batch_len(),
        windows.epoch_size(),
    );
    Ok(LmProducer::new(windows, device.clone()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    type TestBackend = NdArray;

    /// Input stream 0..n, output stream identical
    fn lm_sequence(n: u32) -> Vec<IdPair> {
        (0..n).map(|i| IdPair::new(i, i)).collect()
    }

    #[test]
    fn test_documented_example() {
        let windows = LmWindows::new(&lm_sequence(10), 2, 2).unwrap();
        assert_eq!(windows.batch_len(), 5);
        assert_eq!(windows.epoch_size(), 2);

        let w0 = windows.window(0).unwrap();
        assert_eq!(w0[0].inputs,  [0, 1]);
        assert_eq!(w0[0].targets, [1, 2]);
        assert_eq!(w0[1].inputs,  [5, 6]);
        assert_eq!(w0[1].targets, [6, 7]);

        let w1 = windows.window(1).unwrap();
        assert_eq!(w1[1].inputs,  [7, 8]);
        assert_eq!(w1[1].targets, [8, 9]);

        assert!(windows.window(2).is_none());
    }

    #[test]
    fn test_targets_come_from_output_stream() {
        let raw: Vec<IdPair> = (0..12).map(|i| IdPair::new(i, 100 + i)).collect();
        let windows = LmWindows::new(&raw, 2, 2).unwrap();
        let row     = windows.row(1, 1);
        assert_eq!(row.inputs,  [8, 9]);
        assert_eq!(row.targets, [109, 110]);
    }

    #[test]
    fn test_too_little_data_is_config_error() {
        let err = lm_producer::<TestBackend>(&lm_sequence(39), 4, 10, &Default::default())
            .err()
            .unwrap();
        assert_eq!(
            err,
            ProducerError::EmptyEpoch { data_len: 39, batch_size: 4, num_steps: 10, batch_len: 9 }
        );
        assert!(err.to_string().contains("decrease batch_size or num_steps"));

        // 40 ids give rows of exactly 10, one short of a shifted window
        assert!(LmWindows::new(&lm_sequence(40), 4, 10).is_err());
        assert_eq!(LmWindows::new(&lm_sequence(44), 4, 10).unwrap().epoch_size(), 1);
    }

    #[test]
    fn test_zero_sizes_rejected() {
        assert_eq!(LmWindows::new(&lm_sequence(10), 0, 2).unwrap_err(), ProducerError::ZeroBatchSize);
        assert_eq!(LmWindows::new(&lm_sequence(10), 2, 0).unwrap_err(), ProducerError::ZeroNumSteps);
        assert!(matches!(
            LmWindows::new(&[], 1, 1).unwrap_err(),
            ProducerError::EmptyEpoch { data_len: 0, .. }
        ));
    }

    #[test]
    fn test_producer_advances_and_wraps() {
        let mut producer = lm_producer::<TestBackend>(&lm_sequence(10), 2, 2, &Default::default()).unwrap();
        assert_eq!(producer.epoch_size(), 2);

        let first = producer.next_batch().to_rows().unwrap();
        assert_eq!(producer.cursor(), 1);
        let second = producer.next_batch().to_rows().unwrap();
        assert_eq!(producer.cursor(), 0);
        let third = producer.next_batch().to_rows().unwrap();

        assert_eq!(first.0, vec![vec![0, 1], vec![5, 6]]);
        assert_eq!(second.0, vec![vec![2, 3], vec![7, 8]]);
        assert_eq!(third, first);

        producer.reset();
        assert_eq!(producer.next_batch().to_rows().unwrap(), first);
    }

    #[test]
    fn test_iterator_never_ends() {
        let producer = lm_producer::<TestBackend>(&lm_sequence(10), 2, 2, &Default::default()).unwrap();
        assert_eq!(producer.take(5).count(), 5);
    }

    #[test]
    fn test_random_shapes_and_shift() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let batch_size = rng.gen_range(1..6);
            let num_steps  = rng.gen_range(1..8);
            let min_len    = batch_size * (num_steps + 1);
            let n          = rng.gen_range(min_len..min_len + 60) as u32;
            let raw: Vec<IdPair> = (0..n).map(|_| rng.gen_range(0..50)).map(|id| IdPair::new(id, id)).collect();

            let windows = LmWindows::new(&raw, batch_size, num_steps).unwrap();
            let epoch   = windows.epoch_size();
            assert!(epoch >= 1);
            assert!(epoch * num_steps < windows.batch_len());

            let mut producer = LmProducer::<TestBackend>::new(windows.clone(), Default::default());
            for w in 0..epoch {
                let batch = producer.next_batch();
                assert_eq!(batch.dims(), [batch_size, num_steps]);
                assert_eq!(batch.targets.dims(), [batch_size, num_steps]);

                for (r, sample) in windows.window(w).unwrap().iter().enumerate() {
                    // target[t] is the id right after input[t] in the flat grid
                    let start = r * windows.batch_len() + w * num_steps;
                    for t in 0..num_steps {
                        assert_eq!(sample.inputs[t],  raw[start + t].input);
                        assert_eq!(sample.targets[t], raw[start + t + 1].input);
                    }
                }
            }
            assert_eq!(producer.cursor(), 0);
        }
    }

    #[test]
    fn test_dataset_orders_rows_window_major() {
        let windows = LmWindows::new(&lm_sequence(10), 2, 2).unwrap();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows.get(0).unwrap().inputs, [0, 1]);
        assert_eq!(windows.get(1).unwrap().inputs, [5, 6]);
        assert_eq!(windows.get(2).unwrap().inputs, [2, 3]);
        assert_eq!(windows.get(3).unwrap().inputs, [7, 8]);
        assert!(windows.get(4).is_none());
    }

    #[test]
    fn test_data_loader_matches_producer() {
        let raw     = lm_sequence(23);
        let windows = LmWindows::new(&raw, 3, 2).unwrap();
        let epoch   = windows.epoch_size();
        let mut producer = LmProducer::<TestBackend>::new(windows.clone(), Default::default());

        let loader  = windows.into_data_loader::<TestBackend>(Default::default());
        let batches: Vec<_> = loader.iter().collect();
        assert_eq!(batches.len(), epoch);

        for batch in batches {
            assert_eq!(batch.to_rows().unwrap(), producer.next_batch().to_rows().unwrap());
        }
    }
}
