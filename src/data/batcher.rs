// ============================================================
// Layer 4 - LM Batcher
// ============================================================
// Implements burn's Batcher trait to stack LmSample rows into
// a pair of [rows, num_steps] Int tensors.
//
//   Input:  Vec of N LmSamples, each with num_steps ids
//   Output: LmBatch with inputs/targets of shape [N, num_steps]
//
// Rows are flattened in order and reshaped, so row r of the
// batch is exactly items[r]. All rows of a window share the
// same length, which LmWindows guarantees.
//
// Reference: Burn Book §4 (Batcher)

use anyhow::{anyhow, Result};
use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::LmSample;

// ─── LmBatch ──────────────────────────────────────────────────────────────────
/// One training step worth of data.
#[derive(Debug, Clone)]
pub struct LmBatch<B: Backend> {
    /// Current window - shape: [batch_size, num_steps]
    pub inputs: Tensor<B, 2, Int>,

    /// One-step-ahead window - shape: [batch_size, num_steps]
    pub targets: Tensor<B, 2, Int>,
}

impl<B: Backend> LmBatch<B> {
    /// `[batch_size, num_steps]`
    pub fn dims(&self) -> [usize; 2] {
        self.inputs.dims()
    }

    /// Copy both grids back to host memory, row by row.
    pub fn to_rows(&self) -> Result<(Vec<Vec<u32>>, Vec<Vec<u32>>)> {
        Ok((tensor_rows(&self.inputs)?, tensor_rows(&self.targets)?))
    }
}

/// Read a 2-D Int tensor back as rows of ids.
pub fn tensor_rows<B: Backend>(tensor: &Tensor<B, 2, Int>) -> Result<Vec<Vec<u32>>> {
    let [_, cols] = tensor.dims();
    let flat = tensor
        .clone()
        .into_data()
        .iter::<i64>()
        .map(|v| u32::try_from(v).map_err(|_| anyhow!("negative id {v} in batch tensor")))
        .collect::<Result<Vec<u32>>>()?;

    if cols == 0 {
        return Ok(Vec::new());
    }
    Ok(flat.chunks(cols).map(<[u32]>::to_vec).collect())
}

// ─── LmBatcher ────────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the right CPU/GPU.
#[derive(Clone, Debug)]
pub struct LmBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> LmBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<LmSample, LmBatch<B>> for LmBatcher<B> {
    fn batch(&self, items: Vec<LmSample>) -> LmBatch<B> {
        let rows      = items.len();
        let num_steps = items.first().map_or(0, LmSample::num_steps);

        // Burn uses i32 for Int tensor construction
        let inputs_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.inputs.iter().map(|&x| x as i32))
            .collect();
        let targets_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.targets.iter().map(|&x| x as i32))
            .collect();

        let inputs = Tensor::<B, 1, Int>::from_ints(inputs_flat.as_slice(), &self.device)
            .reshape([rows, num_steps]);
        let targets = Tensor::<B, 1, Int>::from_ints(targets_flat.as_slice(), &self.device)
            .reshape([rows, num_steps]);

        LmBatch { inputs, targets }
    }
}
