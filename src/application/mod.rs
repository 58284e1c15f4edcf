// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the data and infra layers for each CLI command.
//
// Rules for this layer:
//   - No tokenization or windowing logic here (Layer 4)
//   - No printing here (Layer 1)
//   - Only workflow coordination and configuration

/// Load a corpus, write labels and optional exports
pub mod prepare_use_case;

/// Inspect the first windows a producer would serve
pub mod peek_use_case;

/// Encode typed history for the on-device model
pub mod history_use_case;

/// CPU backend used by the command-line tools
pub type CpuBackend = burn::backend::NdArray;
