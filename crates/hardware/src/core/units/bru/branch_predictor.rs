//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait consulted by the fetch stage
//! and trained by the execute stage, together with the prediction record that
//! travels down the pipeline alongside each fetched instruction.

/// Where a fetch-time prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredictionSource {
    /// Sequential next address (`pc + 4`).
    #[default]
    FallThrough,
    /// Target read from the branch target buffer.
    Target,
}

/// Prediction made at fetch for one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    /// Predicted address of the next instruction.
    pub next_pc: u32,
    /// Table that produced `next_pc`.
    pub source: PredictionSource,
}

/// Trait for branch prediction algorithms.
pub trait BranchPredictor {
    /// Predicts the address following the instruction at `pc`.
    fn predict(&self, pc: u32) -> Prediction;

    /// Trains the predictor with a resolved control-flow instruction.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch or jump
    /// * `prediction` - The prediction made for it at fetch
    /// * `resolved` - The actual next PC computed by execute
    fn update(&mut self, pc: u32, prediction: Prediction, resolved: u32);
}
