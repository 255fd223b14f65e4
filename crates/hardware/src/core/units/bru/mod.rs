//! Branch prediction unit (BRU).
//!
//! This module contains the branch history table (BHT), the branch target
//! buffer (BTB), and the one-bit predictor built from them.

pub use self::branch_predictor::{BranchPredictor, Prediction, PredictionSource};
pub use self::one_bit::OneBitPredictor;

/// Branch History Table of taken/not-taken bits.
pub mod bht;

/// Branch predictor trait and prediction record.
pub mod branch_predictor;

/// Branch Target Buffer for storing predicted branch targets.
pub mod btb;

/// One-bit history predictor combining the BHT and BTB.
pub mod one_bit;
