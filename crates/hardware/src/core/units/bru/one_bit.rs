//! One-Bit History Predictor.
//!
//! Pairs a [`Bht`] direction bit with a [`Btb`] target per instruction address.
//! Fetch predicts the BTB target when the history bit is set and the BTB holds
//! the address; otherwise it predicts fall-through.
//!
//! Training only acts on predictions sourced from fall-through:
//! 1. **Fall-through, mispredicted:** set the history bit and record the resolved target.
//! 2. **Fall-through, correct:** clear the history bit.
//! 3. **Target, either outcome:** no change; the pipeline only flushes.

use tracing::trace;

use super::bht::Bht;
use super::branch_predictor::{BranchPredictor, Prediction, PredictionSource};
use super::btb::Btb;
use crate::common::constants::INSTRUCTION_SIZE;

/// BHT + BTB predictor.
#[derive(Debug)]
pub struct OneBitPredictor {
    bht: Bht,
    btb: Btb,
}

impl OneBitPredictor {
    /// Creates a predictor with every history bit clear and an empty BTB.
    ///
    /// # Arguments
    ///
    /// * `bht_size` - Number of history entries. Must be a power of 2.
    /// * `btb_size` - Number of BTB entries. Must be a power of 2.
    pub fn new(bht_size: usize, btb_size: usize) -> Self {
        Self {
            bht: Bht::new(bht_size),
            btb: Btb::new(btb_size),
        }
    }
}

impl BranchPredictor for OneBitPredictor {
    fn predict(&self, pc: u32) -> Prediction {
        if self.bht.taken(pc)
            && let Some(next_pc) = self.btb.lookup(pc)
        {
            return Prediction {
                next_pc,
                source: PredictionSource::Target,
            };
        }
        Prediction {
            next_pc: pc.wrapping_add(INSTRUCTION_SIZE),
            source: PredictionSource::FallThrough,
        }
    }

    fn update(&mut self, pc: u32, prediction: Prediction, resolved: u32) {
        if prediction.source != PredictionSource::FallThrough {
            return;
        }
        if prediction.next_pc == resolved {
            self.bht.set(pc, false);
        } else {
            trace!("bru: train {pc:#x} taken -> {resolved:#x}");
            self.bht.set(pc, true);
            self.btb.update(pc, resolved);
        }
    }
}
