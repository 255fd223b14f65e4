//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It reads the instruction word at the current Program Counter (or at the
//! flush target when a redirect lands this cycle) and consults the branch
//! predictor to choose the next PC.

use tracing::trace;

use crate::common::Cycle;
use crate::common::constants::{INSTRUCTION_SIZE, SEGMENT_END};
use crate::core::Core;
use crate::core::pipeline::latches::FetchOut;
use crate::core::units::bru::{BranchPredictor, Prediction, PredictionSource};
use crate::isa::Opcode;
use crate::isa::instruction::InstructionBits;
use crate::soc::memory::Memory;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `core` - Mutable reference to the core state
/// * `memory` - Instruction memory
/// * `now` - Current global cycle
///
/// # Behavior
///
/// - Suppressed after a `HLT` or segment end was fetched, unless a flush lands
/// - A segment end stops fetching and leaves the PC in place
/// - A PC outside memory does the same and stages an empty word, which only
///   aborts the run if execute reaches it
/// - A `HLT` is staged with the PC unchanged so a later flush can still override it
/// - Any other word stages the predictor's next PC
pub fn fetch_stage(core: &mut Core, memory: &Memory, now: Cycle) {
    let flush_target = core.staged.flush_target;
    if flush_target.is_none() && (core.seen_halt || core.fetch_stopped) {
        return;
    }

    let pc = flush_target.unwrap_or_else(|| core.regs.pc());
    let word = memory
        .contains(pc, INSTRUCTION_SIZE as usize)
        .then(|| memory.read_word(pc));

    let prediction = match word {
        None | Some(SEGMENT_END) => {
            core.staged.stop_fetch = true;
            hold(pc)
        }
        Some(w) if w.opcode_byte() == Opcode::HLT.byte() => {
            core.staged.saw_halt = true;
            hold(pc)
        }
        Some(_) => core.predictor.predict(pc),
    };

    match word {
        Some(w) => trace!(
            "[{now}] IF  pc={pc:#x} word={w:#010x} next={:#x}",
            prediction.next_pc
        ),
        None => trace!("[{now}] IF  pc={pc:#x} outside memory, fetch stopped"),
    }
    core.staged.next_pc = Some(prediction.next_pc);
    core.staged.fetched = Some(FetchOut {
        pc,
        word,
        prediction,
    });
}

/// Prediction that keeps fetch parked on `pc`.
const fn hold(pc: u32) -> Prediction {
    Prediction {
        next_pc: pc,
        source: PredictionSource::FallThrough,
    }
}
