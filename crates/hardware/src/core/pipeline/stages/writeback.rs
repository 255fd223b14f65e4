//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits results to the register file, releases the matching forwarding
//! entry, and raises the halted flag when a `HLT` (or a segment end) commits.

use tracing::{debug, trace};

use crate::common::{Cycle, Register};
use crate::core::Core;
use crate::isa::Opcode;
use crate::stats::SimStats;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `core` - Mutable reference to the core state
/// * `stats` - Statistics sink
/// * `now` - Current global cycle
pub fn wb_stage(core: &mut Core, stats: &mut SimStats, now: Cycle) {
    let Some(entry) = core.memory_q.pop_ready(now) else {
        return;
    };

    if entry.dst != Register::Null {
        trace!("[{now}] WB  pc={:#x} {}={:#x}", entry.pc, entry.dst, entry.value);
        core.regs.write(entry.dst, entry.value);
        core.forwarding.release_if_match(entry.dst, entry.generation);
    }
    stats.instructions_retired += 1;

    if entry.opcode == Opcode::HLT {
        debug!("[{now}] WB  pc={:#x} halted", entry.pc);
        core.halted = true;
    }
}
