//! Memory Access (MEM) Stage.
//!
//! The VPU core has no load or store instructions, so this stage only carries
//! execute results one cycle further towards writeback.

use crate::common::Cycle;
use crate::core::Core;
use crate::core::pipeline::latches::MemoryOut;

/// Executes the memory access stage of the pipeline.
///
/// # Arguments
///
/// * `core` - Mutable reference to the core state
/// * `now` - Current global cycle
pub fn mem_stage(core: &mut Core, now: Cycle) {
    if let Some(entry) = core.execute_q.pop_ready(now) {
        core.memory_q.push_next(MemoryOut::from(entry), now);
    }
}
