//! Main Execution Loop.
//!
//! This module implements the per-cycle contract of the core. Each call:
//! 1. **Flush:** Applies a redirect that becomes valid this cycle, discarding fetch and decode work.
//! 2. **Stages:** Runs fetch, decode, execute, memory and writeback in that order.
//! 3. **Commit:** Advances the front queues and the PC, or holds them on a scheduler stall.

use tracing::debug;

use super::Core;
use crate::common::{Cycle, Register};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::soc::memory::Memory;
use crate::soc::scheduler::Scheduler;
use crate::stats::SimStats;

impl Core {
    /// Advances the pipeline by one cycle.
    ///
    /// # Arguments
    ///
    /// * `now` - Current global cycle
    /// * `memory` - Instruction memory
    /// * `scheduler` - Coprocessor scheduler consulted by execute
    /// * `stats` - Statistics sink
    pub fn run_cycle(
        &mut self,
        now: Cycle,
        memory: &Memory,
        scheduler: &mut Scheduler,
        stats: &mut SimStats,
    ) {
        if self.halted {
            return;
        }

        self.apply_flush(now, stats);
        fetch_stage(self, memory, now);
        decode_stage(self, now);
        execute_stage(self, scheduler, stats, now);
        mem_stage(self, now);
        wb_stage(self, stats, now);
        self.commit(now);
    }

    fn apply_flush(&mut self, now: Cycle, stats: &mut SimStats) {
        let Some(target) = self.flush_q.pop_ready(now) else {
            return;
        };
        debug!(
            "[{now}] flush: discarding {} fetched, {} decoded; redirect to {target:#x}",
            self.fetch_q.len(),
            self.decode_q.len()
        );
        self.fetch_q.clear();
        self.decode_q.clear();
        self.seen_halt = false;
        self.fetch_stopped = false;
        self.staged.flush_target = Some(target);
        stats.flushes += 1;
    }

    fn commit(&mut self, now: Cycle) {
        let staged = std::mem::take(&mut self.staged);

        if staged.stall {
            self.fetch_q.postpone_all();
            self.decode_q.postpone_all();
            return;
        }

        if let Some(decoded) = staged.decoded {
            let _ = self.fetch_q.pop_ready(now);
            self.decode_q.push_next(decoded, now);
        }
        if let Some(fetched) = staged.fetched {
            self.fetch_q.push_next(fetched, now);
        }
        if let Some(pc) = staged.next_pc {
            self.regs.write(Register::Pc, pc);
        }
        self.seen_halt |= staged.saw_halt;
        self.fetch_stopped |= staged.stop_fetch;
    }
}
