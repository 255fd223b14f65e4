//! Core Definition and Initialization.
//!
//! This module defines the central `Core` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains registers, flags, and the halt latches.
//! 2. **Pipeline Control:** Owns the cycle-tagged queue between each pair of stages and
//!    the pending flush queue.
//! 3. **Speculation:** Owns the branch predictor and the forwarding table.

/// Per-cycle stage orchestration and commit.
pub mod execution;

use crate::common::{Flags, LatchQueue, Register, RegisterFile};
use crate::config::Config;
use crate::core::pipeline::forwarding::ForwardingTable;
use crate::core::pipeline::latches::{DecodeOut, ExecuteOut, FetchOut, MemoryOut, Staged};
use crate::core::units::bru::OneBitPredictor;

/// Main core structure containing all pipeline state.
#[derive(Debug)]
pub struct Core {
    /// Committed registers, including the PC.
    pub regs: RegisterFile,
    /// Flags written by compare instructions.
    pub flags: Flags,
    /// BHT/BTB branch predictor.
    pub predictor: OneBitPredictor,
    /// Uncommitted execute results.
    pub forwarding: ForwardingTable,

    /// Fetch → Decode queue.
    pub fetch_q: LatchQueue<FetchOut>,
    /// Decode → Execute queue.
    pub decode_q: LatchQueue<DecodeOut>,
    /// Execute → Memory queue.
    pub execute_q: LatchQueue<ExecuteOut>,
    /// Memory → Writeback queue.
    pub memory_q: LatchQueue<MemoryOut>,
    /// Pending redirect targets.
    pub flush_q: LatchQueue<u32>,

    /// Fetch has read a `HLT` on the current path.
    pub seen_halt: bool,
    /// Fetch has read the segment-end sentinel on the current path.
    pub fetch_stopped: bool,
    /// A halt has committed; the pipeline no longer advances.
    pub halted: bool,

    /// Shadow outputs of the cycle in progress.
    pub(crate) staged: Staged,
}

impl Core {
    /// Creates a new core with cleared state and the PC at `general.start_pc`.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulator configuration (predictor sizes, start PC)
    pub fn new(config: &Config) -> Self {
        let mut regs = RegisterFile::new();
        regs.write(Register::Pc, config.general.start_pc);
        Self {
            regs,
            flags: Flags::new(),
            predictor: OneBitPredictor::new(config.pipeline.bht_size, config.pipeline.btb_size),
            forwarding: ForwardingTable::new(),
            fetch_q: LatchQueue::new(),
            decode_q: LatchQueue::new(),
            execute_q: LatchQueue::new(),
            memory_q: LatchQueue::new(),
            flush_q: LatchQueue::new(),
            seen_halt: false,
            fetch_stopped: false,
            halted: false,
            staged: Staged::default(),
        }
    }

    /// Points fetch at `pc`.
    ///
    /// Intended for program setup before the first cycle; in-flight
    /// instructions are not discarded.
    pub fn set_pc(&mut self, pc: u32) {
        self.regs.write(Register::Pc, pc);
    }

    /// Current program counter.
    pub const fn pc(&self) -> u32 {
        self.regs.pc()
    }

    /// Returns `true` once a halt has committed.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }
}
