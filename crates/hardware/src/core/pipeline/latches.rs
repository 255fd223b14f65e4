//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entry types carried between the five pipeline stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** One named record per stage boundary, wrapped in a `Defer`
//!    by the queue that carries it.
//! 2. **Prediction Metadata:** The fetch-time prediction rides along until execute resolves it.
//! 3. **Forwarding Tags:** Results carry the generation under which execute published them.

use crate::common::{DecodeError, Register};
use crate::core::units::bru::Prediction;
use crate::isa::{Decoded, Opcode};

/// Entry in the fetch→decode queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchOut {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw instruction word (may be the segment-end sentinel), `None` when
    /// `pc` lies outside memory.
    pub word: Option<u32>,
    /// Prediction made for the instruction following this one.
    pub prediction: Prediction,
}

/// Entry in the decode→execute queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOut {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction, or the decode failure.
    ///
    /// A failure is only fatal once execute reaches it; a flush may still
    /// discard a wrong-path word that happens not to decode.
    pub inst: Result<Decoded, DecodeError>,
    /// Prediction carried from fetch.
    pub prediction: Prediction,
}

/// Entry in the execute→memory queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecuteOut {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Executed opcode.
    pub opcode: Opcode,
    /// Destination register, `Null` for none.
    pub dst: Register,
    /// Result value for `dst`.
    pub value: u32,
    /// Forwarding-table generation of the result.
    pub generation: u64,
}

/// Entry in the memory→writeback queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryOut {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Executed opcode.
    pub opcode: Opcode,
    /// Destination register, `Null` for none.
    pub dst: Register,
    /// Value to commit to `dst`.
    pub value: u32,
    /// Forwarding-table generation of the result.
    pub generation: u64,
}

impl From<ExecuteOut> for MemoryOut {
    fn from(e: ExecuteOut) -> Self {
        Self {
            pc: e.pc,
            opcode: e.opcode,
            dst: e.dst,
            value: e.value,
            generation: e.generation,
        }
    }
}

/// Per-cycle stage outputs held until the end-of-cycle commit.
///
/// Fetch and decode results are staged rather than pushed so that an execute
/// stall in the same cycle can discard them.
#[derive(Clone, Debug, Default)]
pub struct Staged {
    /// Redirect target applied this cycle.
    pub flush_target: Option<u32>,
    /// Instruction fetched this cycle.
    pub fetched: Option<FetchOut>,
    /// Program counter to commit.
    pub next_pc: Option<u32>,
    /// Fetch read a `HLT`.
    pub saw_halt: bool,
    /// Fetch read the segment-end sentinel or ran off the end of memory.
    pub stop_fetch: bool,
    /// Instruction decoded this cycle.
    pub decoded: Option<DecodeOut>,
    /// Execute was refused by the scheduler.
    pub stall: bool,
}
