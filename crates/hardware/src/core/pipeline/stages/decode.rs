//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline. It
//! turns the fetched word into a destination register and source operands.
//! The segment-end sentinel decodes as a halt with no destination; a word
//! fetched from outside memory decodes as an error that execute reports.

use tracing::trace;

use crate::common::{Cycle, DecodeError};
use crate::common::constants::SEGMENT_END;
use crate::core::Core;
use crate::core::pipeline::latches::DecodeOut;
use crate::isa::{Decoded, decode};

/// Executes the instruction decode stage of the pipeline.
///
/// Peeks the fetch queue front; the entry is only popped at commit so that an
/// execute stall in the same cycle leaves it in place.
///
/// # Arguments
///
/// * `core` - Mutable reference to the core state
/// * `now` - Current global cycle
pub fn decode_stage(core: &mut Core, now: Cycle) {
    let Some(entry) = core.fetch_q.front_ready(now).copied() else {
        return;
    };

    let inst = match entry.word {
        None => Err(DecodeError::FetchOutsideMemory { pc: entry.pc }),
        Some(SEGMENT_END) => Ok(Decoded::segment_end(SEGMENT_END)),
        Some(word) => decode(word),
    };

    match &inst {
        Ok(d) => trace!("[{now}] ID  pc={:#x} {d}", entry.pc),
        Err(e) => trace!("[{now}] ID  pc={:#x} {e}", entry.pc),
    }
    core.staged.decoded = Some(DecodeOut {
        pc: entry.pc,
        inst,
        prediction: entry.prediction,
    });
}
