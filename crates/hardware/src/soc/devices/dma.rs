//! DMA Engine.
//!
//! Executes bulk memory commands through the block interface, one block access
//! per cycle:
//! 1. **SET:** Fills `[dest, dest + length)` with a byte. Full blocks are written
//!    directly; partial blocks are read first and written back on the next cycle.
//! 2. **COPY:** Streams `[source, source + length)` to `dest` through a staging buffer
//!    of up to two blocks. The copy runs from the top down when the destination
//!    overlaps the source from above, so every source byte is read before it is
//!    overwritten.
//!
//! Unit lifecycle: IDLE → WORKING → FINISHED → IDLE. Work starts the cycle after
//! `submit`; the completion callback fires on the cycle after the last working cycle.
//! Command ranges are checked against the memory the unit works on, so a range
//! that leaves memory is fatal in the first working cycle.

use std::collections::VecDeque;

use tracing::debug;

use crate::common::Cycle;
use crate::common::constants::{MEM_ACCESS_WIDTH, block_align};
use crate::soc::memory::{Block, Memory};
use crate::soc::traits::{CompletionCallback, Coprocessor, UnitState};

const WIDTH: u64 = MEM_ACCESS_WIDTH as u64;

/// DMA operation selected by the trigger opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DmaOperation {
    /// No trigger seen yet.
    #[default]
    None,
    /// Copy `length` bytes from `source` to `dest`.
    Copy,
    /// Fill `length` bytes at `dest` with `value`.
    Set,
}

/// A DMA command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DmaCommand {
    /// Destination byte address.
    pub dest: u32,
    /// Source byte address (COPY only).
    pub source: u32,
    /// Number of bytes.
    pub length: u32,
    /// Fill byte (SET only).
    pub value: u8,
    /// Operation.
    pub operation: DmaOperation,
}

/// Byte FIFO holding source bytes between their read and their write.
///
/// Bytes are kept in address order. A forward copy appends at the back and
/// drains from the front; a backward copy prepends and drains from the back.
#[derive(Debug)]
struct StagingBuffer {
    bytes: VecDeque<u8>,
}

impl StagingBuffer {
    const CAPACITY: usize = 2 * MEM_ACCESS_WIDTH;

    fn new() -> Self {
        Self {
            bytes: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn clear(&mut self) {
        self.bytes.clear();
    }

    fn check_capacity(&self) {
        assert!(
            self.bytes.len() <= Self::CAPACITY,
            "DMA staging buffer overflow: {} bytes",
            self.bytes.len()
        );
    }

    fn push_back(&mut self, data: &[u8]) {
        self.bytes.extend(data.iter().copied());
        self.check_capacity();
    }

    fn push_front(&mut self, data: &[u8]) {
        for &b in data.iter().rev() {
            self.bytes.push_front(b);
        }
        self.check_capacity();
    }

    fn pop_front_into(&mut self, out: &mut [u8]) {
        let n = out.len();
        for (slot, b) in out.iter_mut().zip(self.bytes.drain(..n)) {
            *slot = b;
        }
    }

    fn pop_back_into(&mut self, out: &mut [u8]) {
        let start = self.bytes.len() - out.len();
        for (slot, b) in out.iter_mut().zip(self.bytes.drain(start..)) {
            *slot = b;
        }
    }
}

/// Position of a SET or COPY within its address ranges.
///
/// `*_block` is the block-aligned address handled next; `*_remaining` counts
/// the in-range bytes not yet read (source) or written (dest).
#[derive(Debug, Default, Clone, Copy)]
struct Cursors {
    dest_block: u64,
    dest_remaining: u64,
    source_block: u64,
    source_remaining: u64,
    backward: bool,
}

/// In-range sub-window `[lo, hi)` of the block at `block` for range `[start, end)`.
fn window(block: u64, start: u64, end: u64) -> (usize, usize) {
    let lo = start.saturating_sub(block).min(WIDTH);
    let hi = end.saturating_sub(block).min(WIDTH);
    (lo as usize, hi as usize)
}

/// DMA unit.
pub struct Dma {
    state: UnitState,
    work_cycle: Cycle,
    command: DmaCommand,
    on_complete: Option<CompletionCallback>,
    cursors: Cursors,
    /// Destination block read for a read-modify-write.
    fetched: Option<Block>,
    staging: StagingBuffer,
}

impl std::fmt::Debug for Dma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dma")
            .field("state", &self.state)
            .field("work_cycle", &self.work_cycle)
            .field("command", &self.command)
            .field("cursors", &self.cursors)
            .field("staged", &self.staging.len())
            .finish_non_exhaustive()
    }
}

impl Dma {
    /// Creates an idle DMA unit.
    pub fn new() -> Self {
        Self {
            state: UnitState::Idle,
            work_cycle: 0,
            command: DmaCommand::default(),
            on_complete: None,
            cursors: Cursors::default(),
            fetched: None,
            staging: StagingBuffer::new(),
        }
    }

    /// The command currently held.
    pub const fn command(&self) -> &DmaCommand {
        &self.command
    }

    /// Asserts that the held command's ranges lie inside `memory`.
    fn check_ranges(&self, now: Cycle, memory: &Memory) {
        let cmd = &self.command;
        let source = (cmd.operation == DmaOperation::Copy).then_some(("source", cmd.source));
        for (what, addr) in std::iter::once(("destination", cmd.dest)).chain(source) {
            assert!(
                memory.contains(addr, cmd.length as usize),
                "DMA {what} range {addr:#x}+{:#x} in cycle {now} exceeds memory size {:#x}",
                cmd.length,
                memory.size()
            );
        }
    }

    fn finish(&mut self, now: Cycle) {
        debug!("[{now}] DMA: {:?} finished", self.command.operation);
        self.state = UnitState::Finished;
    }

    fn dest_range(&self) -> (u64, u64) {
        let dest = u64::from(self.command.dest);
        (dest, dest + u64::from(self.command.length))
    }

    fn source_range(&self) -> (u64, u64) {
        let source = u64::from(self.command.source);
        (source, source + u64::from(self.command.length))
    }

    /// Moves the destination cursor past the block just written.
    fn advance_dest(&mut self, written: usize) {
        let c = &mut self.cursors;
        c.dest_remaining -= written as u64;
        if c.dest_remaining > 0 {
            if c.backward {
                c.dest_block -= WIDTH;
            } else {
                c.dest_block += WIDTH;
            }
        }
    }

    fn set_cycle(&mut self, now: Cycle, memory: &mut Memory) {
        let (start, end) = self.dest_range();
        let block_addr = self.cursors.dest_block;
        let (lo, hi) = window(block_addr, start, end);

        let mut block = if lo == 0 && hi == MEM_ACCESS_WIDTH {
            [0; MEM_ACCESS_WIDTH]
        } else if let Some(fetched) = self.fetched.take() {
            fetched
        } else {
            self.fetched = Some(memory.read_block(block_addr as u32));
            return;
        };

        block[lo..hi].fill(self.command.value);
        memory.write_block(block_addr as u32, &block);
        self.advance_dest(hi - lo);
        if self.cursors.dest_remaining == 0 {
            self.finish(now);
        }
    }

    fn copy_cycle(&mut self, now: Cycle, memory: &mut Memory) {
        let (src_start, src_end) = self.source_range();

        if self.staging.len() < MEM_ACCESS_WIDTH && self.cursors.source_remaining > 0 {
            let block_addr = self.cursors.source_block;
            let (lo, hi) = window(block_addr, src_start, src_end);
            let block = memory.read_block(block_addr as u32);
            let c = &mut self.cursors;
            c.source_remaining -= (hi - lo) as u64;
            if c.backward {
                self.staging.push_front(&block[lo..hi]);
                if c.source_remaining > 0 {
                    c.source_block -= WIDTH;
                }
            } else {
                self.staging.push_back(&block[lo..hi]);
                c.source_block += WIDTH;
            }
            return;
        }

        let (start, end) = self.dest_range();
        let block_addr = self.cursors.dest_block;
        let (lo, hi) = window(block_addr, start, end);

        let mut block = if lo == 0 && hi == MEM_ACCESS_WIDTH {
            [0; MEM_ACCESS_WIDTH]
        } else if let Some(fetched) = self.fetched.take() {
            fetched
        } else {
            self.fetched = Some(memory.read_block(block_addr as u32));
            return;
        };

        if self.cursors.backward {
            self.staging.pop_back_into(&mut block[lo..hi]);
        } else {
            self.staging.pop_front_into(&mut block[lo..hi]);
        }
        memory.write_block(block_addr as u32, &block);
        self.advance_dest(hi - lo);

        if self.cursors.dest_remaining == 0 {
            assert!(
                self.staging.is_empty() && self.cursors.source_remaining == 0,
                "DMA copy finished with {} bytes still staged",
                self.staging.len()
            );
            self.finish(now);
        }
    }
}

impl Default for Dma {
    fn default() -> Self {
        Self::new()
    }
}

impl Coprocessor for Dma {
    type Command = DmaCommand;

    fn name(&self) -> &'static str {
        "DMA"
    }

    /// Accepts a command while idle.
    ///
    /// # Panics
    ///
    /// Panics if the command has no operation.
    fn submit(
        &mut self,
        now: Cycle,
        command: DmaCommand,
        on_complete: CompletionCallback,
    ) -> bool {
        if self.state != UnitState::Idle {
            return false;
        }
        assert!(
            command.operation != DmaOperation::None,
            "DMA command submitted in cycle {now} without an operation"
        );

        let length = u64::from(command.length);
        let dest = u64::from(command.dest);
        let source = u64::from(command.source);
        // Top-down only when the destination overlaps the source from above.
        let backward =
            command.operation == DmaOperation::Copy && dest > source && dest < source + length;
        let (dest_block, source_block) = if backward && length > 0 {
            (
                u64::from(block_align((dest + length - 1) as u32)),
                u64::from(block_align((source + length - 1) as u32)),
            )
        } else {
            (
                u64::from(block_align(command.dest)),
                u64::from(block_align(command.source)),
            )
        };

        self.cursors = Cursors {
            dest_block,
            dest_remaining: length,
            source_block,
            source_remaining: if command.operation == DmaOperation::Copy {
                length
            } else {
                0
            },
            backward,
        };
        self.fetched = None;
        self.staging.clear();
        self.command = command;
        self.on_complete = Some(on_complete);
        self.work_cycle = now + 1;
        self.state = UnitState::Working;
        debug!(
            "[{now}] DMA: accepted {:?} dest={:#x} source={:#x} len={:#x}{}",
            command.operation,
            command.dest,
            command.source,
            command.length,
            if backward { " (backward)" } else { "" }
        );
        true
    }

    fn run_cycle(&mut self, now: Cycle, memory: &mut Memory) {
        match self.state {
            UnitState::Idle => {}
            UnitState::Finished => {
                if let Some(on_complete) = self.on_complete.take() {
                    on_complete();
                }
                self.state = UnitState::Idle;
            }
            UnitState::Working => {
                if now < self.work_cycle {
                    return;
                }
                self.check_ranges(now, memory);
                if self.cursors.dest_remaining == 0 {
                    self.finish(now);
                    return;
                }
                match self.command.operation {
                    DmaOperation::Set => self.set_cycle(now, memory),
                    DmaOperation::Copy => self.copy_cycle(now, memory),
                    DmaOperation::None => {
                        unreachable!("DMA working without an operation in cycle {now}")
                    }
                }
            }
        }
    }

    fn state(&self) -> UnitState {
        self.state
    }
}
