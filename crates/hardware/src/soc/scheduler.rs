//! Coprocessor Scheduler.
//!
//! The scheduler sits between the core's execute stage and the coprocessors. It provides:
//! 1. **Routing:** Each pipe opcode goes to the DMA frontend, the blitter frontend, or the
//!    fence query, by the opcode's static pipe.
//! 2. **Staging:** Field-setting opcodes accumulate into a per-unit staging command; a
//!    trigger opcode completes it and enqueues a copy into a bounded frontend queue.
//! 3. **Backpressure:** A full queue refuses the trigger without rolling back the staged
//!    fields. A busy unit leaves its queue in place and delays every entry by one cycle.
//! 4. **Accounting:** Outstanding counters rise on enqueue and fall exactly once per
//!    completion callback; a fence succeeds only when both are zero.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use tracing::debug;

use crate::common::{Cycle, LatchQueue};
use crate::config::Config;
use crate::isa::{Opcode, Pipe};
use crate::soc::devices::blitter::{BlitterCommand, BlitterOperation};
use crate::soc::devices::dma::{DmaCommand, DmaOperation};
use crate::soc::traits::{CompletionCallback, Coprocessor};

/// Command assembled field by field from pipe opcodes.
pub trait StagedCommand: Clone + Default {
    /// Applies one pipe opcode to the staging command.
    ///
    /// Returns `true` if the opcode is a trigger that completes the command.
    ///
    /// # Panics
    ///
    /// Panics if `opcode` does not belong to this command's pipe.
    fn stage(&mut self, opcode: Opcode, a: u32, b: u32) -> bool;

    /// Resets the operation to "none", keeping the other fields.
    fn clear_operation(&mut self);
}

impl StagedCommand for DmaCommand {
    fn stage(&mut self, opcode: Opcode, a: u32, _b: u32) -> bool {
        match opcode {
            Opcode::P_DMA_DST_R => self.dest = a,
            Opcode::P_DMA_SRC_R => self.source = a,
            Opcode::P_DMA_LEN_R => self.length = a,
            Opcode::P_DMA_SET_R => {
                self.value = a as u8;
                self.operation = DmaOperation::Set;
                return true;
            }
            Opcode::P_DMA_CPY => {
                self.operation = DmaOperation::Copy;
                return true;
            }
            _ => panic!("scheduler: opcode {opcode} is not a DMA pipe opcode"),
        }
        false
    }

    fn clear_operation(&mut self) {
        self.operation = DmaOperation::None;
    }
}

impl StagedCommand for BlitterCommand {
    fn stage(&mut self, opcode: Opcode, a: u32, b: u32) -> bool {
        match opcode {
            // RGB in, RGBA stored.
            Opcode::P_BLI_COL_R => self.colour = (a << 8) | 0xFF,
            Opcode::P_BLI_PIX_R_R => {
                self.x = a;
                self.y = b;
                self.operation = BlitterOperation::Pixel;
                return true;
            }
            Opcode::P_BLI_CLR => {
                self.operation = BlitterOperation::Clear;
                return true;
            }
            _ => panic!("scheduler: opcode {opcode} is not a blitter pipe opcode"),
        }
        false
    }

    fn clear_operation(&mut self) {
        self.operation = BlitterOperation::None;
    }
}

#[derive(Debug, Default)]
struct Counts {
    outstanding: AtomicU32,
    completed: AtomicU64,
}

/// Shared count of accepted-but-not-completed commands for one unit.
///
/// Clones share the same count; completion callbacks hold a clone.
#[derive(Debug, Clone, Default)]
pub struct OutstandingCounter {
    counts: Arc<Counts>,
}

impl OutstandingCounter {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current outstanding count.
    pub fn get(&self) -> u32 {
        self.counts.outstanding.load(Ordering::Acquire)
    }

    /// Number of completions recorded so far.
    pub fn completed(&self) -> u64 {
        self.counts.completed.load(Ordering::Acquire)
    }

    /// Records one accepted command.
    pub fn increment(&self) {
        let _ = self.counts.outstanding.fetch_add(1, Ordering::AcqRel);
    }

    /// Records one completion.
    ///
    /// # Panics
    ///
    /// Panics if the count is already zero.
    pub fn decrement(&self) {
        let previous = self
            .counts
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
        assert!(
            previous.is_ok(),
            "outstanding count decremented below zero"
        );
        let _ = self.counts.completed.fetch_add(1, Ordering::AcqRel);
    }

    /// Builds a completion callback that decrements this counter.
    pub fn completion(&self) -> CompletionCallback {
        let counter = self.clone();
        Box::new(move || counter.decrement())
    }
}

/// Per-unit frontend: staging command, bounded queue and outstanding count.
#[derive(Debug)]
pub struct Frontend<C> {
    staging: C,
    queue: LatchQueue<C>,
    capacity: usize,
    outstanding: OutstandingCounter,
    enqueued: u64,
}

impl<C: StagedCommand> Frontend<C> {
    /// Creates an empty frontend whose queue holds at most `capacity` commands.
    pub fn new(capacity: usize) -> Self {
        Self {
            staging: C::default(),
            queue: LatchQueue::new(),
            capacity,
            outstanding: OutstandingCounter::new(),
            enqueued: 0,
        }
    }

    /// Applies a pipe opcode; enqueues the staged command on a trigger.
    ///
    /// Returns `false` only when a trigger finds the queue full. The staged
    /// fields, including the operation, are kept for the retry.
    pub fn submit(&mut self, now: Cycle, opcode: Opcode, a: u32, b: u32) -> bool {
        if !self.staging.stage(opcode, a, b) {
            return true;
        }
        if self.queue.len() >= self.capacity {
            return false;
        }
        self.queue.push_next(self.staging.clone(), now);
        self.outstanding.increment();
        self.enqueued += 1;
        self.staging.clear_operation();
        true
    }

    /// Offers the ready front command to `unit`.
    ///
    /// On refusal every queued command is delayed by one cycle.
    pub fn dispatch<U>(&mut self, now: Cycle, unit: &mut U)
    where
        U: Coprocessor<Command = C>,
    {
        let Some(command) = self.queue.front_ready(now).cloned() else {
            return;
        };
        if unit.submit(now, command, self.outstanding.completion()) {
            debug!("[{now}] sched: dispatched to {}", unit.name());
            let _ = self.queue.pop_ready(now);
        } else {
            self.queue.postpone_all();
        }
    }

    /// The staging command as currently accumulated.
    pub const fn staging(&self) -> &C {
        &self.staging
    }

    /// Number of queued commands.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Outstanding counter of this unit.
    pub const fn outstanding(&self) -> &OutstandingCounter {
        &self.outstanding
    }

    /// Number of commands enqueued so far.
    pub const fn enqueued(&self) -> u64 {
        self.enqueued
    }
}

/// Coprocessor scheduler.
#[derive(Debug)]
pub struct Scheduler {
    dma: Frontend<DmaCommand>,
    blitter: Frontend<BlitterCommand>,
}

impl Scheduler {
    /// Creates a scheduler with empty frontends sized by
    /// `scheduler.frontend_queue_size`.
    pub fn new(config: &Config) -> Self {
        Self::with_queue_size(config.scheduler.frontend_queue_size)
    }

    /// Creates a scheduler whose frontend queues each hold `queue_size` commands.
    pub fn with_queue_size(queue_size: usize) -> Self {
        Self {
            dma: Frontend::new(queue_size),
            blitter: Frontend::new(queue_size),
        }
    }

    /// Accepts a pipe instruction from the execute stage.
    ///
    /// Returns `false` if the core must stall and present the same instruction
    /// again next cycle: a trigger found its queue full, or a fence found
    /// outstanding work.
    ///
    /// # Arguments
    ///
    /// * `now` - Cycle in which execute presents the instruction
    /// * `opcode` - Pipe opcode
    /// * `a` - First resolved operand
    /// * `b` - Second resolved operand
    ///
    /// # Panics
    ///
    /// Panics if `opcode` is not a pipe opcode.
    pub fn core_submit(&mut self, now: Cycle, opcode: Opcode, a: u32, b: u32) -> bool {
        match opcode.pipe() {
            Some(Pipe::Dma) => self.dma.submit(now, opcode, a, b),
            Some(Pipe::Blitter) => self.blitter.submit(now, opcode, a, b),
            Some(Pipe::Sched) => self.fence_ready(),
            None => panic!("scheduler: opcode {opcode} submitted in cycle {now} has no pipe"),
        }
    }

    /// Returns `true` when neither unit has outstanding commands.
    pub fn fence_ready(&self) -> bool {
        self.dma.outstanding.get() == 0 && self.blitter.outstanding.get() == 0
    }

    /// Dispatches ready frontend commands to the units.
    pub fn run_cycle<D, B>(&mut self, now: Cycle, dma: &mut D, blitter: &mut B)
    where
        D: Coprocessor<Command = DmaCommand>,
        B: Coprocessor<Command = BlitterCommand>,
    {
        self.dma.dispatch(now, dma);
        self.blitter.dispatch(now, blitter);
    }

    /// DMA frontend.
    pub const fn dma(&self) -> &Frontend<DmaCommand> {
        &self.dma
    }

    /// Blitter frontend.
    pub const fn blitter(&self) -> &Frontend<BlitterCommand> {
        &self.blitter
    }

    /// Outstanding count for `pipe`; always zero for the scheduler pipe.
    pub fn outstanding(&self, pipe: Pipe) -> u32 {
        match pipe {
            Pipe::Dma => self.dma.outstanding.get(),
            Pipe::Blitter => self.blitter.outstanding.get(),
            Pipe::Sched => 0,
        }
    }

    /// Queued command count for `pipe`; always zero for the scheduler pipe.
    pub fn queued(&self, pipe: Pipe) -> usize {
        match pipe {
            Pipe::Dma => self.dma.queued(),
            Pipe::Blitter => self.blitter.queued(),
            Pipe::Sched => 0,
        }
    }
}
