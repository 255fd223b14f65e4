//! Read-only view of a running simulator.
//!
//! Tests and front ends observe the machine through [`Inspector`] rather than
//! reaching into component internals. It exposes:
//! 1. **Core state:** PC, committed registers and flags, halt status.
//! 2. **Coprocessors:** Outstanding and queued counts per pipe, unit lifecycle states.
//! 3. **Memory:** Words, byte ranges and framebuffer pixels.

use crate::common::{Cycle, Flag, REGISTER_COUNT, Register};
use crate::common::constants::FRAMEBUFFER_PIXEL_BYTES;
use crate::isa::Pipe;
use crate::sim::simulator::Simulator;
use crate::soc::traits::{Coprocessor, UnitState};
use crate::stats::SimStats;

/// Borrowed, read-only view of a [`Simulator`].
#[derive(Debug, Clone, Copy)]
pub struct Inspector<'a> {
    sim: &'a Simulator,
}

impl<'a> Inspector<'a> {
    pub(crate) const fn new(sim: &'a Simulator) -> Self {
        Self { sim }
    }

    /// Number of cycles simulated so far.
    pub const fn cycle(&self) -> Cycle {
        self.sim.cycle()
    }

    /// Committed program counter.
    pub const fn pc(&self) -> u32 {
        self.sim.core().pc()
    }

    /// Committed value of `reg`.
    pub const fn reg(&self, reg: Register) -> u32 {
        self.sim.core().regs.read(reg)
    }

    /// Every committed register value in index order.
    pub const fn registers(&self) -> &'a [u32; REGISTER_COUNT] {
        self.sim.core().regs.as_array()
    }

    /// Committed value of `flag`.
    pub const fn flag(&self, flag: Flag) -> bool {
        self.sim.core().flags.get(flag)
    }

    /// Returns `true` once a halt has committed.
    pub const fn halted(&self) -> bool {
        self.sim.core().is_halted()
    }

    /// Commands accepted by the scheduler and not yet completed for `pipe`.
    pub fn outstanding(&self, pipe: Pipe) -> u32 {
        self.sim.scheduler().outstanding(pipe)
    }

    /// Commands waiting in the frontend queue for `pipe`.
    pub fn queued(&self, pipe: Pipe) -> usize {
        self.sim.scheduler().queued(pipe)
    }

    /// Lifecycle state of the DMA unit.
    pub fn dma_state(&self) -> UnitState {
        self.sim.dma().state()
    }

    /// Lifecycle state of the blitter.
    pub fn blitter_state(&self) -> UnitState {
        self.sim.blitter().state()
    }

    /// Word at `addr`, aligned down to 4 bytes.
    pub fn word(&self, addr: u32) -> u32 {
        self.sim.memory().read_word(addr)
    }

    /// `len` bytes starting at `addr`.
    ///
    /// # Panics
    ///
    /// Panics if the range runs past the end of memory.
    pub fn bytes(&self, addr: u32, len: usize) -> &'a [u8] {
        self.sim.memory().bytes(addr, len)
    }

    /// Colour word of framebuffer pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside the framebuffer.
    pub fn framebuffer_pixel(&self, x: u32, y: u32) -> u32 {
        let fb = self.sim.blitter().framebuffer();
        assert!(
            x < fb.width && y < fb.height,
            "pixel ({x}, {y}) outside {}x{} framebuffer",
            fb.width,
            fb.height
        );
        self.word(fb.base + (y * fb.width + x) * FRAMEBUFFER_PIXEL_BYTES)
    }

    /// Statistics collected so far.
    pub const fn stats(&self) -> &'a SimStats {
        self.sim.stats()
    }
}
