//! Simulator: owns the core, the coprocessors and the memory they share.
//!
//! The driver advances every component once per cycle in a fixed order:
//! 1. **Core:** Flush, the five stages, then commit; execute may submit to the scheduler.
//! 2. **Scheduler:** Offers the ready front of each frontend queue to its unit.
//! 3. **Units:** DMA, then blitter, each advancing its state machine and firing callbacks.
//! 4. **Bookkeeping:** Coprocessor counters are copied into the statistics and the cycle advances.

use tracing::debug;

use crate::common::{Cycle, SimError};
use crate::common::constants::WORD_BYTES;
use crate::config::Config;
use crate::core::Core;
use crate::sim::inspect::Inspector;
use crate::soc::devices::{Blitter, Dma};
use crate::soc::memory::Memory;
use crate::soc::scheduler::Scheduler;
use crate::soc::traits::{Coprocessor, UnitState};
use crate::stats::SimStats;

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    memory: Memory,
    core: Core,
    scheduler: Scheduler,
    dma: Dma,
    blitter: Blitter,
    stats: SimStats,
    cycle: Cycle,
}

impl Simulator {
    /// Validates `config` and builds a simulator with zeroed memory at cycle 0.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the configuration breaks a structural rule.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            memory: Memory::new(config.memory.size),
            core: Core::new(config),
            scheduler: Scheduler::new(config),
            dma: Dma::new(),
            blitter: Blitter::new(config.framebuffer),
            stats: SimStats::new(),
            cycle: 0,
        })
    }

    /// Writes `words` to memory starting at `addr` and points fetch there.
    ///
    /// The image is not terminated automatically; end it with `HLT` or the
    /// segment-end word.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ProgramTooLarge`] if the image would run past the end of
    /// memory or `addr` is not word aligned.
    pub fn load_program(&mut self, addr: u32, words: &[u32]) -> Result<(), SimError> {
        let too_large = SimError::ProgramTooLarge {
            addr,
            words: words.len(),
        };
        let Some(len) = words.len().checked_mul(WORD_BYTES as usize) else {
            return Err(too_large);
        };
        if addr % WORD_BYTES != 0 || !self.memory.contains(addr, len) {
            return Err(too_large);
        }

        let image: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.memory.write_bytes(addr, &image);
        self.core.set_pc(addr);
        debug!("loaded {} words at {addr:#x}", words.len());
        Ok(())
    }

    /// Advances every component by one cycle.
    pub fn tick(&mut self) {
        let now = self.cycle;
        self.core
            .run_cycle(now, &self.memory, &mut self.scheduler, &mut self.stats);
        self.scheduler
            .run_cycle(now, &mut self.dma, &mut self.blitter);
        self.dma.run_cycle(now, &mut self.memory);
        self.blitter.run_cycle(now, &mut self.memory);

        let dma = self.scheduler.dma();
        let blitter = self.scheduler.blitter();
        self.stats.dma_enqueued = dma.enqueued();
        self.stats.dma_completed = dma.outstanding().completed();
        self.stats.blitter_enqueued = blitter.enqueued();
        self.stats.blitter_completed = blitter.outstanding().completed();

        self.cycle += 1;
        self.stats.cycles += 1;
    }

    /// Ticks until the core has committed a halt.
    ///
    /// Coprocessor work still in flight is left running.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if the core has not halted after
    /// `general.max_cycles` cycles.
    pub fn run_until_halt(&mut self) -> Result<(), SimError> {
        self.run_while(|sim| !sim.core.is_halted())
    }

    /// Ticks until the core has halted and every coprocessor has drained.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if that point is not reached within
    /// `general.max_cycles` cycles.
    pub fn run(&mut self) -> Result<(), SimError> {
        self.run_while(|sim| !(sim.core.is_halted() && sim.is_drained()))
    }

    fn run_while(&mut self, busy: impl Fn(&Self) -> bool) -> Result<(), SimError> {
        let limit = self.config.general.max_cycles;
        while busy(self) {
            if self.cycle >= limit {
                return Err(SimError::CycleLimit { limit });
            }
            self.tick();
        }
        debug!("[{}] run finished", self.cycle);
        Ok(())
    }

    /// Returns `true` when no coprocessor command is queued, held or outstanding.
    pub fn is_drained(&self) -> bool {
        self.scheduler.fence_ready()
            && self.scheduler.dma().queued() == 0
            && self.scheduler.blitter().queued() == 0
            && self.dma.state() == UnitState::Idle
            && self.blitter.state() == UnitState::Idle
    }

    /// Read-only view of the simulated machine.
    pub const fn inspect(&self) -> Inspector<'_> {
        Inspector::new(self)
    }

    /// Mutable memory, for setting up data before a run.
    pub const fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Number of cycles simulated so far.
    pub const fn cycle(&self) -> Cycle {
        self.cycle
    }

    /// Configuration the simulator was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) const fn memory(&self) -> &Memory {
        &self.memory
    }

    pub(crate) const fn core(&self) -> &Core {
        &self.core
    }

    pub(crate) const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub(crate) const fn dma(&self) -> &Dma {
        &self.dma
    }

    pub(crate) const fn blitter(&self) -> &Blitter {
        &self.blitter
    }

    pub(crate) const fn stats(&self) -> &SimStats {
        &self.stats
    }
}
