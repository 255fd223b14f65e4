//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the VPU simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived IPC.
//! 2. **Branch prediction:** Resolved control-flow instructions, mispredictions, and accuracy.
//! 3. **Pipeline control:** Flushes applied and cycles lost to scheduler refusals.
//! 4. **Coprocessors:** Commands enqueued and completed per unit.

use std::fmt;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed at writeback.
    pub instructions_retired: u64,

    /// Number of control-flow instructions resolved in execute.
    pub branch_predictions: u64,
    /// Number of those whose predicted next PC was wrong.
    pub branch_mispredictions: u64,
    /// Number of flushes applied.
    pub flushes: u64,
    /// Cycles in which execute was refused by the scheduler.
    pub scheduler_stalls: u64,

    /// DMA commands enqueued by the scheduler.
    pub dma_enqueued: u64,
    /// DMA commands completed.
    pub dma_completed: u64,
    /// Blitter commands enqueued by the scheduler.
    pub blitter_enqueued: u64,
    /// Blitter commands completed.
    pub blitter_completed: u64,
}

impl SimStats {
    /// Creates a zeroed statistics record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instructions retired per cycle; `0.0` before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Fraction of control-flow instructions predicted correctly; `1.0` when
    /// none have been resolved.
    pub fn prediction_accuracy(&self) -> f64 {
        if self.branch_predictions == 0 {
            1.0
        } else {
            1.0 - self.branch_mispredictions as f64 / self.branch_predictions as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "VPU SIMULATION STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {}", self.instructions_retired)?;
        writeln!(f, "sim_ipc                  {:.4}", self.ipc())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "BRANCH PREDICTION")?;
        writeln!(f, "  bp.lookups             {}", self.branch_predictions)?;
        writeln!(f, "  bp.mispredicts         {}", self.branch_mispredictions)?;
        writeln!(
            f,
            "  bp.accuracy            {:.2}%",
            self.prediction_accuracy() * 100.0
        )?;
        writeln!(f, "  pipeline.flushes       {}", self.flushes)?;
        writeln!(f, "  stalls.scheduler       {}", self.scheduler_stalls)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "COPROCESSORS")?;
        writeln!(
            f,
            "  dma.commands           {} enqueued, {} completed",
            self.dma_enqueued, self.dma_completed
        )?;
        writeln!(
            f,
            "  blitter.commands       {} enqueued, {} completed",
            self.blitter_enqueued, self.blitter_completed
        )?;
        write!(f, "==========================================================")
    }
}
