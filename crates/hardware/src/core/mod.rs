//! Core processor implementation.
//!
//! This module contains the VPU core: the five-stage instruction pipeline, its
//! execution units, and the `Core` structure that owns their state and runs
//! one cycle at a time.

/// Core state and per-cycle orchestration.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, forwarding).
pub mod pipeline;

/// Execution units (ALU, branch predictor).
pub mod units;

pub use self::cpu::Core;
