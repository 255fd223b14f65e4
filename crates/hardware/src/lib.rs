//! VPU system simulator library.
//!
//! This crate implements a cycle-accurate simulator of a small accumulator-style
//! core feeding two coprocessors, with the following:
//! 1. **Core:** Five-stage pipeline (fetch, decode, execute, memory, writeback) with a
//!    BHT/BTB branch predictor and a generation-tagged forwarding table.
//! 2. **ISA:** Fixed 32-bit instruction words with decode, encode and disassembly.
//! 3. **SoC:** Shared memory, the coprocessor scheduler, the DMA engine and the pixel blitter.
//! 4. **Simulation:** Configuration, the cycle driver, a read-only inspector and statistics.

/// Common types and constants (cycles, latches, registers, errors).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures, validation).
pub mod config;
/// CPU core (pipeline, stages, predictor, ALU).
pub mod core;
/// Instruction set (opcodes, decode, encode, disassembly).
pub mod isa;
/// Simulation driver and inspector.
pub mod sim;
/// System-on-chip (memory, scheduler, coprocessors).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or parse with `Config::from_json`.
pub use crate::config::Config;
/// Pipelined core; normally driven through `Simulator`.
pub use crate::core::Core;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::{Inspector, Simulator};
/// Performance counters.
pub use crate::stats::SimStats;
