//! Execution units and functional components.
//!
//! This module contains the core's execution units: the integer ALU and the
//! branch prediction unit.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch prediction unit with BHT and BTB.
pub mod bru;
