//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the VPU opcode table, instruction word field extraction, and the
//! decoder, encoder and disassembler built on them.
//!
//! # Word format
//!
//! * Bits 31..24: opcode byte.
//! * Bits 23..0: operands, laid out per [`opcodes::Layout`].
//! * The all-ones word marks the end of a program segment.

/// Instruction decoding into destination and source operands.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction word encoders.
pub mod encode;

/// Instruction field extraction and the decoded instruction record.
pub mod instruction;

/// Opcode table with per-opcode layout and pipe routing.
pub mod opcodes;

pub use decode::decode;
pub use instruction::{Decoded, Operand};
pub use opcodes::{Layout, Opcode, Pipe};
