//! Error definitions.
//!
//! This module defines the recoverable error types of the simulator. It provides:
//! 1. **Decode Errors:** Malformed instruction words reported by the decoder.
//! 2. **Configuration Errors:** JSON parse failures and rule violations in a `Config`.
//! 3. **Simulation Errors:** Failures of the top-level driver (bad setup, cycle budget exhausted).
//!
//! Contract violations inside a running simulation (stale latch entries, misaligned
//! block accesses, outstanding-count underflow) are not represented here: they abort
//! the simulation with a panic naming the offending address, opcode or cycle.

use thiserror::Error;

/// Reasons an instruction word cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The opcode byte does not name an instruction.
    #[error("unknown opcode {opcode:#04x} in word {word:#010x}")]
    UnknownOpcode {
        /// Raw instruction word.
        word: u32,
        /// Opcode byte extracted from the word.
        opcode: u8,
    },

    /// A register field names a register that does not exist or cannot be an operand.
    #[error("illegal register index {index} in word {word:#010x}")]
    IllegalRegister {
        /// Raw instruction word.
        word: u32,
        /// Offending register index.
        index: u8,
    },

    /// A branch label is not instruction-aligned.
    #[error("misaligned label target {target:#x} in word {word:#010x}")]
    MisalignedLabel {
        /// Raw instruction word.
        word: u32,
        /// Offending target address.
        target: u32,
    },

    /// Fetch reached an address with no instruction word in memory.
    #[error("instruction fetch at {pc:#x} lies outside memory")]
    FetchOutsideMemory {
        /// Address of the missing word.
        pc: u32,
    },
}

/// Errors produced while building or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be deserialized.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value violates a structural rule.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors returned by the top-level simulator driver.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The run did not finish within the configured cycle budget.
    #[error("simulation did not finish within {limit} cycles")]
    CycleLimit {
        /// The exhausted cycle budget.
        limit: u64,
    },

    /// A program image does not fit in memory at the requested address.
    #[error("program of {words} words does not fit in memory at {addr:#x}")]
    ProgramTooLarge {
        /// Requested load address.
        addr: u32,
        /// Number of instruction words.
        words: usize,
    },
}
