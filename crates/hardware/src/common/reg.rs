//! Architectural registers and flags.
//!
//! This module provides the `Register` and `Flag` enumerations together with the
//! storage that holds their committed values:
//! 1. **Register File:** Fixed array of 32-bit values; index 0 (`Null`) is a write sink.
//! 2. **Flags:** Fixed array of booleans written by compare instructions.

use std::fmt;

/// Number of architectural registers, including the reserved `Null` slot.
pub const REGISTER_COUNT: usize = 16;

/// Number of architectural flags.
pub const FLAG_COUNT: usize = 1;

/// Architectural register names.
///
/// `Null` (index 0) is reserved: it reads as zero and writes to it are discarded,
/// which lets it double as the "no destination" marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Register {
    /// Reserved sentinel; never holds a value.
    #[default]
    Null = 0,
    /// General accumulator.
    Acc = 1,
    /// Program counter (fetch address).
    Pc = 2,
    /// General register 1.
    R1 = 3,
    /// General register 2.
    R2 = 4,
    /// General register 3.
    R3 = 5,
    /// General register 4.
    R4 = 6,
    /// General register 5.
    R5 = 7,
    /// General register 6.
    R6 = 8,
    /// General register 7.
    R7 = 9,
    /// General register 8.
    R8 = 10,
    /// General register 9.
    R9 = 11,
    /// General register 10.
    R10 = 12,
    /// General register 11.
    R11 = 13,
    /// General register 12.
    R12 = 14,
    /// General register 13.
    R13 = 15,
}

impl Register {
    /// All registers in index order.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::Null,
        Self::Acc,
        Self::Pc,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::R13,
    ];

    /// Looks up a register by its encoded index.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Encoded index of the register.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Assembly name of the register.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Acc => "ACC",
            Self::Pc => "PC",
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::R4 => "R4",
            Self::R5 => "R5",
            Self::R6 => "R6",
            Self::R7 => "R7",
            Self::R8 => "R8",
            Self::R9 => "R9",
            Self::R10 => "R10",
            Self::R11 => "R11",
            Self::R12 => "R12",
            Self::R13 => "R13",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Architectural flag names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Flag {
    /// Compare result, read by conditional branches.
    C = 0,
}

impl Flag {
    /// Encoded index of the flag.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Committed register values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterFile {
    regs: [u32; REGISTER_COUNT],
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub const fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
        }
    }

    /// Reads a register. `Null` always reads zero.
    pub const fn read(&self, reg: Register) -> u32 {
        self.regs[reg.index()]
    }

    /// Writes a register. Writes to `Null` are ignored.
    pub const fn write(&mut self, reg: Register, val: u32) {
        if !matches!(reg, Register::Null) {
            self.regs[reg.index()] = val;
        }
    }

    /// Current program counter.
    pub const fn pc(&self) -> u32 {
        self.read(Register::Pc)
    }

    /// Raw register array in index order.
    pub const fn as_array(&self) -> &[u32; REGISTER_COUNT] {
        &self.regs
    }
}

/// Committed flag values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Flags {
    bits: [bool; FLAG_COUNT],
}

impl Flags {
    /// Creates a flag set with every flag clear.
    pub const fn new() -> Self {
        Self {
            bits: [false; FLAG_COUNT],
        }
    }

    /// Reads a flag.
    pub const fn get(&self, flag: Flag) -> bool {
        self.bits[flag.index()]
    }

    /// Writes a flag.
    pub const fn set(&mut self, flag: Flag, val: bool) {
        self.bits[flag.index()] = val;
    }
}
