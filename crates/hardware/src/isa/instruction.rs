//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions for VPU instruction words and the decoded
//! representation handed from the decode stage to execute.

use std::fmt;

use crate::common::Register;
use crate::common::constants::{IMM16_MASK, IMM24_MASK, OPCODE_SHIFT};
use crate::isa::opcodes::Opcode;

/// Bit shift for the first register field (bits 23..16).
pub const REG_A_SHIFT: u32 = 16;
/// Bit shift for the second register field (bits 15..8).
pub const REG_B_SHIFT: u32 = 8;
/// Bit mask for a register field.
pub const REG_MASK: u32 = 0xFF;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode byte (bits 31..24).
    fn opcode_byte(&self) -> u8;

    /// Extracts the first register field (bits 23..16).
    fn reg_a(&self) -> u8;

    /// Extracts the second register field (bits 15..8).
    fn reg_b(&self) -> u8;

    /// Extracts the 16-bit immediate (bits 15..0), zero-extended.
    fn imm16(&self) -> u32;

    /// Extracts the 24-bit immediate or label (bits 23..0), zero-extended.
    fn imm24(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode_byte(&self) -> u8 {
        (self >> OPCODE_SHIFT) as u8
    }

    #[inline(always)]
    fn reg_a(&self) -> u8 {
        ((self >> REG_A_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn reg_b(&self) -> u8 {
        ((self >> REG_B_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        self & IMM16_MASK
    }

    #[inline(always)]
    fn imm24(&self) -> u32 {
        self & IMM24_MASK
    }
}

/// A source operand of a decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operand {
    /// Operand slot unused.
    #[default]
    None,
    /// Immediate value.
    Imm(u32),
    /// Register whose value is resolved in execute.
    Reg(Register),
    /// Branch target byte address.
    Label(u32),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Imm(v) => write!(f, "#{v}"),
            Self::Reg(r) => write!(f, "{r}"),
            Self::Label(addr) => write!(f, "@{addr:#x}"),
        }
    }
}

/// Fully decoded instruction.
///
/// `dst` is `Register::Null` when the instruction produces no register result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The raw instruction word.
    pub raw: u32,
    /// Operation.
    pub opcode: Opcode,
    /// Destination register, `Null` for none.
    pub dst: Register,
    /// First source operand.
    pub src0: Operand,
    /// Second source operand.
    pub src1: Operand,
}

impl Decoded {
    /// Decoded form of the segment-end sentinel: a halt with no destination.
    pub const fn segment_end(raw: u32) -> Self {
        Self {
            raw,
            opcode: Opcode::HLT,
            dst: Register::Null,
            src0: Operand::None,
            src1: Operand::None,
        }
    }
}
