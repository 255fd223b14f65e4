//! Instruction word encoders, one per operand layout.
//!
//! Immediates and labels are truncated to their field width.

use crate::common::Register;
use crate::common::constants::{IMM16_MASK, IMM24_MASK, OPCODE_SHIFT};
use crate::isa::instruction::{REG_A_SHIFT, REG_B_SHIFT};
use crate::isa::opcodes::Opcode;

#[inline]
const fn op(opcode: Opcode) -> u32 {
    (opcode.byte() as u32) << OPCODE_SHIFT
}

/// Encodes an instruction without operands.
pub const fn none(opcode: Opcode) -> u32 {
    op(opcode)
}

/// Encodes a 24-bit immediate instruction.
pub const fn i24(opcode: Opcode, imm: u32) -> u32 {
    op(opcode) | (imm & IMM24_MASK)
}

/// Encodes a single-register instruction.
pub const fn r(opcode: Opcode, reg: Register) -> u32 {
    op(opcode) | ((reg as u32) << REG_A_SHIFT)
}

/// Encodes a register plus 16-bit immediate instruction.
pub const fn ri16(opcode: Opcode, reg: Register, imm: u32) -> u32 {
    r(opcode, reg) | (imm & IMM16_MASK)
}

/// Encodes a register-register instruction.
pub const fn rr(opcode: Opcode, a: Register, b: Register) -> u32 {
    r(opcode, a) | ((b as u32) << REG_B_SHIFT)
}

/// Encodes a branch to the byte address `target`.
pub const fn label(opcode: Opcode, target: u32) -> u32 {
    op(opcode) | (target & IMM24_MASK)
}
