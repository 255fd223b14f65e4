//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. All
//! operations work on 32-bit unsigned operands with wrapping arithmetic.
//!
//! Operations are organized by category:
//! - [`shifts`]: Lsl, Lsr, Asl, Asr
//! - this module: Add, Mov, and the compare operations that produce the `C` flag

/// Shift operations (lsl, lsr, asl, asr).
pub mod shifts;

use crate::isa::Opcode;

/// Integer ALU operation selected by the execute stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    /// `a + b`, wrapping.
    Add,
    /// `a`.
    Mov,
    /// Logical shift left.
    Lsl,
    /// Logical shift right.
    Lsr,
    /// Arithmetic shift left.
    Asl,
    /// Arithmetic shift right.
    Asr,
    /// `a == b`.
    CmpEq,
    /// `a < b`, unsigned.
    CmpLt,
}

impl AluOp {
    /// Maps a register-producing or flag-producing opcode to its ALU operation.
    ///
    /// Returns `None` for opcodes that do not use the ALU (control flow, pipe,
    /// `NOP`, `HLT`).
    pub const fn from_opcode(opcode: Opcode) -> Option<Self> {
        Some(match opcode {
            Opcode::ADD_I24 | Opcode::ADD_R_I16 | Opcode::ADD_R_R => Self::Add,
            Opcode::MOV_I24 | Opcode::MOV_R_I16 | Opcode::MOV_R_R => Self::Mov,
            Opcode::LSL_R_I16 => Self::Lsl,
            Opcode::LSR_R_I16 => Self::Lsr,
            Opcode::ASL_R_I16 => Self::Asl,
            Opcode::ASR_R_I16 => Self::Asr,
            Opcode::CMP_EQ_R_I16 | Opcode::CMP_EQ_R_R => Self::CmpEq,
            Opcode::CMP_LT_R_I16 => Self::CmpLt,
            _ => return None,
        })
    }

    /// Returns `true` if the operation writes the `C` flag instead of a register.
    pub const fn is_compare(self) -> bool {
        matches!(self, Self::CmpEq | Self::CmpLt)
    }
}

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (also the shift amount)
    ///
    /// # Returns
    ///
    /// The 32-bit result. Compare operations return `1` for true and `0` for false.
    ///
    /// # Examples
    ///
    /// ```
    /// use vpusim_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, u32::MAX, 2), 1);
    /// assert_eq!(Alu::execute(AluOp::Asr, 0x8000_0000, 4), 0xF800_0000);
    /// assert_eq!(Alu::execute(AluOp::CmpLt, 3, 0xFFFF), 1);
    /// ```
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Mov => a,
            AluOp::Lsl | AluOp::Lsr | AluOp::Asl | AluOp::Asr => shifts::execute(op, a, b),
            AluOp::CmpEq => u32::from(a == b),
            AluOp::CmpLt => u32::from(a < b),
        }
    }
}
