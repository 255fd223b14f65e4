//! VPU Instruction Decoder.
//!
//! Turns a 32-bit instruction word into a [`Decoded`] record by looking up the
//! opcode's layout and mapping its fields onto a destination register and up to
//! two source operands:
//! 1. **Immediate forms:** the modified register is both destination and first source.
//! 2. **Move forms:** the destination is written from a single source.
//! 3. **Compare, branch and pipe forms:** no destination register.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::{DecodeError, Register};
use crate::isa::instruction::{Decoded, InstructionBits, Operand};
use crate::isa::opcodes::{Layout, Opcode};

/// Decodes a raw instruction word.
///
/// The segment-end sentinel is not handled here; callers check for it first.
///
/// # Arguments
///
/// * `word` - The raw 32-bit instruction encoding.
///
/// # Returns
///
/// The decoded instruction, or a [`DecodeError`] describing the malformed field.
pub fn decode(word: u32) -> Result<Decoded, DecodeError> {
    let opcode_byte = word.opcode_byte();
    let opcode = Opcode::from_byte(opcode_byte).ok_or(DecodeError::UnknownOpcode {
        word,
        opcode: opcode_byte,
    })?;

    let (dst, src0, src1) = match opcode.layout() {
        Layout::None => (Register::Null, Operand::None, Operand::None),
        Layout::I24 => {
            let imm = Operand::Imm(word.imm24());
            match opcode {
                Opcode::ADD_I24 => (Register::Acc, Operand::Reg(Register::Acc), imm),
                _ => (Register::Acc, imm, Operand::None),
            }
        }
        Layout::R => {
            let r = operand_register(word, word.reg_a())?;
            (Register::Null, Operand::Reg(r), Operand::None)
        }
        Layout::RI16 => {
            let r = operand_register(word, word.reg_a())?;
            let imm = Operand::Imm(word.imm16());
            match opcode {
                Opcode::MOV_R_I16 => (r, imm, Operand::None),
                Opcode::CMP_EQ_R_I16 | Opcode::CMP_LT_R_I16 => {
                    (Register::Null, Operand::Reg(r), imm)
                }
                _ => (r, Operand::Reg(r), imm),
            }
        }
        Layout::RR => {
            let a = operand_register(word, word.reg_a())?;
            let b = operand_register(word, word.reg_b())?;
            match opcode {
                Opcode::MOV_R_R => (a, Operand::Reg(b), Operand::None),
                Opcode::ADD_R_R => (a, Operand::Reg(a), Operand::Reg(b)),
                _ => (Register::Null, Operand::Reg(a), Operand::Reg(b)),
            }
        }
        Layout::Label => {
            let target = word.imm24();
            if target % INSTRUCTION_SIZE != 0 {
                return Err(DecodeError::MisalignedLabel { word, target });
            }
            (Register::Null, Operand::Label(target), Operand::None)
        }
    };

    Ok(Decoded {
        raw: word,
        opcode,
        dst,
        src0,
        src1,
    })
}

/// Resolves a register field, rejecting out-of-range indices and `Pc`.
fn operand_register(word: u32, index: u8) -> Result<Register, DecodeError> {
    match Register::from_index(index) {
        Some(Register::Pc) | None => Err(DecodeError::IllegalRegister { word, index }),
        Some(r) => Ok(r),
    }
}
