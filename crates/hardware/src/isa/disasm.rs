//! Instruction disassembler for debug tracing and diagnostics.

use std::fmt;

use crate::common::Register;
use crate::common::constants::SEGMENT_END;
use crate::isa::decode::decode;
use crate::isa::instruction::{Decoded, InstructionBits, Operand};
use crate::isa::opcodes::Layout;

impl fmt::Display for Decoded {
    /// Prints the operand fields encoded in `raw`, in word order.
    ///
    /// Implicit operands such as the accumulator of the `*_I24` forms are not
    /// part of the encoding and are left out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        let word = self.raw;
        match self.opcode.layout() {
            Layout::None => Ok(()),
            Layout::I24 => write!(f, " {}", Operand::Imm(word.imm24())),
            Layout::Label => write!(f, " {}", Operand::Label(word.imm24())),
            Layout::R => write!(f, " {}", RegField(word.reg_a())),
            Layout::RI16 => write!(
                f,
                " {}, {}",
                RegField(word.reg_a()),
                Operand::Imm(word.imm16())
            ),
            Layout::RR => write!(f, " {}, {}", RegField(word.reg_a()), RegField(word.reg_b())),
        }
    }
}

/// A register field as encoded, printed by name when it names a register.
struct RegField(u8);

impl fmt::Display for RegField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Register::from_index(self.0) {
            Some(r) => write!(f, "{r}"),
            None => write!(f, "r{}", self.0),
        }
    }
}

/// Renders a raw instruction word as assembly text.
///
/// Returns `"<segment end>"` for the sentinel and `"<invalid ...>"` for words that
/// fail to decode.
///
/// # Arguments
///
/// * `word` - The raw 32-bit instruction encoding.
pub fn disassemble(word: u32) -> String {
    if word == SEGMENT_END {
        return "<segment end>".to_string();
    }
    match decode(word) {
        Ok(d) => d.to_string(),
        Err(e) => format!("<invalid: {e}>"),
    }
}
