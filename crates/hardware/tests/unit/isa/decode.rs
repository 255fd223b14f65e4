//! Instruction Decode Properties: Full Opcode Coverage.
//!
//! Verifies that `decode()` maps the fields of every layout onto the right
//! destination and source operands, and rejects malformed words.
//!
//! # Coverage Matrix
//!
//! - None:  NOP, HLT, P_DMA_CPY, P_BLI_CLR, P_SCH_FNC
//! - I24:   MOV_I24, ADD_I24
//! - R:     P_DMA_*_R, P_BLI_COL_R
//! - RI16:  MOV/ADD/shift/compare register-immediate forms
//! - RR:    MOV_R_R, ADD_R_R, CMP_EQ_R_R, P_BLI_PIX_R_R
//! - Label: JMP_L, BRC_L, BRNC_L

use proptest::prelude::*;
use vpusim_core::common::constants::{IMM16_MASK, IMM24_MASK};
use vpusim_core::common::{DecodeError, Register};
use vpusim_core::isa::instruction::InstructionBits;
use vpusim_core::isa::{Layout, Opcode, Operand, decode, encode};

/// Registers that may appear in an operand field.
fn operand_register() -> impl Strategy<Value = Register> {
    prop::sample::select(
        Register::ALL
            .into_iter()
            .filter(|r| *r != Register::Pc)
            .collect::<Vec<_>>(),
    )
}

fn opcode_with(layout: Layout) -> impl Strategy<Value = Opcode> {
    prop::sample::select(
        Opcode::ALL
            .into_iter()
            .filter(|op| op.layout() == layout)
            .collect::<Vec<_>>(),
    )
}

// ══════════════════════════════════════════════════════════
// 1. Field extraction
// ══════════════════════════════════════════════════════════

#[test]
fn field_extraction() {
    let word: u32 = 0x15_03_04_99;
    assert_eq!(word.opcode_byte(), 0x15);
    assert_eq!(word.reg_a(), 0x03);
    assert_eq!(word.reg_b(), 0x04);
    assert_eq!(word.imm16(), 0x0499);
    assert_eq!(word.imm24(), 0x03_0499);
}

// ══════════════════════════════════════════════════════════
// 2. Per-layout operand mapping
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn i24_forms_target_the_accumulator(imm in 0u32..=IMM24_MASK) {
        let mov = decode(encode::i24(Opcode::MOV_I24, imm)).unwrap();
        prop_assert_eq!(mov.dst, Register::Acc);
        prop_assert_eq!(mov.src0, Operand::Imm(imm));

        let add = decode(encode::i24(Opcode::ADD_I24, imm)).unwrap();
        prop_assert_eq!(add.dst, Register::Acc);
        prop_assert_eq!(add.src0, Operand::Reg(Register::Acc));
        prop_assert_eq!(add.src1, Operand::Imm(imm));
    }

    #[test]
    fn r_forms_read_their_register(op in opcode_with(Layout::R), reg in operand_register()) {
        let d = decode(encode::r(op, reg)).unwrap();
        prop_assert_eq!(d.opcode, op);
        prop_assert_eq!(d.dst, Register::Null);
        prop_assert_eq!(d.src0, Operand::Reg(reg));
        prop_assert_eq!(d.src1, Operand::None);
    }

    #[test]
    fn ri16_forms(
        op in opcode_with(Layout::RI16),
        reg in operand_register(),
        imm in 0u32..=IMM16_MASK,
    ) {
        let d = decode(encode::ri16(op, reg, imm)).unwrap();
        match op {
            Opcode::MOV_R_I16 => {
                prop_assert_eq!(d.dst, reg);
                prop_assert_eq!(d.src0, Operand::Imm(imm));
            }
            Opcode::CMP_EQ_R_I16 | Opcode::CMP_LT_R_I16 => {
                prop_assert_eq!(d.dst, Register::Null);
                prop_assert_eq!(d.src0, Operand::Reg(reg));
                prop_assert_eq!(d.src1, Operand::Imm(imm));
            }
            _ => {
                prop_assert_eq!(d.dst, reg);
                prop_assert_eq!(d.src0, Operand::Reg(reg));
                prop_assert_eq!(d.src1, Operand::Imm(imm));
            }
        }
    }

    #[test]
    fn rr_forms(
        op in opcode_with(Layout::RR),
        a in operand_register(),
        b in operand_register(),
    ) {
        let d = decode(encode::rr(op, a, b)).unwrap();
        match op {
            Opcode::MOV_R_R => {
                prop_assert_eq!(d.dst, a);
                prop_assert_eq!(d.src0, Operand::Reg(b));
            }
            Opcode::ADD_R_R => {
                prop_assert_eq!(d.dst, a);
                prop_assert_eq!((d.src0, d.src1), (Operand::Reg(a), Operand::Reg(b)));
            }
            _ => {
                prop_assert_eq!(d.dst, Register::Null);
                prop_assert_eq!((d.src0, d.src1), (Operand::Reg(a), Operand::Reg(b)));
            }
        }
    }

    #[test]
    fn aligned_labels_decode(op in opcode_with(Layout::Label), slot in 0u32..(1 << 22)) {
        let target = slot * 4;
        let d = decode(encode::label(op, target)).unwrap();
        prop_assert_eq!(d.src0, Operand::Label(target));
        prop_assert_eq!(d.dst, Register::Null);
    }

    #[test]
    fn decode_never_panics(word in any::<u32>()) {
        let _ = decode(word);
    }
}

// ══════════════════════════════════════════════════════════
// 3. Malformed words
// ══════════════════════════════════════════════════════════

#[test]
fn register_index_past_the_file_is_illegal() {
    // reg_a = 16 on ADD_R_I16
    let word = 0x13_10_0000;
    assert_eq!(
        decode(word),
        Err(DecodeError::IllegalRegister { word, index: 16 })
    );
}

#[test]
fn pc_as_second_register_is_illegal() {
    let word = encode::rr(Opcode::ADD_R_R, Register::R1, Register::Pc);
    assert_eq!(
        decode(word),
        Err(DecodeError::IllegalRegister { word, index: 2 })
    );
}

#[test]
fn operand_free_forms_ignore_low_bits() {
    let d = decode(encode::none(Opcode::P_SCH_FNC) | 0x00AB_CDEF).unwrap();
    assert_eq!(d.opcode, Opcode::P_SCH_FNC);
    assert_eq!(d.src0, Operand::None);
}

#[test]
fn decode_error_messages_name_the_word() {
    let err = decode(0xEE00_0000).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown opcode 0xee in word 0xee000000"
    );
}
