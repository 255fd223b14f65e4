//! Pipeline vs. Reference Interpreter.
//!
//! Random coprocessor-free programs with forward branches must leave the
//! pipelined core in the same architectural state as the sequential
//! interpreter: registers (including the PC), the `C` flag, and the number
//! of retired instructions.

use proptest::prelude::*;
use vpusim_core::common::{Flag, Register};
use vpusim_core::common::constants::INSTRUCTION_SIZE;
use vpusim_core::isa::{Opcode, encode};

use crate::common::harness::TestContext;
use crate::common::reference::run_reference;

/// One generated instruction; branch targets are resolved by `assemble`.
#[derive(Debug, Clone)]
enum Gen {
    MovAcc(u32),
    AddAcc(u32),
    Ri16(Opcode, Register, u32),
    Rr(Opcode, Register, Register),
    Branch(Opcode, usize),
    Nop,
}

fn register() -> impl Strategy<Value = Register> {
    prop::sample::select(vec![
        Register::Null,
        Register::Acc,
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R7,
        Register::R13,
    ])
}

fn instruction() -> impl Strategy<Value = Gen> {
    let ri16 = prop::sample::select(vec![
        Opcode::MOV_R_I16,
        Opcode::ADD_R_I16,
        Opcode::LSL_R_I16,
        Opcode::LSR_R_I16,
        Opcode::ASL_R_I16,
        Opcode::ASR_R_I16,
        Opcode::CMP_EQ_R_I16,
        Opcode::CMP_LT_R_I16,
    ]);
    let rr = prop::sample::select(vec![Opcode::MOV_R_R, Opcode::ADD_R_R, Opcode::CMP_EQ_R_R]);
    let branch = prop::sample::select(vec![Opcode::JMP_L, Opcode::BRC_L, Opcode::BRNC_L]);
    prop_oneof![
        1 => (0u32..0x100).prop_map(Gen::MovAcc),
        1 => (0u32..0x100).prop_map(Gen::AddAcc),
        3 => (ri16, register(), 0u32..40).prop_map(|(op, r, imm)| Gen::Ri16(op, r, imm)),
        2 => (rr, register(), register()).prop_map(|(op, a, b)| Gen::Rr(op, a, b)),
        2 => (branch, any::<usize>()).prop_map(|(op, skip)| Gen::Branch(op, skip)),
        1 => Just(Gen::Nop),
    ]
}

/// Encodes the program and appends the final `HLT`; every branch jumps
/// strictly forward, at most to the `HLT`.
fn assemble(body: &[Gen]) -> Vec<u32> {
    let hlt = body.len();
    let mut words: Vec<u32> = body
        .iter()
        .enumerate()
        .map(|(i, g)| match *g {
            Gen::MovAcc(imm) => encode::i24(Opcode::MOV_I24, imm),
            Gen::AddAcc(imm) => encode::i24(Opcode::ADD_I24, imm),
            Gen::Ri16(op, r, imm) => encode::ri16(op, r, imm),
            Gen::Rr(op, a, b) => encode::rr(op, a, b),
            Gen::Branch(op, skip) => {
                let target = i + 1 + skip % (hlt - i);
                encode::label(op, target as u32 * INSTRUCTION_SIZE)
            }
            Gen::Nop => encode::none(Opcode::NOP),
        })
        .collect();
    words.push(encode::none(Opcode::HLT));
    words
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn pipeline_matches_sequential_interpreter(body in prop::collection::vec(instruction(), 1..24)) {
        let program = assemble(&body);
        let expected = run_reference(0, &program, program.len() + 1)
            .expect("forward-only programs terminate");

        let mut ctx = TestContext::new().load_program(0, &program);
        ctx.run_until_halt();
        let view = ctx.inspect();

        prop_assert_eq!(view.registers(), expected.regs.as_array());
        prop_assert_eq!(view.flag(Flag::C), expected.flags.get(Flag::C));
        prop_assert_eq!(view.stats().instructions_retired, expected.steps as u64 + 1);
    }
}
