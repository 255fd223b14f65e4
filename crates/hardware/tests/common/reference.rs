//! Sequential reference interpreter.
//!
//! Executes one instruction at a time with no pipeline, prediction or
//! forwarding. Pipe instructions are ignored, so it is only an oracle for
//! coprocessor-free programs.

use vpusim_core::common::constants::{INSTRUCTION_SIZE, SEGMENT_END};
use vpusim_core::common::{Flag, Flags, Register, RegisterFile};
use vpusim_core::core::units::alu::{Alu, AluOp};
use vpusim_core::isa::{Opcode, Operand, decode};

/// Final architectural state of a reference run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceState {
    pub regs: RegisterFile,
    pub flags: Flags,
    pub steps: usize,
}

/// Runs `program` loaded at `base` until `HLT` or segment end.
///
/// Returns `None` if the step budget is exhausted.
pub fn run_reference(base: u32, program: &[u32], max_steps: usize) -> Option<ReferenceState> {
    let mut regs = RegisterFile::new();
    let mut flags = Flags::new();
    regs.write(Register::Pc, base);

    for steps in 0..max_steps {
        let pc = regs.pc();
        let index = ((pc - base) / INSTRUCTION_SIZE) as usize;
        let word = program.get(index).copied().unwrap_or(0);
        if word == SEGMENT_END {
            return Some(ReferenceState { regs, flags, steps });
        }
        let inst = decode(word).expect("reference program must decode");

        let read = |op: Operand, regs: &RegisterFile| match op {
            Operand::None => 0,
            Operand::Imm(v) | Operand::Label(v) => v,
            Operand::Reg(r) => regs.read(r),
        };
        let a = read(inst.src0, &regs);
        let b = read(inst.src1, &regs);
        let fall_through = pc + INSTRUCTION_SIZE;

        let next = match inst.opcode {
            Opcode::HLT => return Some(ReferenceState { regs, flags, steps }),
            Opcode::JMP_L => a,
            Opcode::BRC_L => {
                if flags.get(Flag::C) {
                    a
                } else {
                    fall_through
                }
            }
            Opcode::BRNC_L => {
                if flags.get(Flag::C) {
                    fall_through
                } else {
                    a
                }
            }
            op => {
                if let Some(alu_op) = AluOp::from_opcode(op) {
                    let result = Alu::execute(alu_op, a, b);
                    if alu_op.is_compare() {
                        flags.set(Flag::C, result != 0);
                    } else {
                        regs.write(inst.dst, result);
                    }
                }
                fall_through
            }
        };
        regs.write(Register::Pc, next);
    }
    None
}
