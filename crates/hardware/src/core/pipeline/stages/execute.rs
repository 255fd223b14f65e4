//! Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It performs:
//! 1. **Operand Resolution:** Reads sources from the forwarding table, then the register file.
//! 2. **ALU Execution:** Arithmetic, shifts, moves, and compares (which write the `C` flag).
//! 3. **Branch Resolution:** Computes the actual next PC, trains the predictor and
//!    requests a flush on misprediction.
//! 4. **Coprocessor Submission:** Hands pipe instructions to the scheduler; a refusal
//!    stalls the front of the pipeline and leaves the instruction queued.

use tracing::{debug, trace};

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::{Cycle, Flag, Register};
use crate::core::Core;
use crate::core::pipeline::latches::ExecuteOut;
use crate::core::units::alu::{Alu, AluOp};
use crate::core::units::bru::BranchPredictor;
use crate::isa::{Opcode, Operand};
use crate::soc::scheduler::Scheduler;
use crate::stats::SimStats;

/// Executes the instruction execute stage of the pipeline.
///
/// # Arguments
///
/// * `core` - Mutable reference to the core state
/// * `scheduler` - Coprocessor scheduler receiving pipe instructions
/// * `stats` - Statistics sink
/// * `now` - Current global cycle
///
/// # Panics
///
/// Panics if the instruction at the queue front failed to decode.
pub fn execute_stage(core: &mut Core, scheduler: &mut Scheduler, stats: &mut SimStats, now: Cycle) {
    let Some(entry) = core.decode_q.front_ready(now).copied() else {
        return;
    };
    let inst = entry.inst.unwrap_or_else(|e| {
        panic!("illegal instruction at pc {:#x} in cycle {now}: {e}", entry.pc)
    });

    let a = resolve(core, inst.src0);
    let b = resolve(core, inst.src1);

    if inst.opcode.pipe().is_some() && !scheduler.core_submit(now, inst.opcode, a, b) {
        debug!(
            "[{now}] EX  pc={:#x} {} refused by scheduler, stalling",
            entry.pc, inst.opcode
        );
        core.staged.stall = true;
        stats.scheduler_stalls += 1;
        return;
    }
    let _ = core.decode_q.pop_ready(now);

    let mut value = 0;
    let fall_through = entry.pc.wrapping_add(INSTRUCTION_SIZE);
    let resolved = match inst.opcode {
        Opcode::JMP_L => Some(a),
        Opcode::BRC_L => Some(if core.flags.get(Flag::C) { a } else { fall_through }),
        Opcode::BRNC_L => Some(if core.flags.get(Flag::C) { fall_through } else { a }),
        op => {
            if let Some(alu_op) = AluOp::from_opcode(op) {
                let result = Alu::execute(alu_op, a, b);
                if alu_op.is_compare() {
                    core.flags.set(Flag::C, result != 0);
                } else {
                    value = result;
                }
            }
            None
        }
    };

    if let Some(target) = resolved {
        stats.branch_predictions += 1;
        core.predictor.update(entry.pc, entry.prediction, target);
        if target != entry.prediction.next_pc {
            stats.branch_mispredictions += 1;
            debug!(
                "[{now}] EX  pc={:#x} {} mispredicted {:#x}, redirect to {target:#x}",
                entry.pc, inst.opcode, entry.prediction.next_pc
            );
            core.flush_q.push_next(target, now);
        }
    }

    let generation = core.forwarding.publish(inst.dst, value);
    if inst.dst != Register::Null {
        trace!("[{now}] EX  pc={:#x} {}={value:#x}", entry.pc, inst.dst);
    }
    core.execute_q.push_next(
        ExecuteOut {
            pc: entry.pc,
            opcode: inst.opcode,
            dst: inst.dst,
            value,
            generation,
        },
        now,
    );
}

/// Reads an operand value, preferring an in-flight forwarded result.
fn resolve(core: &Core, operand: Operand) -> u32 {
    match operand {
        Operand::None => 0,
        Operand::Imm(v) | Operand::Label(v) => v,
        Operand::Reg(r) => core
            .forwarding
            .lookup(r)
            .unwrap_or_else(|| core.regs.read(r)),
    }
}
