//! ALU shift operations.
//!
//! Shift amounts are masked to 5 bits (0–31). Arithmetic and logical left
//! shifts are identical; arithmetic right shift replicates bit 31.

use super::AluOp;

/// Bit mask for the shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - The ALU operation to perform (must be a shift variant).
/// * `a`  - The value to be shifted.
/// * `b`  - The shift amount (low 5 bits used).
///
/// # Returns
///
/// The shifted value. Returns `0` for non-shift operations.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let sh = b & SHAMT_MASK;
    match op {
        AluOp::Lsl | AluOp::Asl => a.wrapping_shl(sh),
        AluOp::Lsr => a.wrapping_shr(sh),
        AluOp::Asr => ((a as i32) >> sh) as u32,
        _ => 0,
    }
}
