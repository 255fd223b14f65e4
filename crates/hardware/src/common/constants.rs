//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Memory Constants:** Word and block access widths and their alignment masks.
//! 2. **Instruction Constants:** Instruction size, opcode field position, and the segment-end sentinel.
//! 3. **Framebuffer Constants:** Pixel size and the number of pixels the blitter writes per cycle.

/// Size of a memory word (and of an instruction) in bytes.
pub const WORD_BYTES: u32 = 4;

/// Mask that aligns an address down to a word boundary.
pub const WORD_ALIGN_MASK: u32 = !(WORD_BYTES - 1);

/// Width of a block memory access in bytes.
///
/// Block reads and writes (used by the DMA engine and the blitter) move this many
/// bytes at once and must be aligned to it.
pub const MEM_ACCESS_WIDTH: usize = 64;

/// Mask that aligns an address down to a block boundary.
pub const BLOCK_ALIGN_MASK: u32 = !(MEM_ACCESS_WIDTH as u32 - 1);

/// Size of an instruction in bytes; sequential fetch advances the PC by this amount.
pub const INSTRUCTION_SIZE: u32 = WORD_BYTES;

/// Reserved all-ones word marking the end of a program segment.
pub const SEGMENT_END: u32 = 0xFFFF_FFFF;

/// Bit position of the opcode byte within an instruction word.
pub const OPCODE_SHIFT: u32 = 24;

/// Mask for 24-bit immediates and label addresses.
pub const IMM24_MASK: u32 = 0x00FF_FFFF;

/// Mask for 16-bit immediates.
pub const IMM16_MASK: u32 = 0x0000_FFFF;

/// Bytes per framebuffer pixel (RGBA, one word).
pub const FRAMEBUFFER_PIXEL_BYTES: u32 = 4;

/// Pixels the blitter writes per CLEAR cycle: one block worth.
pub const BLITTER_MAX_PIXELS: u32 = MEM_ACCESS_WIDTH as u32 / FRAMEBUFFER_PIXEL_BYTES;

/// Aligns `addr` down to the start of its block.
#[inline]
pub const fn block_align(addr: u32) -> u32 {
    addr & BLOCK_ALIGN_MASK
}
