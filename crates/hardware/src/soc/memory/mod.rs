//! Physical System Memory.
//!
//! This module implements the byte-addressable store shared by the core and the
//! coprocessors. It provides:
//! 1. **Word Access:** 32-bit little-endian reads and writes, implicitly aligned down to 4 bytes.
//! 2. **Block Access:** Fixed-width transfers of [`MEM_ACCESS_WIDTH`] bytes that must be
//!    block-aligned.
//! 3. **Bulk Access:** Byte-slice reads and writes used for program loading and inspection.
//!
//! Every access out of range, and every misaligned block access, is a contract
//! violation and panics with the offending address.

use crate::common::constants::{MEM_ACCESS_WIDTH, WORD_ALIGN_MASK, WORD_BYTES};

/// One block of memory.
pub type Block = [u8; MEM_ACCESS_WIDTH];

/// System Memory structure.
pub struct Memory {
    data: Vec<u8>,
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("size", &self.data.len()).finish()
    }
}

impl Memory {
    /// Creates a zero-filled memory of `size` bytes.
    ///
    /// # Arguments
    ///
    /// * `size` - Size in bytes; a nonzero multiple of [`MEM_ACCESS_WIDTH`].
    pub fn new(size: usize) -> Self {
        assert!(
            size > 0 && size % MEM_ACCESS_WIDTH == 0 && u32::try_from(size - 1).is_ok(),
            "memory size {size:#x} must be a nonzero multiple of {MEM_ACCESS_WIDTH} addressable in 32 bits"
        );
        Self {
            data: vec![0; size],
        }
    }

    /// Size of the memory in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns the byte range `[addr, addr + len)`, panicking if it leaves memory.
    #[track_caller]
    fn range(&self, addr: u32, len: usize) -> std::ops::Range<usize> {
        let start = addr as usize;
        match start.checked_add(len) {
            Some(end) if end <= self.data.len() => start..end,
            _ => panic!(
                "memory access of {len} bytes at {addr:#x} exceeds memory size {:#x}",
                self.data.len()
            ),
        }
    }

    /// Reads a little-endian word. The address is aligned down to 4 bytes.
    #[track_caller]
    pub fn read_word(&self, addr: u32) -> u32 {
        let r = self.range(addr & WORD_ALIGN_MASK, WORD_BYTES as usize);
        let mut bytes = [0; WORD_BYTES as usize];
        bytes.copy_from_slice(&self.data[r]);
        u32::from_le_bytes(bytes)
    }

    /// Writes a little-endian word. The address is aligned down to 4 bytes.
    #[track_caller]
    pub fn write_word(&mut self, addr: u32, val: u32) {
        let r = self.range(addr & WORD_ALIGN_MASK, WORD_BYTES as usize);
        self.data[r].copy_from_slice(&val.to_le_bytes());
    }

    #[track_caller]
    fn check_block_aligned(addr: u32) {
        assert!(
            addr as usize % MEM_ACCESS_WIDTH == 0,
            "block access at {addr:#x} is not {MEM_ACCESS_WIDTH}-byte aligned"
        );
    }

    /// Reads one block.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not block-aligned or the block leaves memory.
    #[track_caller]
    pub fn read_block(&self, addr: u32) -> Block {
        Self::check_block_aligned(addr);
        let r = self.range(addr, MEM_ACCESS_WIDTH);
        let mut block = [0; MEM_ACCESS_WIDTH];
        block.copy_from_slice(&self.data[r]);
        block
    }

    /// Writes one block.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not block-aligned or the block leaves memory.
    #[track_caller]
    pub fn write_block(&mut self, addr: u32, block: &Block) {
        Self::check_block_aligned(addr);
        let r = self.range(addr, MEM_ACCESS_WIDTH);
        self.data[r].copy_from_slice(block);
    }

    /// Borrows `len` bytes starting at `addr`.
    #[track_caller]
    pub fn bytes(&self, addr: u32, len: usize) -> &[u8] {
        let r = self.range(addr, len);
        &self.data[r]
    }

    /// Copies `data` into memory starting at `addr`.
    #[track_caller]
    pub fn write_bytes(&mut self, addr: u32, data: &[u8]) {
        let r = self.range(addr, data.len());
        self.data[r].copy_from_slice(data);
    }

    /// Returns `true` if `[addr, addr + len)` lies inside memory.
    pub fn contains(&self, addr: u32, len: usize) -> bool {
        (addr as usize)
            .checked_add(len)
            .is_some_and(|end| end <= self.data.len())
    }
}
