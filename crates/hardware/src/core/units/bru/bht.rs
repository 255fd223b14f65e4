//! Branch History Table (BHT).
//!
//! One taken/not-taken bit per entry, direct-mapped by instruction address.
//! Every entry starts as "not taken".

/// Branch History Table structure.
#[derive(Debug)]
pub struct Bht {
    bits: Vec<bool>,
    mask: usize,
}

impl Bht {
    /// Creates a table of `size` entries. `size` must be a power of 2.
    pub fn new(size: usize) -> Self {
        assert!(size.is_power_of_two(), "BHT size {size} is not a power of two");
        Self {
            bits: vec![false; size],
            mask: size - 1,
        }
    }

    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & self.mask
    }

    /// Returns `true` if the entry for `pc` predicts taken.
    pub fn taken(&self, pc: u32) -> bool {
        self.bits[self.index(pc)]
    }

    /// Sets or clears the entry for `pc`.
    pub fn set(&mut self, pc: u32, taken: bool) {
        let idx = self.index(pc);
        self.bits[idx] = taken;
    }
}
