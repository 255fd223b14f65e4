//! Branch Target Buffer (BTB).
//!
//! Direct-mapped table of resolved control-flow targets, indexed like the BHT.
//! Each slot remembers the full address of the instruction that filled it, so
//! two instructions sharing an index never see each other's target.

/// Target recorded for one control-flow instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    pc: u32,
    target: u32,
}

/// Branch Target Buffer structure.
#[derive(Debug)]
pub struct Btb {
    slots: Box<[Option<Slot>]>,
    mask: usize,
}

impl Btb {
    /// Creates an empty BTB.
    ///
    /// # Arguments
    ///
    /// * `size` - Number of slots; a power of two.
    pub fn new(size: usize) -> Self {
        assert!(size.is_power_of_two(), "BTB size {size} is not a power of two");
        Self {
            slots: vec![None; size].into_boxed_slice(),
            mask: size - 1,
        }
    }

    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & self.mask
    }

    /// Target recorded for the instruction at `pc`, if its slot holds one.
    pub fn lookup(&self, pc: u32) -> Option<u32> {
        self.slots[self.index(pc)]
            .filter(|slot| slot.pc == pc)
            .map(|slot| slot.target)
    }

    /// Records `target` for the instruction at `pc`, evicting whatever shared its slot.
    pub fn update(&mut self, pc: u32, target: u32) {
        let idx = self.index(pc);
        self.slots[idx] = Some(Slot { pc, target });
    }
}
