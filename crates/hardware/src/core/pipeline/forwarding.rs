//! Execute result forwarding table.
//!
//! Holds register results produced by execute that writeback has not committed
//! yet. Each published value is stamped with a monotonically increasing
//! generation; writeback releases a register only when the committing result
//! carries the generation currently held, so an older commit never clears a
//! newer in-flight value even when both values are equal.

use crate::common::{REGISTER_COUNT, Register};

/// A value published by execute and not yet committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct HeldValue {
    value: u32,
    generation: u64,
}

/// Per-register table of in-flight results.
#[derive(Clone, Debug, Default)]
pub struct ForwardingTable {
    held: [Option<HeldValue>; REGISTER_COUNT],
    next_generation: u64,
}

impl ForwardingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `value` for `reg` and returns the generation assigned to it.
    /// Publishing to `Null` holds nothing but still consumes a generation.
    pub fn publish(&mut self, reg: Register, value: u32) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        if reg != Register::Null {
            self.held[reg.index()] = Some(HeldValue { value, generation });
        }
        generation
    }

    /// Returns the in-flight value for `reg`, if any.
    pub fn lookup(&self, reg: Register) -> Option<u32> {
        self.held[reg.index()].map(|h| h.value)
    }

    /// Releases `reg`, but ONLY if the held generation matches.
    pub fn release_if_match(&mut self, reg: Register, generation: u64) {
        let slot = &mut self.held[reg.index()];
        if slot.is_some_and(|h| h.generation == generation) {
            *slot = None;
        }
    }

    /// Returns `true` if `reg` has an in-flight value.
    pub fn is_held(&self, reg: Register) -> bool {
        self.held[reg.index()].is_some()
    }
}
