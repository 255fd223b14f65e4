//! Cycle-tagged latch entries.
//!
//! Every value that crosses a clock boundary (pipeline latches, flush requests,
//! scheduler commands) is wrapped in a [`Defer`] that records the global cycle at
//! which it becomes visible. This module provides:
//! 1. **`Defer<T>`:** A payload tagged with a strictly-future valid cycle.
//! 2. **`LatchQueue<T>`:** A FIFO of deferred entries where only the front is ever inspected.

use std::collections::VecDeque;
use std::collections::vec_deque;

/// Global simulation cycle.
pub type Cycle = u64;

/// A payload that becomes valid at a specific global cycle.
///
/// A `Defer` always targets a cycle after the one in which it was created, so a
/// value produced in cycle `n` can be consumed no earlier than cycle `n + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Defer<T> {
    valid_cycle: Cycle,
    data: T,
}

impl<T> Defer<T> {
    /// Wraps `data` so that it becomes valid on the cycle after `now`.
    pub const fn next(data: T, now: Cycle) -> Self {
        Self {
            valid_cycle: now + 1,
            data,
        }
    }

    /// Wraps `data` so that it becomes valid at `valid_cycle`.
    ///
    /// Panics if `valid_cycle` is not strictly after `now`.
    #[track_caller]
    pub fn at(data: T, now: Cycle, valid_cycle: Cycle) -> Self {
        assert!(
            valid_cycle > now,
            "deferred entry created at cycle {now} must target a later cycle, got {valid_cycle}"
        );
        Self { valid_cycle, data }
    }

    /// Returns `true` exactly when the entry is valid in cycle `now`.
    ///
    /// Panics if the entry's cycle has already passed: acting on a stale entry
    /// means a stage skipped a cycle it was required to handle.
    #[track_caller]
    pub fn can_run(&self, now: Cycle) -> bool {
        assert!(
            self.valid_cycle >= now,
            "deferred entry valid at cycle {} inspected at cycle {now}",
            self.valid_cycle
        );
        self.valid_cycle == now
    }

    /// Moves the valid cycle one tick later.
    pub const fn postpone(&mut self) {
        self.valid_cycle += 1;
    }

    /// Cycle at which the entry becomes valid.
    pub const fn valid_cycle(&self) -> Cycle {
        self.valid_cycle
    }

    /// Borrows the payload.
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Unwraps the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// FIFO of [`Defer`] entries.
///
/// Only the front entry is tested for readiness: an entry queued behind a
/// not-yet-valid front never overtakes it.
#[derive(Clone, Debug)]
pub struct LatchQueue<T> {
    entries: VecDeque<Defer<T>>,
}

impl<T> Default for LatchQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatchQueue<T> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Appends `data`, valid on the cycle after `now`.
    pub fn push_next(&mut self, data: T, now: Cycle) {
        self.entries.push_back(Defer::next(data, now));
    }

    /// Appends an already-tagged entry.
    pub fn push(&mut self, entry: Defer<T>) {
        self.entries.push_back(entry);
    }

    /// Returns the front payload if it is valid in cycle `now`.
    #[track_caller]
    pub fn front_ready(&self, now: Cycle) -> Option<&T> {
        self.entries
            .front()
            .filter(|entry| entry.can_run(now))
            .map(Defer::data)
    }

    /// Pops and returns the front payload if it is valid in cycle `now`.
    #[track_caller]
    pub fn pop_ready(&mut self, now: Cycle) -> Option<T> {
        if self.front_ready(now).is_some() {
            self.entries.pop_front().map(Defer::into_inner)
        } else {
            None
        }
    }

    /// Delays every queued entry by one cycle.
    pub fn postpone_all(&mut self) {
        for entry in &mut self.entries {
            entry.postpone();
        }
    }

    /// Discards every queued entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over queued entries, front first.
    pub fn iter(&self) -> vec_deque::Iter<'_, Defer<T>> {
        self.entries.iter()
    }
}
