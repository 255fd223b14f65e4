//! Coprocessor trait for scheduler-driven units.
//!
//! This module defines the `Coprocessor` trait implemented by the DMA engine and
//! the blitter. It provides:
//! 1. **Identification:** `name` for diagnostics.
//! 2. **Submission:** `submit` hands over a command and its completion callback,
//!    refusing while the unit is busy.
//! 3. **Lifecycle:** `run_cycle` advances the unit's state machine one tick; `state`
//!    exposes IDLE/WORKING/FINISHED for inspection.

use std::fmt;

use crate::common::Cycle;
use crate::soc::memory::Memory;

/// Callback invoked exactly once when a unit completes a command.
pub type CompletionCallback = Box<dyn FnOnce() + Send>;

/// Lifecycle state of a coprocessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitState {
    /// No command held; `submit` is accepted.
    #[default]
    Idle,
    /// A command is in progress.
    Working,
    /// The last working cycle has passed; the callback fires on the next cycle.
    Finished,
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "IDLE",
            Self::Working => "WORKING",
            Self::Finished => "FINISHED",
        })
    }
}

/// Trait for coprocessors fed by the scheduler.
pub trait Coprocessor {
    /// Fully-formed command accepted by the unit.
    type Command;

    /// Returns a short name for this unit (e.g., `"DMA"`).
    fn name(&self) -> &'static str;

    /// Offers a command to the unit.
    ///
    /// Returns `false` without side effects if the unit is not idle. On
    /// acceptance the unit starts work no earlier than the cycle after `now`
    /// and fires `on_complete` exactly once, on the cycle after its last
    /// working cycle.
    fn submit(&mut self, now: Cycle, command: Self::Command, on_complete: CompletionCallback)
    -> bool;

    /// Advances the unit by one cycle.
    fn run_cycle(&mut self, now: Cycle, memory: &mut Memory);

    /// Current lifecycle state.
    fn state(&self) -> UnitState;
}
