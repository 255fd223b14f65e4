//! Simulation driver.
//!
//! Provides the top-level [`Simulator`] that ticks every component and the
//! read-only [`Inspector`] used to observe it.

/// Read-only simulator view.
pub mod inspect;

/// Cycle driver owning core, scheduler, units and memory.
pub mod simulator;

pub use inspect::Inspector;
pub use simulator::Simulator;
