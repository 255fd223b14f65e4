//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components around the core: the shared memory,
//! the coprocessors, and the scheduler that feeds them.

/// Coprocessor implementations (DMA, blitter).
pub mod devices;

/// Byte-addressable system memory.
pub mod memory;

/// Core-to-coprocessor scheduler.
pub mod scheduler;

/// Coprocessor trait definitions.
pub mod traits;

pub use memory::Memory;
pub use scheduler::Scheduler;
pub use traits::{CompletionCallback, Coprocessor, UnitState};
