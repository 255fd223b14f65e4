//! Common utilities and types used throughout the VPU simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Access widths, instruction layout, and framebuffer geometry constants.
//! 2. **Cycle Tags:** The `Defer` latch entry and the FIFO queue built from it.
//! 3. **Error Handling:** Decode, configuration, and driver error types.
//! 4. **Register Management:** Register and flag enumerations and their storage.

/// Common constants used throughout the simulator.
pub mod constants;

/// Cycle-tagged latch entries and queues.
pub mod defer;

/// Error types.
pub mod error;

/// Register file and flags.
pub mod reg;

pub use defer::{Cycle, Defer, LatchQueue};
pub use error::{ConfigError, DecodeError, SimError};
pub use reg::{Flag, Flags, REGISTER_COUNT, Register, RegisterFile};
