//! Coprocessor implementations.
//!
//! Both units implement [`Coprocessor`](crate::soc::traits::Coprocessor) and are
//! fed by the scheduler:
//! 1. **DMA:** Block-granular memory fill and copy.
//! 2. **Blitter:** Pixel writes and framebuffer clears.

/// Pixel blitter.
pub mod blitter;

/// DMA engine.
pub mod dma;

pub use blitter::{Blitter, BlitterCommand, BlitterOperation};
pub use dma::{Dma, DmaCommand, DmaOperation};
