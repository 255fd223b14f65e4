
/// DMA SET and COPY, including overlap and alignment properties.
pub mod dma;

/// Word and block memory contract.
pub mod memory;
