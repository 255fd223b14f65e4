//! Configuration system for the VPU simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline hardware constants (memory size, predictor tables, queue depth,
//!    framebuffer geometry).
//! 2. **Structures:** Hierarchical config for general, memory, pipeline, scheduler, and
//!    framebuffer settings.
//! 3. **Validation:** Structural rules checked before a simulator is built.
//!
//! Configuration is supplied as JSON via [`Config::from_json`], or use `Config::default()`.

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::{FRAMEBUFFER_PIXEL_BYTES, MEM_ACCESS_WIDTH};

/// Default configuration constants for the simulator.
mod defaults {
    /// Initial program counter.
    pub const START_PC: u32 = 0;

    /// Cycle budget for `Simulator::run`.
    pub const MAX_CYCLES: u64 = 10_000_000;

    /// Total size of memory (512 MiB).
    pub const MEM_SIZE: usize = 512 * 1024 * 1024;

    /// Branch History Table entries.
    pub const BHT_SIZE: usize = 256;

    /// Branch Target Buffer entries.
    pub const BTB_SIZE: usize = 256;

    /// Commands each scheduler frontend queue can hold.
    pub const FRONTEND_QUEUE_SIZE: usize = 4;

    /// Byte address of the framebuffer.
    pub const FRAMEBUFFER_BASE: u32 = 0x1000_0000;

    /// Framebuffer width in pixels.
    pub const FRAMEBUFFER_WIDTH: u32 = 640;

    /// Framebuffer height in pixels.
    pub const FRAMEBUFFER_HEIGHT: u32 = 480;
}

/// Root configuration structure for the simulator.
///
/// Every section and field is optional in JSON; missing values take their defaults.
///
/// # Examples
///
/// ```
/// use vpusim_core::config::Config;
///
/// let json = r#"{
///     "memory": { "size": 1048576 },
///     "framebuffer": { "base": 524288, "width": 32, "height": 8 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.memory.size, 1 << 20);
/// assert_eq!(config.pipeline.bht_size, 256);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Main memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Branch predictor configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Scheduler configuration
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Framebuffer geometry used by the blitter
    #[serde(default)]
    pub framebuffer: FramebufferConfig,
}

impl Config {
    /// Parses a JSON document and validates the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the structural rules every simulator relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let size = self.memory.size;
        if size == 0 || size % MEM_ACCESS_WIDTH != 0 {
            return invalid(format!(
                "memory.size {size:#x} must be a nonzero multiple of {MEM_ACCESS_WIDTH}"
            ));
        }
        if u32::try_from(size - 1).is_err() {
            return invalid(format!("memory.size {size:#x} exceeds the 32-bit address space"));
        }
        for (name, entries) in [
            ("pipeline.bht_size", self.pipeline.bht_size),
            ("pipeline.btb_size", self.pipeline.btb_size),
        ] {
            if !entries.is_power_of_two() {
                return invalid(format!("{name} {entries} must be a nonzero power of two"));
            }
        }
        if self.scheduler.frontend_queue_size == 0 {
            return invalid("scheduler.frontend_queue_size must be at least 1".to_string());
        }

        let fb = &self.framebuffer;
        if fb.width == 0 || fb.height == 0 {
            return invalid(format!(
                "framebuffer geometry {}x{} must be nonzero",
                fb.width, fb.height
            ));
        }
        if fb.base as usize % MEM_ACCESS_WIDTH != 0 {
            return invalid(format!(
                "framebuffer.base {:#x} must be {MEM_ACCESS_WIDTH}-byte aligned",
                fb.base
            ));
        }
        // CLEAR writes whole blocks, so the last one may run past the framebuffer.
        let end = fb.base as u64 + fb.bytes().next_multiple_of(MEM_ACCESS_WIDTH as u64);
        if end > size as u64 {
            return invalid(format!(
                "framebuffer {:#x}..{end:#x} does not fit in memory of {size:#x} bytes",
                fb.base
            ));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Initial PC value
    #[serde(default = "GeneralConfig::default_start_pc")]
    pub start_pc: u32,

    /// Cycles a run may take before it is abandoned
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    fn default_start_pc() -> u32 {
        defaults::START_PC
    }

    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_pc: defaults::START_PC,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Memory size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,
}

impl MemoryConfig {
    fn default_size() -> usize {
        defaults::MEM_SIZE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEM_SIZE,
        }
    }
}

/// Branch predictor table sizes.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Branch History Table entries (power of two)
    #[serde(default = "PipelineConfig::default_bht_size")]
    pub bht_size: usize,

    /// Branch Target Buffer entries (power of two)
    #[serde(default = "PipelineConfig::default_btb_size")]
    pub btb_size: usize,
}

impl PipelineConfig {
    fn default_bht_size() -> usize {
        defaults::BHT_SIZE
    }

    fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bht_size: defaults::BHT_SIZE,
            btb_size: defaults::BTB_SIZE,
        }
    }
}

/// Scheduler configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Commands each frontend queue can hold
    #[serde(default = "SchedulerConfig::default_frontend_queue_size")]
    pub frontend_queue_size: usize,
}

impl SchedulerConfig {
    fn default_frontend_queue_size() -> usize {
        defaults::FRONTEND_QUEUE_SIZE
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            frontend_queue_size: defaults::FRONTEND_QUEUE_SIZE,
        }
    }
}

/// Framebuffer placement and geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FramebufferConfig {
    /// Byte address of pixel (0, 0)
    #[serde(default = "FramebufferConfig::default_base")]
    pub base: u32,

    /// Pixels per row
    #[serde(default = "FramebufferConfig::default_width")]
    pub width: u32,

    /// Number of rows
    #[serde(default = "FramebufferConfig::default_height")]
    pub height: u32,
}

impl FramebufferConfig {
    fn default_base() -> u32 {
        defaults::FRAMEBUFFER_BASE
    }

    fn default_width() -> u32 {
        defaults::FRAMEBUFFER_WIDTH
    }

    fn default_height() -> u32 {
        defaults::FRAMEBUFFER_HEIGHT
    }

    /// Size of the framebuffer in bytes.
    pub const fn bytes(&self) -> u64 {
        self.width as u64 * self.height as u64 * FRAMEBUFFER_PIXEL_BYTES as u64
    }
}

impl Default for FramebufferConfig {
    fn default() -> Self {
        Self {
            base: defaults::FRAMEBUFFER_BASE,
            width: defaults::FRAMEBUFFER_WIDTH,
            height: defaults::FRAMEBUFFER_HEIGHT,
        }
    }
}
