//! Pixel Blitter.
//!
//! Draws into a linear RGBA framebuffer (one little-endian word per pixel, rows
//! of `width` pixels starting at `base`). Supports two commands:
//! 1. **PIXEL:** Writes the colour word at `(x, y)` in one cycle.
//! 2. **CLEAR:** Fills the framebuffer from `(0, 0)` one block of pixels per cycle.
//!    The last block is written whole even when the framebuffer ends inside it.

use tracing::debug;

use crate::common::Cycle;
use crate::common::constants::{BLITTER_MAX_PIXELS, FRAMEBUFFER_PIXEL_BYTES, MEM_ACCESS_WIDTH};
use crate::config::FramebufferConfig;
use crate::soc::memory::{Block, Memory};
use crate::soc::traits::{CompletionCallback, Coprocessor, UnitState};

/// Blitter operation selected by the trigger opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlitterOperation {
    /// No trigger seen yet.
    #[default]
    None,
    /// Fill the whole framebuffer.
    Clear,
    /// Write one pixel.
    Pixel,
}

/// A blitter command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlitterCommand {
    /// Pixel column (PIXEL only).
    pub x: u32,
    /// Pixel row (PIXEL only).
    pub y: u32,
    /// RGBA colour.
    pub colour: u32,
    /// Operation.
    pub operation: BlitterOperation,
}

/// Blitter unit.
pub struct Blitter {
    framebuffer: FramebufferConfig,
    state: UnitState,
    work_cycle: Cycle,
    command: BlitterCommand,
    on_complete: Option<CompletionCallback>,
}

impl std::fmt::Debug for Blitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blitter")
            .field("framebuffer", &self.framebuffer)
            .field("state", &self.state)
            .field("work_cycle", &self.work_cycle)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

impl Blitter {
    /// Creates an idle blitter drawing into `framebuffer`.
    pub const fn new(framebuffer: FramebufferConfig) -> Self {
        Self {
            framebuffer,
            state: UnitState::Idle,
            work_cycle: 0,
            command: BlitterCommand {
                x: 0,
                y: 0,
                colour: 0,
                operation: BlitterOperation::None,
            },
            on_complete: None,
        }
    }

    /// Framebuffer geometry.
    pub const fn framebuffer(&self) -> &FramebufferConfig {
        &self.framebuffer
    }

    /// Byte address of the command's current pixel.
    #[track_caller]
    fn pixel_address(&self) -> u32 {
        let FramebufferConfig {
            base,
            width,
            height,
        } = self.framebuffer;
        let BlitterCommand { x, y, .. } = self.command;
        assert!(
            x < width && y < height,
            "blitter pixel ({x}, {y}) outside {width}x{height} framebuffer"
        );
        base + (y * width + x) * FRAMEBUFFER_PIXEL_BYTES
    }

    fn pixel_cycle(&mut self, now: Cycle, memory: &mut Memory) {
        memory.write_word(self.pixel_address(), self.command.colour);
        self.finish(now);
    }

    fn clear_cycle(&mut self, now: Cycle, memory: &mut Memory) {
        let mut block: Block = [0; MEM_ACCESS_WIDTH];
        for pixel in block.chunks_exact_mut(FRAMEBUFFER_PIXEL_BYTES as usize) {
            pixel.copy_from_slice(&self.command.colour.to_le_bytes());
        }
        memory.write_block(self.pixel_address(), &block);

        let width = self.framebuffer.width;
        self.command.x += BLITTER_MAX_PIXELS;
        while self.command.x >= width {
            self.command.x -= width;
            self.command.y += 1;
        }
        if self.command.y >= self.framebuffer.height {
            self.finish(now);
        }
    }

    fn finish(&mut self, now: Cycle) {
        debug!("[{now}] BLITTER: {:?} finished", self.command.operation);
        self.state = UnitState::Finished;
    }
}

impl Coprocessor for Blitter {
    type Command = BlitterCommand;

    fn name(&self) -> &'static str {
        "BLITTER"
    }

    /// Accepts a command while idle. CLEAR always starts at `(0, 0)`.
    ///
    /// # Panics
    ///
    /// Panics if the command has no operation or a PIXEL lies outside the framebuffer.
    fn submit(
        &mut self,
        now: Cycle,
        command: BlitterCommand,
        on_complete: CompletionCallback,
    ) -> bool {
        if self.state != UnitState::Idle {
            return false;
        }
        self.command = match command.operation {
            BlitterOperation::None => {
                panic!("blitter command submitted in cycle {now} without an operation")
            }
            BlitterOperation::Clear => BlitterCommand {
                x: 0,
                y: 0,
                ..command
            },
            BlitterOperation::Pixel => command,
        };
        let _ = self.pixel_address();
        self.on_complete = Some(on_complete);
        self.work_cycle = now + 1;
        self.state = UnitState::Working;
        debug!(
            "[{now}] BLITTER: accepted {:?} at ({}, {}) colour={:#010x}",
            self.command.operation, self.command.x, self.command.y, self.command.colour
        );
        true
    }

    fn run_cycle(&mut self, now: Cycle, memory: &mut Memory) {
        match self.state {
            UnitState::Idle => {}
            UnitState::Finished => {
                if let Some(on_complete) = self.on_complete.take() {
                    on_complete();
                }
                self.state = UnitState::Idle;
            }
            UnitState::Working => {
                if now < self.work_cycle {
                    return;
                }
                match self.command.operation {
                    BlitterOperation::Pixel => self.pixel_cycle(now, memory),
                    BlitterOperation::Clear => self.clear_cycle(now, memory),
                    BlitterOperation::None => {
                        unreachable!("blitter working without an operation in cycle {now}")
                    }
                }
            }
        }
    }

    fn state(&self) -> UnitState {
        self.state
    }
}
