//! VPU opcode table.
//!
//! Each opcode carries static properties looked up by the decoder and the
//! execute stage: the operand layout of its instruction word and, for
//! coprocessor instructions, the scheduler pipe it is routed to.

use std::fmt;

/// Operand layout of an instruction word (bits 23..0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// No operands.
    None,
    /// 24-bit immediate in bits 23..0.
    I24,
    /// Register index in bits 23..16.
    R,
    /// Register index in bits 23..16, 16-bit immediate in bits 15..0.
    RI16,
    /// Register indices in bits 23..16 and 15..8.
    RR,
    /// Byte address of a branch label in bits 23..0.
    Label,
}

/// Coprocessor pipe an instruction is routed to by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipe {
    /// DMA engine.
    Dma,
    /// Pixel blitter.
    Blitter,
    /// Scheduler itself (synchronization).
    Sched,
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dma => "DMA",
            Self::Blitter => "BLITTER",
            Self::Sched => "SCHED",
        })
    }
}

/// VPU opcodes (bits 31..24 of an instruction word).
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// No operation.
    NOP = 0x00,
    /// Halt once committed.
    HLT = 0x01,
    /// `ACC = imm24`.
    MOV_I24 = 0x10,
    /// `ACC = ACC + imm24`.
    ADD_I24 = 0x11,
    /// `r = imm16`.
    MOV_R_I16 = 0x12,
    /// `r = r + imm16`.
    ADD_R_I16 = 0x13,
    /// `a = b`.
    MOV_R_R = 0x14,
    /// `a = a + b`.
    ADD_R_R = 0x15,
    /// Logical shift left by immediate.
    LSL_R_I16 = 0x18,
    /// Logical shift right by immediate.
    LSR_R_I16 = 0x19,
    /// Arithmetic shift left by immediate.
    ASL_R_I16 = 0x1A,
    /// Arithmetic shift right by immediate.
    ASR_R_I16 = 0x1B,
    /// `C = (r == imm16)`.
    CMP_EQ_R_I16 = 0x20,
    /// `C = (r < imm16)`, unsigned.
    CMP_LT_R_I16 = 0x21,
    /// `C = (a == b)`.
    CMP_EQ_R_R = 0x22,
    /// Unconditional jump to label.
    JMP_L = 0x30,
    /// Branch to label if `C` is set.
    BRC_L = 0x31,
    /// Branch to label if `C` is clear.
    BRNC_L = 0x32,
    /// Stage DMA destination address.
    P_DMA_DST_R = 0x40,
    /// Stage DMA source address.
    P_DMA_SRC_R = 0x41,
    /// Stage DMA length in bytes.
    P_DMA_LEN_R = 0x42,
    /// Stage DMA fill byte and trigger SET.
    P_DMA_SET_R = 0x43,
    /// Trigger DMA COPY.
    P_DMA_CPY = 0x44,
    /// Stage blitter colour (RGB, expanded to RGBA).
    P_BLI_COL_R = 0x50,
    /// Stage pixel coordinates and trigger PIXEL.
    P_BLI_PIX_R_R = 0x51,
    /// Trigger framebuffer CLEAR.
    P_BLI_CLR = 0x52,
    /// Fence: succeeds only when no coprocessor work is outstanding.
    P_SCH_FNC = 0x60,
}

impl Opcode {
    /// Every defined opcode.
    pub const ALL: [Self; 27] = [
        Self::NOP,
        Self::HLT,
        Self::MOV_I24,
        Self::ADD_I24,
        Self::MOV_R_I16,
        Self::ADD_R_I16,
        Self::MOV_R_R,
        Self::ADD_R_R,
        Self::LSL_R_I16,
        Self::LSR_R_I16,
        Self::ASL_R_I16,
        Self::ASR_R_I16,
        Self::CMP_EQ_R_I16,
        Self::CMP_LT_R_I16,
        Self::CMP_EQ_R_R,
        Self::JMP_L,
        Self::BRC_L,
        Self::BRNC_L,
        Self::P_DMA_DST_R,
        Self::P_DMA_SRC_R,
        Self::P_DMA_LEN_R,
        Self::P_DMA_SET_R,
        Self::P_DMA_CPY,
        Self::P_BLI_COL_R,
        Self::P_BLI_PIX_R_R,
        Self::P_BLI_CLR,
        Self::P_SCH_FNC,
    ];

    /// Looks up an opcode by its encoded byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| *op as u8 == byte)
    }

    /// Encoded opcode byte.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Operand layout of the instruction word.
    pub const fn layout(self) -> Layout {
        match self {
            Self::NOP | Self::HLT | Self::P_DMA_CPY | Self::P_BLI_CLR | Self::P_SCH_FNC => {
                Layout::None
            }
            Self::MOV_I24 | Self::ADD_I24 => Layout::I24,
            Self::MOV_R_I16
            | Self::ADD_R_I16
            | Self::LSL_R_I16
            | Self::LSR_R_I16
            | Self::ASL_R_I16
            | Self::ASR_R_I16
            | Self::CMP_EQ_R_I16
            | Self::CMP_LT_R_I16 => Layout::RI16,
            Self::MOV_R_R | Self::ADD_R_R | Self::CMP_EQ_R_R | Self::P_BLI_PIX_R_R => Layout::RR,
            Self::JMP_L | Self::BRC_L | Self::BRNC_L => Layout::Label,
            Self::P_DMA_DST_R
            | Self::P_DMA_SRC_R
            | Self::P_DMA_LEN_R
            | Self::P_DMA_SET_R
            | Self::P_BLI_COL_R => Layout::R,
        }
    }

    /// Scheduler pipe for coprocessor instructions; `None` for core instructions.
    pub const fn pipe(self) -> Option<Pipe> {
        match self {
            Self::P_DMA_DST_R
            | Self::P_DMA_SRC_R
            | Self::P_DMA_LEN_R
            | Self::P_DMA_SET_R
            | Self::P_DMA_CPY => Some(Pipe::Dma),
            Self::P_BLI_COL_R | Self::P_BLI_PIX_R_R | Self::P_BLI_CLR => Some(Pipe::Blitter),
            Self::P_SCH_FNC => Some(Pipe::Sched),
            _ => None,
        }
    }

    /// Returns `true` for jumps and conditional branches.
    pub const fn is_control_flow(self) -> bool {
        matches!(self, Self::JMP_L | Self::BRC_L | Self::BRNC_L)
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::NOP => "NOP",
            Self::HLT => "HLT",
            Self::MOV_I24 => "MOV_I24",
            Self::ADD_I24 => "ADD_I24",
            Self::MOV_R_I16 => "MOV_R_I16",
            Self::ADD_R_I16 => "ADD_R_I16",
            Self::MOV_R_R => "MOV_R_R",
            Self::ADD_R_R => "ADD_R_R",
            Self::LSL_R_I16 => "LSL_R_I16",
            Self::LSR_R_I16 => "LSR_R_I16",
            Self::ASL_R_I16 => "ASL_R_I16",
            Self::ASR_R_I16 => "ASR_R_I16",
            Self::CMP_EQ_R_I16 => "CMP_EQ_R_I16",
            Self::CMP_LT_R_I16 => "CMP_LT_R_I16",
            Self::CMP_EQ_R_R => "CMP_EQ_R_R",
            Self::JMP_L => "JMP_L",
            Self::BRC_L => "BRC_L",
            Self::BRNC_L => "BRNC_L",
            Self::P_DMA_DST_R => "P_DMA_DST_R",
            Self::P_DMA_SRC_R => "P_DMA_SRC_R",
            Self::P_DMA_LEN_R => "P_DMA_LEN_R",
            Self::P_DMA_SET_R => "P_DMA_SET_R",
            Self::P_DMA_CPY => "P_DMA_CPY",
            Self::P_BLI_COL_R => "P_BLI_COL_R",
            Self::P_BLI_PIX_R_R => "P_BLI_PIX_R_R",
            Self::P_BLI_CLR => "P_BLI_CLR",
            Self::P_SCH_FNC => "P_SCH_FNC",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
