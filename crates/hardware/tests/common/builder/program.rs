use vpusim_core::common::Register;
use vpusim_core::common::constants::{INSTRUCTION_SIZE, SEGMENT_END};
use vpusim_core::isa::Opcode;
use vpusim_core::isa::encode;

/// Fluent builder for VPU programs.
///
/// Labels are absolute byte addresses; `here()` returns the address the next
/// emitted instruction will occupy.
#[derive(Debug, Clone, Default)]
pub struct Program {
    base: u32,
    words: Vec<u32>,
}

impl Program {
    pub fn new() -> Self {
        Self::at(0)
    }

    /// Program to be loaded at byte address `base`.
    pub fn at(base: u32) -> Self {
        Self {
            base,
            words: Vec::new(),
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// Address of the next instruction.
    pub fn here(&self) -> u32 {
        self.base + self.words.len() as u32 * INSTRUCTION_SIZE
    }

    /// Address of instruction `index`.
    pub fn addr_of(&self, index: usize) -> u32 {
        self.base + index as u32 * INSTRUCTION_SIZE
    }

    pub fn word(mut self, word: u32) -> Self {
        self.words.push(word);
        self
    }

    /// Rewrites the label of an already-emitted branch.
    pub fn patch_label(mut self, index: usize, target: u32) -> Self {
        let opcode = Opcode::from_byte((self.words[index] >> 24) as u8).expect("emitted opcode");
        self.words[index] = encode::label(opcode, target);
        self
    }

    pub fn build(self) -> Vec<u32> {
        self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    // --- Control ---

    pub fn nop(self) -> Self {
        self.word(encode::none(Opcode::NOP))
    }

    pub fn hlt(self) -> Self {
        self.word(encode::none(Opcode::HLT))
    }

    pub fn end(self) -> Self {
        self.word(SEGMENT_END)
    }

    pub fn jmp(self, target: u32) -> Self {
        self.word(encode::label(Opcode::JMP_L, target))
    }

    pub fn brc(self, target: u32) -> Self {
        self.word(encode::label(Opcode::BRC_L, target))
    }

    pub fn brnc(self, target: u32) -> Self {
        self.word(encode::label(Opcode::BRNC_L, target))
    }

    // --- Accumulator ---

    pub fn mov_acc(self, imm: u32) -> Self {
        self.word(encode::i24(Opcode::MOV_I24, imm))
    }

    pub fn add_acc(self, imm: u32) -> Self {
        self.word(encode::i24(Opcode::ADD_I24, imm))
    }

    // --- Register forms ---

    pub fn mov(self, reg: Register, imm: u32) -> Self {
        self.word(encode::ri16(Opcode::MOV_R_I16, reg, imm))
    }

    pub fn add(self, reg: Register, imm: u32) -> Self {
        self.word(encode::ri16(Opcode::ADD_R_I16, reg, imm))
    }

    pub fn mov_rr(self, a: Register, b: Register) -> Self {
        self.word(encode::rr(Opcode::MOV_R_R, a, b))
    }

    pub fn add_rr(self, a: Register, b: Register) -> Self {
        self.word(encode::rr(Opcode::ADD_R_R, a, b))
    }

    pub fn lsl(self, reg: Register, imm: u32) -> Self {
        self.word(encode::ri16(Opcode::LSL_R_I16, reg, imm))
    }

    pub fn lsr(self, reg: Register, imm: u32) -> Self {
        self.word(encode::ri16(Opcode::LSR_R_I16, reg, imm))
    }

    pub fn asr(self, reg: Register, imm: u32) -> Self {
        self.word(encode::ri16(Opcode::ASR_R_I16, reg, imm))
    }

    pub fn cmp_eq(self, reg: Register, imm: u32) -> Self {
        self.word(encode::ri16(Opcode::CMP_EQ_R_I16, reg, imm))
    }

    pub fn cmp_lt(self, reg: Register, imm: u32) -> Self {
        self.word(encode::ri16(Opcode::CMP_LT_R_I16, reg, imm))
    }

    pub fn cmp_eq_rr(self, a: Register, b: Register) -> Self {
        self.word(encode::rr(Opcode::CMP_EQ_R_R, a, b))
    }

    // --- Coprocessor pipes ---

    pub fn dma_dst(self, reg: Register) -> Self {
        self.word(encode::r(Opcode::P_DMA_DST_R, reg))
    }

    pub fn dma_src(self, reg: Register) -> Self {
        self.word(encode::r(Opcode::P_DMA_SRC_R, reg))
    }

    pub fn dma_len(self, reg: Register) -> Self {
        self.word(encode::r(Opcode::P_DMA_LEN_R, reg))
    }

    pub fn dma_set(self, reg: Register) -> Self {
        self.word(encode::r(Opcode::P_DMA_SET_R, reg))
    }

    pub fn dma_cpy(self) -> Self {
        self.word(encode::none(Opcode::P_DMA_CPY))
    }

    pub fn bli_col(self, reg: Register) -> Self {
        self.word(encode::r(Opcode::P_BLI_COL_R, reg))
    }

    pub fn bli_pix(self, x: Register, y: Register) -> Self {
        self.word(encode::rr(Opcode::P_BLI_PIX_R_R, x, y))
    }

    pub fn bli_clr(self) -> Self {
        self.word(encode::none(Opcode::P_BLI_CLR))
    }

    pub fn fence(self) -> Self {
        self.word(encode::none(Opcode::P_SCH_FNC))
    }

    /// Loads a full 32-bit constant into `reg` using 16-bit moves and shifts.
    pub fn mov32(self, reg: Register, value: u32) -> Self {
        if value <= 0xFFFF {
            return self.mov(reg, value);
        }
        self.mov(reg, value >> 16)
            .lsl(reg, 16)
            .add(reg, value & 0xFFFF)
    }
}
