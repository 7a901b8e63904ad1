//! Instruction word fields and the decoded operand set.
//!
//! Provides the [`InstructionBits`] accessor trait over raw `u32` words and
//! the [`Decoded`] record that travels down the pipeline once a word has been
//! classified.

use super::op::Op;

/// Mask for the major opcode (bits 6:0).
pub const OPCODE_MASK: u32 = 0x7F;
/// Mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Mask for funct3 (bits 14:12 after shifting).
pub const FUNCT3_MASK: u32 = 0x7;
/// Mask for funct7 (bits 31:25 after shifting).
pub const FUNCT7_MASK: u32 = 0x7F;
/// Mask for the 12-bit CSR address (bits 31:20 after shifting).
pub const CSR_MASK: u32 = 0xFFF;

/// Bit position of `rd`.
const RD_SHIFT: u32 = 7;
/// Bit position of funct3.
const FUNCT3_SHIFT: u32 = 12;
/// Bit position of `rs1`.
const RS1_SHIFT: u32 = 15;
/// Bit position of `rs2` (also the low bit of the I-immediate).
const RS2_SHIFT: u32 = 20;
/// Bit position of funct7.
const FUNCT7_SHIFT: u32 = 25;

/// Field accessors for a raw 32-bit instruction word.
pub trait InstructionBits {
    /// Bits 6:0.
    fn opcode(&self) -> u32;
    /// Bits 11:7.
    fn rd(&self) -> usize;
    /// Bits 19:15.
    fn rs1(&self) -> usize;
    /// Bits 24:20.
    fn rs2(&self) -> usize;
    /// Bits 14:12.
    fn funct3(&self) -> u32;
    /// Bits 31:25.
    fn funct7(&self) -> u32;
    /// Bits 31:20, the CSR address of a `csr*` instruction.
    fn csr(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        ((self >> RS1_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        ((self >> RS2_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> FUNCT7_SHIFT) & FUNCT7_MASK
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        (self >> RS2_SHIFT) & CSR_MASK
    }
}

/// The operand set of one classified instruction.
///
/// funct3 and funct7 are folded into `op` and not retained. Register fields
/// that the format does not define are zero, so hazard checks never match a
/// phantom source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// Raw encoding, kept for tracing and fault reports.
    pub raw: u32,
    /// Operation tag.
    pub op: Op,
    /// Destination register (0 when the format has none).
    pub rd: usize,
    /// First source register (0 when unused).
    pub rs1: usize,
    /// Second source register (0 when unused).
    pub rs2: usize,
    /// Sign-extended immediate. B-type is already scaled by two; U-type holds
    /// the unshifted 20-bit field.
    pub imm: i64,
}

impl Decoded {
    /// The inert stand-in issued for an undecodable word under the `nop` policy.
    pub const fn illegal(raw: u32) -> Self {
        Self {
            raw,
            op: Op::Illegal,
            rd: 0,
            rs1: 0,
            rs2: 0,
            imm: 0,
        }
    }
}
