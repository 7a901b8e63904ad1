//! Instruction decoder.
//!
//! Classifies a 32-bit RISC-V word into an [`Op`] plus its operand fields. It performs:
//! 1. **Format selection:** The major opcode picks one of R, I, S, B, U or J.
//! 2. **Field extraction:** `rd`, `rs1`, `rs2` and the immediate are pulled from the
//!    standard bit positions; fields the format does not define are left at zero.
//! 3. **Tag selection:** A nested opcode → funct3 → funct7 lookup names the operation.
//!    Any combination outside the supported set is a [`DecodeError`], never a guess.

use super::instruction::{Decoded, InstructionBits};
use super::op::{Format, Op};
use super::privileged::opcodes as sys;
use super::rv64i::{funct3 as f3, funct7 as f7, opcodes};
use super::rv64m::{funct3 as m3, opcodes::M_EXTENSION};
use crate::common::error::{DecodeError, DecodeFaultKind};

/// Width of the I-type and S-type immediates.
const IMM12_BITS: u32 = 12;

/// Bit position of the I-type immediate.
const I_IMM_SHIFT: u32 = 20;

/// S-type `imm[4:0]` lives in bits 11:7.
const S_IMM_LO_SHIFT: u32 = 7;
/// S-type `imm[11:5]` lives in bits 31:25.
const S_IMM_HI_SHIFT: u32 = 25;

/// B-type immediate as stored in the word: bits 12:1 of the offset (12 bits).
const B_FIELD_BITS: u32 = 12;
/// B-type `imm[11]` lives in bit 7.
const B_IMM_11_SHIFT: u32 = 7;
/// B-type `imm[4:1]` lives in bits 11:8.
const B_IMM_4_1_SHIFT: u32 = 8;
/// B-type `imm[10:5]` lives in bits 30:25.
const B_IMM_10_5_SHIFT: u32 = 25;
/// B-type `imm[12]` lives in bit 31.
const B_IMM_12_SHIFT: u32 = 31;

/// U-type field width (bits 31:12).
const U_FIELD_BITS: u32 = 20;
/// U-type field position.
const U_IMM_SHIFT: u32 = 12;

/// J-type immediate width including the implicit zero bit.
const J_IMM_BITS: u32 = 21;
/// J-type `imm[19:12]` lives in bits 19:12.
const J_IMM_19_12_SHIFT: u32 = 12;
/// J-type `imm[11]` lives in bit 20.
const J_IMM_11_SHIFT: u32 = 20;
/// J-type `imm[10:1]` lives in bits 30:21.
const J_IMM_10_1_SHIFT: u32 = 21;
/// J-type `imm[20]` lives in bit 31.
const J_IMM_20_SHIFT: u32 = 31;

/// Mask for the six-bit RV64 shift amount of `slli`/`srli`/`srai`.
const SHAMT64_MASK: u32 = 0x3F;
/// Mask for the five-bit shift amount of the word forms.
const SHAMT32_MASK: u32 = 0x1F;

/// Sign-extends the low `bits` bits of `value` to 64 bits.
///
/// If bit `bits - 1` is set, every bit above it is ORed in; otherwise the value
/// is returned masked to `bits`. Widths of 64 or more return the value unchanged.
///
/// # Arguments
///
/// * `value` - Raw field, right-aligned.
/// * `bits`  - Width of the field (1..=64).
pub const fn sign_extend(value: u64, bits: u32) -> u64 {
    if bits == 0 || bits >= u64::BITS {
        return value;
    }
    let field = value & ((1 << bits) - 1);
    if (field >> (bits - 1)) & 1 == 1 {
        field | (u64::MAX << bits)
    } else {
        field
    }
}

/// I-type immediate: `imm[11:0]` in bits 31:20.
pub const fn imm_i(inst: u32) -> i64 {
    sign_extend((inst >> I_IMM_SHIFT) as u64, IMM12_BITS) as i64
}

/// S-type immediate: `imm[11:5]` in bits 31:25, `imm[4:0]` in bits 11:7.
pub const fn imm_s(inst: u32) -> i64 {
    let lo = (inst >> S_IMM_LO_SHIFT) & 0x1F;
    let hi = (inst >> S_IMM_HI_SHIFT) & 0x7F;
    sign_extend(((hi << 5) | lo) as u64, IMM12_BITS) as i64
}

/// B-type immediate, scaled to a byte offset.
///
/// The word holds offset bits 12:1. They are assembled into a 12-bit field,
/// sign-extended, then shifted left once to reinstate the implicit zero bit.
pub const fn imm_b(inst: u32) -> i64 {
    let b11 = (inst >> B_IMM_11_SHIFT) & 0x1;
    let b4_1 = (inst >> B_IMM_4_1_SHIFT) & 0xF;
    let b10_5 = (inst >> B_IMM_10_5_SHIFT) & 0x3F;
    let b12 = (inst >> B_IMM_12_SHIFT) & 0x1;
    let field = (b12 << 11) | (b11 << 10) | (b10_5 << 4) | b4_1;
    (sign_extend(field as u64, B_FIELD_BITS) << 1) as i64
}

/// U-type immediate: the 20-bit field in bits 31:12, sign-extended but not shifted.
pub const fn imm_u(inst: u32) -> i64 {
    sign_extend((inst >> U_IMM_SHIFT) as u64, U_FIELD_BITS) as i64
}

/// J-type immediate. The encoded bits already sit at their offset positions,
/// so the result is a byte offset with no further scaling.
pub const fn imm_j(inst: u32) -> i64 {
    let b19_12 = (inst >> J_IMM_19_12_SHIFT) & 0xFF;
    let b11 = (inst >> J_IMM_11_SHIFT) & 0x1;
    let b10_1 = (inst >> J_IMM_10_1_SHIFT) & 0x3FF;
    let b20 = (inst >> J_IMM_20_SHIFT) & 0x1;
    let field = (b20 << 20) | (b19_12 << 12) | (b11 << 11) | (b10_1 << 1);
    sign_extend(field as u64, J_IMM_BITS) as i64
}

/// Decodes one instruction word.
///
/// # Arguments
///
/// * `inst` - The 32-bit encoding.
/// * `pc`   - Address it was fetched from; only used to label a fault.
///
/// # Returns
///
/// The classified operand set, or a [`DecodeError`] naming the field that
/// failed to match.
pub fn decode(inst: u32, pc: u64) -> Result<Decoded, DecodeError> {
    let fault = |kind| DecodeError {
        word: inst,
        pc,
        kind,
    };
    let op = classify(inst).map_err(fault)?;

    let (rd, rs1, rs2, imm) = match op.format() {
        Format::R => (inst.rd(), inst.rs1(), inst.rs2(), 0),
        Format::I => decode_i_operands(op, inst),
        Format::S => (0, inst.rs1(), inst.rs2(), imm_s(inst)),
        Format::B => (0, inst.rs1(), inst.rs2(), imm_b(inst)),
        Format::U => (inst.rd(), 0, 0, imm_u(inst)),
        Format::J => (inst.rd(), 0, 0, imm_j(inst)),
    };

    Ok(Decoded {
        raw: inst,
        op,
        rd,
        rs1,
        rs2,
        imm,
    })
}

/// Operand fields for I-format operations, which differ in what the
/// immediate field means.
fn decode_i_operands(op: Op, inst: u32) -> (usize, usize, usize, i64) {
    match op {
        Op::Slli | Op::Srli | Op::Srai => (
            inst.rd(),
            inst.rs1(),
            0,
            ((inst >> I_IMM_SHIFT) & SHAMT64_MASK) as i64,
        ),
        Op::Slliw | Op::Srliw | Op::Sraiw => (
            inst.rd(),
            inst.rs1(),
            0,
            ((inst >> I_IMM_SHIFT) & SHAMT32_MASK) as i64,
        ),
        // System operations carry no live operands through the pipeline.
        Op::Fence
        | Op::FenceI
        | Op::Ecall
        | Op::Ebreak
        | Op::Csrrw
        | Op::Csrrs
        | Op::Csrrc
        | Op::Csrrwi
        | Op::Csrrsi
        | Op::Csrrci
        | Op::Illegal => (0, 0, 0, 0),
        _ => (inst.rd(), inst.rs1(), 0, imm_i(inst)),
    }
}

/// Names the operation encoded by `inst`.
fn classify(inst: u32) -> Result<Op, DecodeFaultKind> {
    let funct3 = inst.funct3();
    let funct7 = inst.funct7();

    match inst.opcode() {
        opcodes::OP_LOAD => match funct3 {
            f3::LB => Ok(Op::Lb),
            f3::LH => Ok(Op::Lh),
            f3::LW => Ok(Op::Lw),
            f3::LD => Ok(Op::Ld),
            f3::LBU => Ok(Op::Lbu),
            f3::LHU => Ok(Op::Lhu),
            f3::LWU => Ok(Op::Lwu),
            _ => Err(DecodeFaultKind::Funct3),
        },
        opcodes::OP_STORE => match funct3 {
            f3::SB => Ok(Op::Sb),
            f3::SH => Ok(Op::Sh),
            f3::SW => Ok(Op::Sw),
            f3::SD => Ok(Op::Sd),
            _ => Err(DecodeFaultKind::Funct3),
        },
        opcodes::OP_IMM => classify_op_imm(inst, funct3),
        opcodes::OP_IMM_32 => classify_op_imm_32(funct3, funct7),
        opcodes::OP_REG => classify_op_reg(funct3, funct7),
        opcodes::OP_REG_32 => classify_op_reg_32(funct3, funct7),
        opcodes::OP_LUI => Ok(Op::Lui),
        opcodes::OP_AUIPC => Ok(Op::Auipc),
        opcodes::OP_BRANCH => match funct3 {
            f3::BEQ => Ok(Op::Beq),
            f3::BNE => Ok(Op::Bne),
            f3::BLT => Ok(Op::Blt),
            f3::BGE => Ok(Op::Bge),
            f3::BLTU => Ok(Op::Bltu),
            f3::BGEU => Ok(Op::Bgeu),
            _ => Err(DecodeFaultKind::Funct3),
        },
        opcodes::OP_JAL => Ok(Op::Jal),
        opcodes::OP_JALR if funct3 == f3::JALR => Ok(Op::Jalr),
        opcodes::OP_JALR => Err(DecodeFaultKind::Funct3),
        opcodes::OP_MISC_MEM => match funct3 {
            f3::FENCE => Ok(Op::Fence),
            f3::FENCE_I => Ok(Op::FenceI),
            _ => Err(DecodeFaultKind::Funct3),
        },
        sys::OP_SYSTEM => match funct3 {
            sys::PRIV => match inst.csr() {
                sys::IMM_ECALL => Ok(Op::Ecall),
                sys::IMM_EBREAK => Ok(Op::Ebreak),
                _ => Err(DecodeFaultKind::Funct7),
            },
            sys::CSRRW => Ok(Op::Csrrw),
            sys::CSRRS => Ok(Op::Csrrs),
            sys::CSRRC => Ok(Op::Csrrc),
            sys::CSRRWI => Ok(Op::Csrrwi),
            sys::CSRRSI => Ok(Op::Csrrsi),
            sys::CSRRCI => Ok(Op::Csrrci),
            _ => Err(DecodeFaultKind::Funct3),
        },
        _ => Err(DecodeFaultKind::Opcode),
    }
}

fn classify_op_imm(inst: u32, funct3: u32) -> Result<Op, DecodeFaultKind> {
    // RV64 shifts keep shamt[5] in bit 25, so only bits 31:26 select the shift type.
    let shift_type = inst >> f7::SHIFT_TYPE_SHIFT;
    match funct3 {
        f3::ADD_SUB => Ok(Op::Addi),
        f3::SLT => Ok(Op::Slti),
        f3::SLTU => Ok(Op::Sltiu),
        f3::XOR => Ok(Op::Xori),
        f3::OR => Ok(Op::Ori),
        f3::AND => Ok(Op::Andi),
        f3::SLL if shift_type == f7::SHIFT_LOGICAL => Ok(Op::Slli),
        f3::SRL_SRA if shift_type == f7::SHIFT_LOGICAL => Ok(Op::Srli),
        f3::SRL_SRA if shift_type == f7::SHIFT_ARITH => Ok(Op::Srai),
        f3::SLL | f3::SRL_SRA => Err(DecodeFaultKind::Funct7),
        _ => Err(DecodeFaultKind::Funct3),
    }
}

fn classify_op_imm_32(funct3: u32, funct7: u32) -> Result<Op, DecodeFaultKind> {
    match (funct3, funct7) {
        (f3::ADD_SUB, _) => Ok(Op::Addiw),
        (f3::SLL, f7::DEFAULT) => Ok(Op::Slliw),
        (f3::SRL_SRA, f7::DEFAULT) => Ok(Op::Srliw),
        (f3::SRL_SRA, f7::ALT) => Ok(Op::Sraiw),
        (f3::SLL | f3::SRL_SRA, _) => Err(DecodeFaultKind::Funct7),
        _ => Err(DecodeFaultKind::Funct3),
    }
}

fn classify_op_reg(funct3: u32, funct7: u32) -> Result<Op, DecodeFaultKind> {
    match funct7 {
        f7::DEFAULT => Ok(match funct3 {
            f3::ADD_SUB => Op::Add,
            f3::SLL => Op::Sll,
            f3::SLT => Op::Slt,
            f3::SLTU => Op::Sltu,
            f3::XOR => Op::Xor,
            f3::SRL_SRA => Op::Srl,
            f3::OR => Op::Or,
            _ => Op::And,
        }),
        f7::ALT => match funct3 {
            f3::ADD_SUB => Ok(Op::Sub),
            f3::SRL_SRA => Ok(Op::Sra),
            _ => Err(DecodeFaultKind::Funct3),
        },
        M_EXTENSION => Ok(match funct3 {
            m3::MUL => Op::Mul,
            m3::MULH => Op::Mulh,
            m3::MULHSU => Op::Mulhsu,
            m3::MULHU => Op::Mulhu,
            m3::DIV => Op::Div,
            m3::DIVU => Op::Divu,
            m3::REM => Op::Rem,
            _ => Op::Remu,
        }),
        _ => Err(DecodeFaultKind::Funct7),
    }
}

fn classify_op_reg_32(funct3: u32, funct7: u32) -> Result<Op, DecodeFaultKind> {
    match (funct7, funct3) {
        (f7::DEFAULT, f3::ADD_SUB) => Ok(Op::Addw),
        (f7::DEFAULT, f3::SLL) => Ok(Op::Sllw),
        (f7::DEFAULT, f3::SRL_SRA) => Ok(Op::Srlw),
        (f7::ALT, f3::ADD_SUB) => Ok(Op::Subw),
        (f7::ALT, f3::SRL_SRA) => Ok(Op::Sraw),
        (M_EXTENSION, m3::MUL) => Ok(Op::Mulw),
        (M_EXTENSION, m3::DIV) => Ok(Op::Divw),
        (M_EXTENSION, m3::DIVU) => Ok(Op::Divuw),
        (M_EXTENSION, m3::REM) => Ok(Op::Remw),
        (M_EXTENSION, m3::REMU) => Ok(Op::Remuw),
        (f7::DEFAULT | f7::ALT | M_EXTENSION, _) => Err(DecodeFaultKind::Funct3),
        _ => Err(DecodeFaultKind::Funct7),
    }
}
