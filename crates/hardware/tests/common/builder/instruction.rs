//! Encoders for RV64IM instruction words.
//!
//! Immediates are byte offsets as an assembler would take them; the encoders
//! scatter the bits into the format's positions.

use rvpipe_core::isa::privileged::opcodes::{EBREAK, ECALL};
use rvpipe_core::isa::rv64i::funct7::{ALT, DEFAULT};
use rvpipe_core::isa::rv64i::opcodes::*;
use rvpipe_core::isa::rv64m::opcodes::M_EXTENSION;

pub fn r_type(opcode: u32, funct3: u32, funct7: u32, rd: u32, rs1: u32, rs2: u32) -> u32 {
    (funct7 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

pub fn i_type(opcode: u32, funct3: u32, rd: u32, rs1: u32, imm: i32) -> u32 {
    (((imm as u32) & 0xFFF) << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

pub fn s_type(funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = imm as u32;
    (((imm >> 5) & 0x7F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (funct3 << 12)
        | ((imm & 0x1F) << 7)
        | OP_STORE
}

pub fn b_type(funct3: u32, rs1: u32, rs2: u32, offset: i32) -> u32 {
    let imm = offset as u32;
    (((imm >> 12) & 0x1) << 31)
        | (((imm >> 5) & 0x3F) << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (funct3 << 12)
        | (((imm >> 1) & 0xF) << 8)
        | (((imm >> 11) & 0x1) << 7)
        | OP_BRANCH
}

pub fn u_type(opcode: u32, rd: u32, imm20: u32) -> u32 {
    ((imm20 & 0xF_FFFF) << 12) | (rd << 7) | opcode
}

pub fn j_type(rd: u32, offset: i32) -> u32 {
    let imm = offset as u32;
    (((imm >> 20) & 0x1) << 31)
        | (((imm >> 1) & 0x3FF) << 21)
        | (((imm >> 11) & 0x1) << 20)
        | (((imm >> 12) & 0xFF) << 12)
        | (rd << 7)
        | OP_JAL
}

// --- Register-immediate ---

pub fn addi(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(OP_IMM, 0b000, rd, rs1, imm)
}

pub fn andi(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(OP_IMM, 0b111, rd, rs1, imm)
}

pub fn slli(rd: u32, rs1: u32, shamt: u32) -> u32 {
    i_type(OP_IMM, 0b001, rd, rs1, (shamt & 0x3F) as i32)
}

pub fn srai(rd: u32, rs1: u32, shamt: u32) -> u32 {
    i_type(OP_IMM, 0b101, rd, rs1, ((0b01_0000 << 6) | (shamt & 0x3F)) as i32)
}

pub fn addiw(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(OP_IMM_32, 0b000, rd, rs1, imm)
}

pub fn nop() -> u32 {
    addi(0, 0, 0)
}

// --- Register-register ---

pub fn add(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP_REG, 0b000, DEFAULT, rd, rs1, rs2)
}

pub fn sub(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP_REG, 0b000, ALT, rd, rs1, rs2)
}

pub fn slt(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP_REG, 0b010, DEFAULT, rd, rs1, rs2)
}

pub fn addw(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP_REG_32, 0b000, DEFAULT, rd, rs1, rs2)
}

pub fn mul(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP_REG, 0b000, M_EXTENSION, rd, rs1, rs2)
}

pub fn div(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP_REG, 0b100, M_EXTENSION, rd, rs1, rs2)
}

pub fn remu(rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(OP_REG, 0b111, M_EXTENSION, rd, rs1, rs2)
}

// --- Memory ---

pub fn lb(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(OP_LOAD, 0b000, rd, rs1, imm)
}

pub fn lw(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(OP_LOAD, 0b010, rd, rs1, imm)
}

pub fn ld(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(OP_LOAD, 0b011, rd, rs1, imm)
}

pub fn lbu(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(OP_LOAD, 0b100, rd, rs1, imm)
}

pub fn sb(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(0b000, rs1, rs2, imm)
}

pub fn sw(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(0b010, rs1, rs2, imm)
}

pub fn sd(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(0b011, rs1, rs2, imm)
}

// --- Control transfer ---

pub fn beq(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(0b000, rs1, rs2, offset)
}

pub fn bne(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(0b001, rs1, rs2, offset)
}

pub fn blt(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(0b100, rs1, rs2, offset)
}

pub fn jal(rd: u32, offset: i32) -> u32 {
    j_type(rd, offset)
}

pub fn jalr(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(OP_JALR, 0b000, rd, rs1, imm)
}

// --- Upper immediate ---

pub fn lui(rd: u32, imm20: u32) -> u32 {
    u_type(OP_LUI, rd, imm20)
}

pub fn auipc(rd: u32, imm20: u32) -> u32 {
    u_type(OP_AUIPC, rd, imm20)
}

// --- System ---

pub const fn ecall() -> u32 {
    ECALL
}

pub const fn ebreak() -> u32 {
    EBREAK
}
