//! `OP_SYSTEM` encodings.

/// Major opcode for `ecall`, `ebreak` and the `csr*` family.
pub const OP_SYSTEM: u32 = 0b111_0011;

/// funct3 shared by `ecall` and `ebreak`; the I-immediate tells them apart.
pub const PRIV: u32 = 0b000;

/// I-immediate of `ecall`.
pub const IMM_ECALL: u32 = 0x000;

/// I-immediate of `ebreak`.
pub const IMM_EBREAK: u32 = 0x001;

/// Full encoding of `ecall`.
pub const ECALL: u32 = 0x0000_0073;

/// Full encoding of `ebreak`.
pub const EBREAK: u32 = 0x0010_0073;

/// `csrrw`.
pub const CSRRW: u32 = 0b001;
/// `csrrs`.
pub const CSRRS: u32 = 0b010;
/// `csrrc`.
pub const CSRRC: u32 = 0b011;
/// `csrrwi`.
pub const CSRRWI: u32 = 0b101;
/// `csrrsi`.
pub const CSRRSI: u32 = 0b110;
/// `csrrci`.
pub const CSRRCI: u32 = 0b111;
