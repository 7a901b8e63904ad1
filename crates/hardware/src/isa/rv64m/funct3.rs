//! M extension funct3 values.
//!
//! Under `OP_REG_32` only `MUL`, `DIV`, `DIVU`, `REM` and `REMU` are valid.

/// Low 64 bits of the product.
pub const MUL: u32 = 0b000;
/// High bits, signed by signed.
pub const MULH: u32 = 0b001;
/// High bits, signed by unsigned.
pub const MULHSU: u32 = 0b010;
/// High bits, unsigned by unsigned.
pub const MULHU: u32 = 0b011;
/// Signed quotient.
pub const DIV: u32 = 0b100;
/// Unsigned quotient.
pub const DIVU: u32 = 0b101;
/// Signed remainder.
pub const REM: u32 = 0b110;
/// Unsigned remainder.
pub const REMU: u32 = 0b111;
