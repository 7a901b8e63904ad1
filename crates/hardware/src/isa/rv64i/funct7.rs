//! RV64I funct7 values (instruction bits 31:25).

/// Base encoding (`add`, `srl`, `sll`, ...).
pub const DEFAULT: u32 = 0b000_0000;

/// Alternate encoding selecting `sub` and `sra`.
pub const ALT: u32 = 0b010_0000;

/// `srai` on RV64 keeps only bits 31:26 as its selector; bit 25 is shamt[5].
pub const SHIFT_TYPE_SHIFT: u32 = 26;

/// Shift-type value for `srli`/`slli` (upper six bits of funct7).
pub const SHIFT_LOGICAL: u32 = 0b00_0000;

/// Shift-type value for `srai` (upper six bits of funct7).
pub const SHIFT_ARITH: u32 = 0b01_0000;
