//! ABI register names.
//!
//! Index constants for the registers the loader and driver touch, plus the
//! standard mnemonic for every integer register (used by the disassembler
//! and register dumps).

/// Return address (`ra`).
pub const REG_RA: usize = 1;
/// Stack pointer (`sp`).
pub const REG_SP: usize = 2;
/// First argument / return value (`a0`).
pub const REG_A0: usize = 10;
/// System call number (`a7`).
pub const REG_A7: usize = 17;

const NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// ABI mnemonic for register `idx`, or `"?"` when out of range.
pub fn name(idx: usize) -> &'static str {
    NAMES.get(idx).copied().unwrap_or("?")
}
