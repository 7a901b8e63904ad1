//! Architectural constants.

/// Width of a RISC-V instruction word in bytes.
pub const INSTRUCTION_BYTES: u64 = 4;

/// Number of general-purpose registers.
pub const NUM_GPRS: usize = 32;

/// Index of the hard-wired zero register.
pub const REG_ZERO: usize = 0;

/// Mask applied to the `jalr` target to clear bit 0.
pub const JALR_TARGET_MASK: u64 = !1;

/// Field kept by `lui`/`auipc`: the shifted U-immediate, zero-extended from 32 bits.
pub const UPPER_IMM_MASK: u64 = 0xFFFF_F000;
