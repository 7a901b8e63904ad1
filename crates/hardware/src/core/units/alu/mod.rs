//! Integer ALU.
//!
//! Computes every RV64IM register result. Operations are grouped by kind:
//! - [`arithmetic`]: add and subtract
//! - [`muldiv`]:     the M extension
//! - [`logic`]:      bitwise operations and set-less-than
//! - [`shifts`]:     logical and arithmetic shifts
//!
//! Word forms (`addw`, `sllw`, `mulw`, ...) compute on the low 32 bits of each
//! operand and sign-extend bit 31 of the result.

/// Add and subtract.
pub mod arithmetic;

/// Bitwise operations and comparisons.
pub mod logic;

/// Multiply, divide and remainder.
pub mod muldiv;

/// Shifts.
pub mod shifts;

use crate::core::pipeline::signals::AluOp;

/// Sign-extends bit 31 of `v` into the upper half.
#[inline(always)]
pub const fn sext32(v: u64) -> u64 {
    v as i32 as i64 as u64
}

/// Stateless integer ALU.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes `op` on `a` and `b`.
    ///
    /// # Arguments
    ///
    /// * `op`   - The operation.
    /// * `a`    - First operand (`rs1`).
    /// * `b`    - Second operand (`rs2` or the immediate; the shift amount for shifts).
    /// * `word` - Compute the 32-bit form and sign-extend its result.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::alu::Alu;
    /// use rvpipe_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8, false), 50);
    /// assert_eq!(Alu::execute(AluOp::Add, 0x7FFF_FFFF, 1, true), 0xFFFF_FFFF_8000_0000);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i64 as u64, 10, false), 1);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64, word: bool) -> u64 {
        match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b, word),
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b, word),
            AluOp::Slt | AluOp::Sltu | AluOp::Xor | AluOp::Or | AluOp::And => {
                logic::execute(op, a, b)
            }
            AluOp::Mul
            | AluOp::Mulh
            | AluOp::Mulhsu
            | AluOp::Mulhu
            | AluOp::Div
            | AluOp::Divu
            | AluOp::Rem
            | AluOp::Remu => muldiv::execute(op, a, b, word),
        }
    }
}
