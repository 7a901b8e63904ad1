//! Bitwise operations and set-less-than.
//!
//! RV64 has no word forms of these, so the `word` flag never reaches here.

use crate::core::pipeline::signals::AluOp;

/// Executes a bitwise or comparison operation; comparisons produce 0 or 1.
pub fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::Xor => a ^ b,
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Slt => u64::from((a as i64) < (b as i64)),
        AluOp::Sltu => u64::from(a < b),
        _ => 0,
    }
}
