//! Addition and subtraction.

use super::sext32;
use crate::core::pipeline::signals::AluOp;

/// Wrapping add or subtract; other operations yield 0.
pub fn execute(op: AluOp, a: u64, b: u64, word: bool) -> u64 {
    let full = match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        _ => return 0,
    };
    // The low 32 bits of a 64-bit add equal the 32-bit add.
    if word { sext32(full) } else { full }
}
