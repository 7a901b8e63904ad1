//! Shifts.
//!
//! The shift amount comes from the low 6 bits of `b` (5 bits for word forms).

use super::sext32;
use crate::core::pipeline::signals::AluOp;

/// Shift-amount mask for 64-bit shifts.
const SHAMT_MASK: u64 = 0x3F;

/// Shift-amount mask for word shifts.
const SHAMT_MASK_W: u64 = 0x1F;

/// Executes `sll`, `srl` or `sra`; other operations yield 0.
pub fn execute(op: AluOp, a: u64, b: u64, word: bool) -> u64 {
    if word {
        let sh = (b & SHAMT_MASK_W) as u32;
        let lo = a as u32;
        let r = match op {
            AluOp::Sll => lo << sh,
            AluOp::Srl => lo >> sh,
            AluOp::Sra => ((lo as i32) >> sh) as u32,
            _ => return 0,
        };
        sext32(u64::from(r))
    } else {
        let sh = (b & SHAMT_MASK) as u32;
        match op {
            AluOp::Sll => a << sh,
            AluOp::Srl => a >> sh,
            AluOp::Sra => ((a as i64) >> sh) as u64,
            _ => 0,
        }
    }
}
