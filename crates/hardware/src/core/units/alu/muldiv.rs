//! M extension: multiply, divide and remainder.
//!
//! Operands are treated per the mnemonic: `div`/`rem` are signed, `divu`/`remu`
//! unsigned. Division never traps. A zero divisor yields all ones for the
//! quotient and the dividend for the remainder; signed overflow
//! (`MIN / -1`) yields `MIN` and a remainder of zero.

use super::sext32;
use crate::core::pipeline::signals::AluOp;

/// Executes an M-extension operation; other operations yield 0.
pub fn execute(op: AluOp, a: u64, b: u64, word: bool) -> u64 {
    if word { execute_word(op, a, b) } else { execute_double(op, a, b) }
}

fn execute_double(op: AluOp, a: u64, b: u64) -> u64 {
    let (sa, sb) = (a as i64, b as i64);
    match op {
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Mulh => ((i128::from(sa) * i128::from(sb)) >> 64) as u64,
        AluOp::Mulhsu => ((i128::from(sa) * (u128::from(b) as i128)) >> 64) as u64,
        AluOp::Mulhu => ((u128::from(a) * u128::from(b)) >> 64) as u64,
        AluOp::Div if b == 0 => u64::MAX,
        AluOp::Div => sa.wrapping_div(sb) as u64,
        AluOp::Divu => a.checked_div(b).unwrap_or(u64::MAX),
        AluOp::Rem if b == 0 => a,
        AluOp::Rem => sa.wrapping_rem(sb) as u64,
        AluOp::Remu => a.checked_rem(b).unwrap_or(a),
        _ => 0,
    }
}

fn execute_word(op: AluOp, a: u64, b: u64) -> u64 {
    let (sa, sb) = (a as i32, b as i32);
    let (ua, ub) = (a as u32, b as u32);
    let r = match op {
        AluOp::Mul => ua.wrapping_mul(ub),
        AluOp::Div if sb == 0 => u32::MAX,
        AluOp::Div => sa.wrapping_div(sb) as u32,
        AluOp::Divu => ua.checked_div(ub).unwrap_or(u32::MAX),
        AluOp::Rem if sb == 0 => ua,
        AluOp::Rem => sa.wrapping_rem(sb) as u32,
        AluOp::Remu => ua.checked_rem(ub).unwrap_or(ua),
        _ => return 0,
    };
    sext32(u64::from(r))
}
