//! ALU Tests.
//!
//! Covers wrap-around, word-form sign extension, shift-amount masking and
//! the non-trapping M-extension corner cases.

use rstest::rstest;
use rvpipe_core::core::pipeline::signals::AluOp;
use rvpipe_core::core::units::alu::Alu;

const NEG1: u64 = u64::MAX;

// ══════════════════════════════════════════════════════════
// 1. Base integer
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(AluOp::Add, NEG1, 1, false, 0)]
#[case(AluOp::Sub, 0, 1, false, NEG1)]
#[case(AluOp::Add, 0x7FFF_FFFF, 1, true, 0xFFFF_FFFF_8000_0000)]
#[case(AluOp::Sub, 0, 1, true, NEG1)]
#[case(AluOp::Slt, NEG1, 0, false, 1)]
#[case(AluOp::Sltu, NEG1, 0, false, 0)]
#[case(AluOp::Xor, 0xF0, 0xFF, false, 0x0F)]
#[case(AluOp::And, 0xF0, 0x3C, false, 0x30)]
#[case(AluOp::Or, 0xF0, 0x0F, false, 0xFF)]
fn base_ops(#[case] op: AluOp, #[case] a: u64, #[case] b: u64, #[case] word: bool, #[case] want: u64) {
    assert_eq!(Alu::execute(op, a, b, word), want, "{op:?}({a:#x}, {b:#x}, word={word})");
}

#[test]
fn shift_amount_uses_low_six_bits() {
    assert_eq!(Alu::execute(AluOp::Sll, 1, 64, false), 1);
    assert_eq!(Alu::execute(AluOp::Sll, 1, 63, false), 1 << 63);
}

#[test]
fn word_shift_uses_low_five_bits() {
    assert_eq!(Alu::execute(AluOp::Sll, 1, 32, true), 1);
    assert_eq!(Alu::execute(AluOp::Sll, 1, 31, true), 0xFFFF_FFFF_8000_0000);
}

#[test]
fn arithmetic_shift_keeps_sign() {
    assert_eq!(Alu::execute(AluOp::Sra, 0x8000_0000_0000_0000, 63, false), NEG1);
    assert_eq!(Alu::execute(AluOp::Srl, 0x8000_0000_0000_0000, 63, false), 1);
    assert_eq!(Alu::execute(AluOp::Sra, 0x8000_0000, 4, true), 0xFFFF_FFFF_F800_0000);
}

// ══════════════════════════════════════════════════════════
// 2. M extension
// ══════════════════════════════════════════════════════════

#[test]
fn multiply_high_variants() {
    assert_eq!(Alu::execute(AluOp::Mulh, NEG1, NEG1, false), 0);
    assert_eq!(Alu::execute(AluOp::Mulhu, NEG1, NEG1, false), NEG1 - 1);
    assert_eq!(Alu::execute(AluOp::Mulhsu, NEG1, 2, false), NEG1);
}

#[test]
fn signed_division_and_remainder() {
    let seven = 7u64;
    let minus_seven = (-7i64) as u64;
    assert_eq!(Alu::execute(AluOp::Div, minus_seven, 2, false), (-3i64) as u64);
    assert_eq!(Alu::execute(AluOp::Rem, minus_seven, 2, false), NEG1);
    assert_eq!(Alu::execute(AluOp::Divu, seven, 2, false), 3);
}

#[test]
fn divide_by_zero_does_not_trap() {
    assert_eq!(Alu::execute(AluOp::Div, 42, 0, false), NEG1);
    assert_eq!(Alu::execute(AluOp::Divu, 42, 0, false), NEG1);
    assert_eq!(Alu::execute(AluOp::Rem, 42, 0, false), 42);
    assert_eq!(Alu::execute(AluOp::Remu, 42, 0, false), 42);
    assert_eq!(Alu::execute(AluOp::Div, 42, 0, true), NEG1);
}

#[test]
fn signed_overflow_wraps() {
    let min = i64::MIN as u64;
    assert_eq!(Alu::execute(AluOp::Div, min, NEG1, false), min);
    assert_eq!(Alu::execute(AluOp::Rem, min, NEG1, false), 0);

    let min_w = i32::MIN as u32 as u64;
    assert_eq!(Alu::execute(AluOp::Div, min_w, NEG1, true), i32::MIN as i64 as u64);
    assert_eq!(Alu::execute(AluOp::Rem, min_w, NEG1, true), 0);
}

#[test]
fn mulw_sign_extends_low_word() {
    assert_eq!(Alu::execute(AluOp::Mul, 0x1_0000_0002, 0x4000_0000, true), 0xFFFF_FFFF_8000_0000);
}
