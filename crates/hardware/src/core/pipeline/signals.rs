//! Control signals and the per-operation dispatch table.
//!
//! Decode resolves each [`Op`] to a [`Semantics`] value once; Execute and
//! Memory then act on the class it names. It provides:
//! 1. **ALU selection:** [`AluOp`] and whether the second operand is `rs2` or the immediate.
//! 2. **Memory control:** Access width and load extension.
//! 3. **Branch control:** The comparison a conditional branch applies.
//! 4. **Register usage:** Which source registers an operation reads and whether it writes `rd`.
//! 5. **Cycle signals:** The same-cycle control record passed backwards from
//!    Memory and Execute to the younger stages.

use crate::isa::op::Op;

/// Integer ALU operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AluOp {
    /// Wrapping addition.
    #[default]
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Logical shift left.
    Sll,
    /// Signed less-than, producing 0 or 1.
    Slt,
    /// Unsigned less-than, producing 0 or 1.
    Sltu,
    /// Bitwise exclusive or.
    Xor,
    /// Logical shift right.
    Srl,
    /// Arithmetic shift right.
    Sra,
    /// Bitwise or.
    Or,
    /// Bitwise and.
    And,
    /// Product, low bits.
    Mul,
    /// Product high bits, signed by signed.
    Mulh,
    /// Product high bits, signed by unsigned.
    Mulhsu,
    /// Product high bits, unsigned by unsigned.
    Mulhu,
    /// Signed quotient.
    Div,
    /// Unsigned quotient.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

/// Width of a load or store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemWidth {
    /// One byte.
    Byte,
    /// Two bytes.
    Half,
    /// Four bytes.
    Word,
    /// Eight bytes.
    Double,
}

impl MemWidth {
    /// Access size in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }
}

/// Condition tested by a conditional branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchCond {
    /// `rs1 == rs2`.
    Eq,
    /// `rs1 != rs2`.
    Ne,
    /// Signed `rs1 < rs2`.
    Lt,
    /// Signed `rs1 >= rs2`.
    Ge,
    /// Unsigned `rs1 < rs2`.
    Ltu,
    /// Unsigned `rs1 >= rs2`.
    Geu,
}

impl BranchCond {
    /// Evaluates the condition on two register values.
    pub const fn holds(self, a: u64, b: u64) -> bool {
        match self {
            Self::Eq => a == b,
            Self::Ne => a != b,
            Self::Lt => (a as i64) < (b as i64),
            Self::Ge => (a as i64) >= (b as i64),
            Self::Ltu => a < b,
            Self::Geu => a >= b,
        }
    }
}

/// Source of the ALU's second operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBSrc {
    /// Register `rs2`.
    Reg,
    /// The decoded immediate.
    Imm,
}

/// What an operation does, as consumed by Execute and Memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Semantics {
    /// Read memory at `rs1 + imm` and extend into `rd`.
    Load {
        /// Access width.
        width: MemWidth,
        /// Sign-extend (`lb/lh/lw`) rather than zero-extend.
        signed: bool,
    },
    /// Write the low bytes of `rs2` to `rs1 + imm`.
    Store {
        /// Access width.
        width: MemWidth,
    },
    /// `rd = rs1 <op> (rs2 | imm)`.
    Alu {
        /// Operation.
        op: AluOp,
        /// Second operand source.
        src: OpBSrc,
        /// 32-bit word form: truncate operands, sign-extend the result.
        word: bool,
    },
    /// `rd = sext(imm << 12)`.
    Lui,
    /// `rd = pc + sext(imm << 12)`.
    Auipc,
    /// Redirect to `pc + imm` when the condition holds.
    Branch(BranchCond),
    /// `rd = pc + 4`, redirect to `pc + imm`.
    Jal,
    /// `rd = pc + 4`, redirect to `(rs1 + imm) & !1`.
    Jalr,
    /// Decoded but inert.
    Nop,
}

impl Semantics {
    /// True when the operation reads `rs1`.
    pub const fn reads_rs1(self) -> bool {
        !matches!(self, Self::Lui | Self::Auipc | Self::Jal | Self::Nop)
    }

    /// True when the operation reads `rs2`.
    pub const fn reads_rs2(self) -> bool {
        matches!(
            self,
            Self::Store { .. }
                | Self::Branch(_)
                | Self::Alu {
                    src: OpBSrc::Reg,
                    ..
                }
        )
    }

    /// True when the operation produces a value for `rd`.
    pub const fn writes_rd(self) -> bool {
        !matches!(self, Self::Store { .. } | Self::Branch(_) | Self::Nop)
    }
}

const fn alu(op: AluOp, src: OpBSrc, word: bool) -> Semantics {
    Semantics::Alu { op, src, word }
}

const fn load(width: MemWidth, signed: bool) -> Semantics {
    Semantics::Load { width, signed }
}

/// The operation-tag dispatch table.
pub const fn semantics(op: Op) -> Semantics {
    use AluOp as A;
    use OpBSrc::{Imm, Reg};

    match op {
        Op::Lb => load(MemWidth::Byte, true),
        Op::Lh => load(MemWidth::Half, true),
        Op::Lw => load(MemWidth::Word, true),
        Op::Ld => load(MemWidth::Double, true),
        Op::Lbu => load(MemWidth::Byte, false),
        Op::Lhu => load(MemWidth::Half, false),
        Op::Lwu => load(MemWidth::Word, false),

        Op::Sb => Semantics::Store {
            width: MemWidth::Byte,
        },
        Op::Sh => Semantics::Store {
            width: MemWidth::Half,
        },
        Op::Sw => Semantics::Store {
            width: MemWidth::Word,
        },
        Op::Sd => Semantics::Store {
            width: MemWidth::Double,
        },

        Op::Addi => alu(A::Add, Imm, false),
        Op::Slti => alu(A::Slt, Imm, false),
        Op::Sltiu => alu(A::Sltu, Imm, false),
        Op::Xori => alu(A::Xor, Imm, false),
        Op::Ori => alu(A::Or, Imm, false),
        Op::Andi => alu(A::And, Imm, false),
        Op::Slli => alu(A::Sll, Imm, false),
        Op::Srli => alu(A::Srl, Imm, false),
        Op::Srai => alu(A::Sra, Imm, false),
        Op::Addiw => alu(A::Add, Imm, true),
        Op::Slliw => alu(A::Sll, Imm, true),
        Op::Srliw => alu(A::Srl, Imm, true),
        Op::Sraiw => alu(A::Sra, Imm, true),

        Op::Add => alu(A::Add, Reg, false),
        Op::Sub => alu(A::Sub, Reg, false),
        Op::Sll => alu(A::Sll, Reg, false),
        Op::Slt => alu(A::Slt, Reg, false),
        Op::Sltu => alu(A::Sltu, Reg, false),
        Op::Xor => alu(A::Xor, Reg, false),
        Op::Srl => alu(A::Srl, Reg, false),
        Op::Sra => alu(A::Sra, Reg, false),
        Op::Or => alu(A::Or, Reg, false),
        Op::And => alu(A::And, Reg, false),
        Op::Addw => alu(A::Add, Reg, true),
        Op::Subw => alu(A::Sub, Reg, true),
        Op::Sllw => alu(A::Sll, Reg, true),
        Op::Srlw => alu(A::Srl, Reg, true),
        Op::Sraw => alu(A::Sra, Reg, true),

        Op::Mul => alu(A::Mul, Reg, false),
        Op::Mulh => alu(A::Mulh, Reg, false),
        Op::Mulhsu => alu(A::Mulhsu, Reg, false),
        Op::Mulhu => alu(A::Mulhu, Reg, false),
        Op::Div => alu(A::Div, Reg, false),
        Op::Divu => alu(A::Divu, Reg, false),
        Op::Rem => alu(A::Rem, Reg, false),
        Op::Remu => alu(A::Remu, Reg, false),
        Op::Mulw => alu(A::Mul, Reg, true),
        Op::Divw => alu(A::Div, Reg, true),
        Op::Divuw => alu(A::Divu, Reg, true),
        Op::Remw => alu(A::Rem, Reg, true),
        Op::Remuw => alu(A::Remu, Reg, true),

        Op::Lui => Semantics::Lui,
        Op::Auipc => Semantics::Auipc,

        Op::Beq => Semantics::Branch(BranchCond::Eq),
        Op::Bne => Semantics::Branch(BranchCond::Ne),
        Op::Blt => Semantics::Branch(BranchCond::Lt),
        Op::Bge => Semantics::Branch(BranchCond::Ge),
        Op::Bltu => Semantics::Branch(BranchCond::Ltu),
        Op::Bgeu => Semantics::Branch(BranchCond::Geu),
        Op::Jal => Semantics::Jal,
        Op::Jalr => Semantics::Jalr,

        Op::Fence
        | Op::FenceI
        | Op::Ecall
        | Op::Ebreak
        | Op::Csrrw
        | Op::Csrrs
        | Op::Csrrc
        | Op::Csrrwi
        | Op::Csrrsi
        | Op::Csrrci
        | Op::Illegal => Semantics::Nop,
    }
}

/// Control raised by an older stage and consumed by younger ones in the same cycle.
///
/// Stages run Writeback first and Fetch last, so each stage sees what the
/// stages after it in program order decided this cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleSignals {
    /// Execute resolved a different next PC; Decode and Fetch squash.
    pub redirect: Option<u64>,
    /// Decode is holding its instruction for a hazard; Fetch holds too.
    pub decode_stall: bool,
    /// Memory is waiting on the D-cache or a retried store; Execute, Decode and Fetch freeze.
    pub mem_busy: bool,
}
