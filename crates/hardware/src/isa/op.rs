//! Operation tags.
//!
//! Every supported instruction collapses to one [`Op`] after decode. The
//! pipeline dispatches on the tag (see `core::pipeline::signals::semantics`)
//! rather than re-inspecting opcode and function fields in each stage.

use std::fmt;

/// Encoding format of an instruction, as chosen by its major opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Register-register.
    R,
    /// Register-immediate, loads, `jalr`, system.
    I,
    /// Stores.
    S,
    /// Conditional branches.
    B,
    /// `lui`, `auipc`.
    U,
    /// `jal`.
    J,
}

/// One supported RV64IM (plus no-op system) operation.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    // Loads
    Lb,
    Lh,
    Lw,
    Ld,
    Lbu,
    Lhu,
    Lwu,

    // Stores
    Sb,
    Sh,
    Sw,
    Sd,

    // Register-immediate
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    Addiw,
    Slliw,
    Srliw,
    Sraiw,

    // Register-register
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    Addw,
    Subw,
    Sllw,
    Srlw,
    Sraw,

    // M extension
    Mul,
    Mulh,
    Mulhsu,
    Mulhu,
    Div,
    Divu,
    Rem,
    Remu,
    Mulw,
    Divw,
    Divuw,
    Remw,
    Remuw,

    // Upper immediate
    Lui,
    Auipc,

    // Control transfer
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Jal,
    Jalr,

    // Architectural no-ops
    Fence,
    FenceI,
    Ecall,
    Ebreak,
    Csrrw,
    Csrrs,
    Csrrc,
    Csrrwi,
    Csrrsi,
    Csrrci,

    /// Stand-in for a word that failed to decode; behaves as a no-op.
    Illegal,
}

impl Op {
    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Lb => "lb",
            Self::Lh => "lh",
            Self::Lw => "lw",
            Self::Ld => "ld",
            Self::Lbu => "lbu",
            Self::Lhu => "lhu",
            Self::Lwu => "lwu",
            Self::Sb => "sb",
            Self::Sh => "sh",
            Self::Sw => "sw",
            Self::Sd => "sd",
            Self::Addi => "addi",
            Self::Slti => "slti",
            Self::Sltiu => "sltiu",
            Self::Xori => "xori",
            Self::Ori => "ori",
            Self::Andi => "andi",
            Self::Slli => "slli",
            Self::Srli => "srli",
            Self::Srai => "srai",
            Self::Addiw => "addiw",
            Self::Slliw => "slliw",
            Self::Srliw => "srliw",
            Self::Sraiw => "sraiw",
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Slt => "slt",
            Self::Sltu => "sltu",
            Self::Xor => "xor",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::Or => "or",
            Self::And => "and",
            Self::Addw => "addw",
            Self::Subw => "subw",
            Self::Sllw => "sllw",
            Self::Srlw => "srlw",
            Self::Sraw => "sraw",
            Self::Mul => "mul",
            Self::Mulh => "mulh",
            Self::Mulhsu => "mulhsu",
            Self::Mulhu => "mulhu",
            Self::Div => "div",
            Self::Divu => "divu",
            Self::Rem => "rem",
            Self::Remu => "remu",
            Self::Mulw => "mulw",
            Self::Divw => "divw",
            Self::Divuw => "divuw",
            Self::Remw => "remw",
            Self::Remuw => "remuw",
            Self::Lui => "lui",
            Self::Auipc => "auipc",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Bltu => "bltu",
            Self::Bgeu => "bgeu",
            Self::Jal => "jal",
            Self::Jalr => "jalr",
            Self::Fence => "fence",
            Self::FenceI => "fence.i",
            Self::Ecall => "ecall",
            Self::Ebreak => "ebreak",
            Self::Csrrw => "csrrw",
            Self::Csrrs => "csrrs",
            Self::Csrrc => "csrrc",
            Self::Csrrwi => "csrrwi",
            Self::Csrrsi => "csrrsi",
            Self::Csrrci => "csrrci",
            Self::Illegal => "illegal",
        }
    }

    /// Encoding format the operation is written in.
    pub const fn format(self) -> Format {
        match self {
            Self::Add
            | Self::Sub
            | Self::Sll
            | Self::Slt
            | Self::Sltu
            | Self::Xor
            | Self::Srl
            | Self::Sra
            | Self::Or
            | Self::And
            | Self::Addw
            | Self::Subw
            | Self::Sllw
            | Self::Srlw
            | Self::Sraw
            | Self::Mul
            | Self::Mulh
            | Self::Mulhsu
            | Self::Mulhu
            | Self::Div
            | Self::Divu
            | Self::Rem
            | Self::Remu
            | Self::Mulw
            | Self::Divw
            | Self::Divuw
            | Self::Remw
            | Self::Remuw => Format::R,
            Self::Sb | Self::Sh | Self::Sw | Self::Sd => Format::S,
            Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Bltu | Self::Bgeu => Format::B,
            Self::Lui | Self::Auipc => Format::U,
            Self::Jal => Format::J,
            _ => Format::I,
        }
    }

    /// True for the loads.
    pub const fn is_load(self) -> bool {
        matches!(
            self,
            Self::Lb | Self::Lh | Self::Lw | Self::Ld | Self::Lbu | Self::Lhu | Self::Lwu
        )
    }

    /// True for the stores.
    pub const fn is_store(self) -> bool {
        matches!(self, Self::Sb | Self::Sh | Self::Sw | Self::Sd)
    }

    /// True for the six conditional branches.
    pub const fn is_branch(self) -> bool {
        matches!(self.format(), Format::B)
    }

    /// True for the decoded-but-inert system operations (and the illegal stand-in).
    pub const fn is_system(self) -> bool {
        matches!(
            self,
            Self::Fence
                | Self::FenceI
                | Self::Ecall
                | Self::Ebreak
                | Self::Csrrw
                | Self::Csrrs
                | Self::Csrrc
                | Self::Csrrwi
                | Self::Csrrsi
                | Self::Csrrci
                | Self::Illegal
        )
    }

    /// True for the operations that halt the reference driver when they retire.
    pub const fn is_environment_call(self) -> bool {
        matches!(self, Self::Ecall | Self::Ebreak)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
