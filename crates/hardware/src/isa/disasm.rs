//! Instruction disassembler.
//!
//! Renders an instruction word in assembler syntax for trace logs and the
//! `disasm` CLI command. Undecodable words render as `.word 0x...`.
//!
//! ```
//! use rvpipe_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00a0_0293), "addi x5, x0, 10");
//! ```

use super::decode::decode;
use super::instruction::Decoded;
use super::op::{Format, Op};

/// Disassembles `inst` into a single line of assembly.
pub fn disassemble(inst: u32) -> String {
    decode(inst, 0).map_or_else(|_| format!(".word {inst:#010x}"), |d| render(&d))
}

/// Renders an already-decoded instruction.
pub fn render(d: &Decoded) -> String {
    let m = d.op.mnemonic();
    match d.op.format() {
        Format::R => format!("{m} x{}, x{}, x{}", d.rd, d.rs1, d.rs2),
        Format::S => format!("{m} x{}, {}(x{})", d.rs2, d.imm, d.rs1),
        Format::B => format!("{m} x{}, x{}, {}", d.rs1, d.rs2, d.imm),
        Format::U => format!("{m} x{}, {:#x}", d.rd, d.imm as u64 & 0xF_FFFF),
        Format::J => format!("{m} x{}, {}", d.rd, d.imm),
        Format::I if d.op.is_load() || d.op == Op::Jalr => {
            format!("{m} x{}, {}(x{})", d.rd, d.imm, d.rs1)
        }
        Format::I if d.op.is_system() => m.to_string(),
        Format::I => format!("{m} x{}, x{}, {}", d.rd, d.rs1, d.imm),
    }
}
