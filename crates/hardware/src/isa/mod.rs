//! Instruction set definitions.
//!
//! Encodings, decoding and disassembly for RV64I, the M extension, and the
//! system instructions this core treats as no-ops.

/// Register ABI names.
pub mod abi;

/// Word → operation-tag decoder and immediate extraction.
pub mod decode;

/// Assembler-syntax rendering for traces and the CLI.
pub mod disasm;

/// Raw field accessors and the decoded operand set.
pub mod instruction;

/// The operation tag enum.
pub mod op;

/// System opcode and CSR funct3 values.
pub mod privileged;

/// Base integer encodings.
pub mod rv64i;

/// Multiply/divide encodings.
pub mod rv64m;

pub use decode::decode;
pub use instruction::Decoded;
pub use op::Op;
