//! RV64I base integer encodings.
//!
//! - `opcodes`: major opcodes (bits 6:0).
//! - `funct3`: minor opcodes (bits 14:12), grouped by major opcode.
//! - `funct7`: R-type selector (bits 31:25) and the shift-type field of I-type shifts.

/// Minor opcode values.
pub mod funct3;

/// funct7 selector values.
pub mod funct7;

/// Major opcode values.
pub mod opcodes;
