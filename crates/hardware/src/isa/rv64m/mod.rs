//! M extension encodings.
//!
//! Multiply and divide reuse `OP_REG`/`OP_REG_32` and are selected by
//! `funct7 == M_EXTENSION`; funct3 then picks the operation.

/// Operation selectors.
pub mod funct3;

/// The funct7 selector.
pub mod opcodes;
