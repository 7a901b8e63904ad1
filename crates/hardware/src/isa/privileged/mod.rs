//! System-instruction encodings.
//!
//! These decode to architectural no-ops in this core; the encodings are kept
//! so that the decoder can classify them instead of faulting.

/// `OP_SYSTEM`, environment-call immediates and CSR funct3 values.
pub mod opcodes;
