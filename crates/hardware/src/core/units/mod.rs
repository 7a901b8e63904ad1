//! Functional units used by the pipeline stages.

/// Integer ALU.
pub mod alu;

/// Branch prediction (BTB and static policies).
pub mod bru;

/// Instruction and data caches.
pub mod cache;
