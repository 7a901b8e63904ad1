//! Cycle-level pipelined RV64IM core simulator library.
//!
//! This crate implements a five-stage in-order RISC-V core with the following:
//! 1. **Core:** Fetch, decode, execute, memory and writeback stages with forwarding,
//!    load-use stalls, a BTB-backed static branch predictor and wrong-path squash.
//! 2. **Caches:** Direct-mapped I-cache and D-cache with a two-phase fill protocol.
//! 3. **ISA:** Decoding, execution semantics and disassembly for RV64I and the M extension.
//! 4. **Platform:** The trait the core runs against, plus a reference RAM and register file.
//! 5. **Simulation:** Loader, configuration, and statistics collection.

/// Common types and constants (errors, registers, architectural widths).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Pipelined core (stages, latches, hazards, ALU, predictor, caches).
pub mod core;
/// Instruction set (decode, operations, ABI names, disassembly).
pub mod isa;
/// Simulation driver and program loader.
pub mod sim;
/// Platform trait and reference system (memory, registers, PC).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// The pipelined core; advance it with `Pipeline::advance_cycle`.
pub use crate::core::Pipeline;
/// Driver owning a pipeline, a system and statistics.
pub use crate::sim::Simulator;
/// Reference platform; construct with `System::new`.
pub use crate::soc::{Platform, System};
