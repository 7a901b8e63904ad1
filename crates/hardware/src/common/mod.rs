//! Common types shared by every part of the simulator.
//!
//! It provides:
//! 1. **Constants:** Architectural widths and register counts.
//! 2. **Errors:** Decode faults, memory faults, and the top-level simulator error.
//! 3. **Registers:** The reference general-purpose register file.

/// Architectural constants (instruction width, register count).
pub mod constants;

/// Error types for decode, memory, configuration, and loading failures.
pub mod error;

/// General-purpose register file with `x0` hard-wired to zero.
pub mod reg;

pub use error::{ConfigError, DecodeError, LoadError, MemoryFault, SimError};
pub use reg::RegisterFile;
