/// Instruction encoders.
pub mod builder;

/// Simulator harness.
pub mod harness;

/// Platform doubles.
pub mod mocks;
