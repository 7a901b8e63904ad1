//! Core processor implementation.
//!
//! This module contains the pipelined core: the stage registers and their
//! controller, and the execution units the stages drive (ALU, branch
//! prediction, caches). Architectural state lives behind [`crate::soc::Platform`].

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, branch predictor, caches).
pub mod units;

pub use self::pipeline::Pipeline;
