//! Simulation driver and program loading.
//!
//! Provides the clock-driving loop around the pipeline and utilities for
//! placing a program in memory before the first cycle.

/// Flat-binary and ELF loading.
pub mod loader;

/// The cycle loop and stop conditions.
pub mod simulator;

pub use simulator::{Simulator, StopReason};
