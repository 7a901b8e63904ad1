//! Platform side of the simulator.
//!
//! This module organizes everything the core sees through the [`Platform`]
//! interface: the trait itself, reference RAM with its latency models, and the
//! `System` that binds them to the register file and PC.

/// Reference system assembly.
pub mod builder;

/// Main memory and latency controllers.
pub mod memory;

/// The platform interface the core runs against.
pub mod traits;

pub use builder::System;
pub use traits::Platform;
