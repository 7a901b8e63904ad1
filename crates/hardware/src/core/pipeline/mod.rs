//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Engine:** The controller that owns the stage registers and sequences a cycle.
//! 2. **Hazards:** Load-use detection and operand forwarding.
//! 3. **Latches:** Inter-stage buffers for communication between pipeline stages.
//! 4. **Report:** The per-cycle summary returned to the driver.
//! 5. **Signals:** The operation dispatch table and same-cycle control signals.
//! 6. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.
//! 7. **Traits:** Common interface for pipeline latches.

/// Pipeline controller.
pub mod engine;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

/// Per-cycle retirement and stall report.
pub mod report;

/// Control signals generated during instruction decode.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;

pub use engine::Pipeline;
pub use report::{CycleReport, Retired, StallCause};
