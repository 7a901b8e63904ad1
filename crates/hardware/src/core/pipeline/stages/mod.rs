//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. It includes:
//! 1. **Fetch:** Reads the next word through the I-cache and predicts the next PC.
//! 2. **Decode:** Classifies the word, checks hazards and reads operands.
//! 3. **Execute:** Computes results with forwarding and resolves branches.
//! 4. **Memory:** Performs loads and stores through the D-cache.
//! 5. **Writeback:** Commits results to the register file.
//!
//! The controller calls them Writeback first, Fetch last.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
