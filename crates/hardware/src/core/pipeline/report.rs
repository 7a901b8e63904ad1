//! Per-cycle report returned by `Pipeline::advance_cycle`.
//!
//! The report is the only thing a driver needs to follow execution: what
//! retired, why the pipeline stalled, and whether the wrong path was squashed.

use crate::common::error::DecodeError;
use crate::isa::op::Op;

/// An instruction leaving Writeback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retired {
    /// Address of the instruction.
    pub pc: u64,
    /// Raw encoding.
    pub inst: u32,
    /// Operation tag.
    pub op: Op,
    /// Register written, if any.
    pub rd: Option<usize>,
    /// Value written to `rd` (zero when nothing was written).
    pub value: u64,
}

/// Why a stage did not advance this cycle, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StallCause {
    /// Memory is waiting on a D-cache fill.
    DataCache,
    /// A backing-store access failed and will be retried.
    MemoryFault,
    /// Decode held an instruction behind a load.
    LoadUse,
    /// Decode held a store whose value is being loaded.
    StoreSource,
    /// Fetch is waiting on an I-cache fill.
    InstructionCache,
}

/// Every stall raised during one cycle.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stalls {
    /// D-cache fill outstanding.
    pub dcache: bool,
    /// Memory fault to be retried.
    pub memory_fault: bool,
    /// Load-use hazard.
    pub load_use: bool,
    /// Store-source hazard.
    pub store_source: bool,
    /// I-cache fill outstanding.
    pub icache: bool,
}

impl Stalls {
    /// The dominant cause, if any stall was raised.
    pub const fn cause(&self) -> Option<StallCause> {
        if self.dcache {
            Some(StallCause::DataCache)
        } else if self.memory_fault {
            Some(StallCause::MemoryFault)
        } else if self.load_use {
            Some(StallCause::LoadUse)
        } else if self.store_source {
            Some(StallCause::StoreSource)
        } else if self.icache {
            Some(StallCause::InstructionCache)
        } else {
            None
        }
    }
}

/// How Execute redirected fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// A taken branch that had no prediction.
    Taken,
    /// A prediction that did not match the resolved next PC.
    Mispredicted,
    /// An unconditional jump (`jal`/`jalr`).
    Jump,
}

/// A conditional branch resolved in Execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Address of the branch.
    pub pc: u64,
    /// Whether the condition held.
    pub taken: bool,
    /// Whether fetch followed a predicted target.
    pub predicted: bool,
    /// Whether fetch continued on the correct path.
    pub correct: bool,
}

/// What happened in one cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleReport {
    /// Cycle number, starting at one.
    pub cycle: u64,
    /// The instruction that left Writeback.
    pub retired: Option<Retired>,
    /// Stalls raised this cycle.
    pub stalls: Stalls,
    /// Redirect applied at the end of the cycle.
    pub redirect: Option<Redirect>,
    /// Wrong-path instructions discarded by the redirect.
    pub squashed: usize,
    /// Conditional branch resolved this cycle.
    pub branch: Option<BranchOutcome>,
    /// Decode fault absorbed under the `nop` policy.
    pub decode_fault: Option<DecodeError>,
}

impl CycleReport {
    /// The dominant stall cause, if any.
    pub const fn stall(&self) -> Option<StallCause> {
        self.stalls.cause()
    }

    /// True when fetch was redirected and the wrong path squashed.
    pub const fn squash(&self) -> bool {
        self.redirect.is_some()
    }
}
