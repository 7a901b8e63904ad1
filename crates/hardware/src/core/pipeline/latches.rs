//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the stage registers carried between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! 1. **Instruction Flow:** One entry type per boundary, each a value snapshot of what
//!    the consuming stage needs. An empty entry is a bubble.
//! 2. **Control Flags:** Stall, squash and cache-phase flags travel with the latch,
//!    not with the instruction, so a bubble can still carry them.
//! 3. **Fault Propagation:** A decode fault under the `halt` policy rides down the
//!    pipe and is raised only if its instruction reaches Writeback.

use crate::common::error::DecodeError;
use crate::core::pipeline::signals::Semantics;
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::instruction::Decoded;
use crate::isa::op::Op;

/// Control flags attached to a stage register.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageFlags {
    /// The consumer held this register instead of accepting a new one.
    pub stall: bool,
    /// A taken branch or jump without a prediction redirected fetch.
    pub branch: bool,
    /// A predicted path turned out wrong.
    pub wrong_prediction: bool,
    /// The entry's result may be forwarded to the next Execute.
    pub forward_tag: bool,
    /// Fetch is waiting on an instruction-cache fill.
    pub i_cache_stall: bool,
    /// Memory is waiting on a data-cache fill.
    pub d_cache_stall: bool,
    /// The fill was observed ready; commit it this cycle.
    pub first_cache_stall: bool,
}

/// A stage register: an optional instruction plus its control flags.
#[derive(Clone, Debug)]
pub struct Latch<T> {
    /// The instruction held, or `None` for a bubble.
    pub entry: Option<T>,
    /// Control flags.
    pub flags: StageFlags,
}

impl<T> Default for Latch<T> {
    fn default() -> Self {
        Self::bubble(StageFlags::default())
    }
}

impl<T> Latch<T> {
    /// A latch holding `entry` with clear flags.
    pub const fn with(entry: T) -> Self {
        Self {
            entry: Some(entry),
            flags: StageFlags {
                stall: false,
                branch: false,
                wrong_prediction: false,
                forward_tag: false,
                i_cache_stall: false,
                d_cache_stall: false,
                first_cache_stall: false,
            },
        }
    }

    /// A bubble carrying `flags`.
    pub const fn bubble(flags: StageFlags) -> Self {
        Self { entry: None, flags }
    }
}

impl<T> PipelineLatch for Latch<T> {
    fn flush(&mut self) {
        self.entry = None;
        self.flags = StageFlags::default();
    }

    fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

/// Entry in the IF/ID latch (Fetch to Decode).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Target fetch was redirected to, when the predictor supplied one.
    pub predicted: Option<u64>,
}

/// Entry in the ID/EX latch (Decode to Execute).
#[derive(Clone, Copy, Debug)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u64,
    /// Decoded operand set.
    pub decoded: Decoded,
    /// Resolved operation class.
    pub sem: Semantics,
    /// Value read (or captured) for `rs1`.
    pub rv1: u64,
    /// Value read (or captured) for `rs2`.
    pub rv2: u64,
    /// Predicted next PC, when fetch followed a prediction.
    pub predicted: Option<u64>,
    /// Decode fault carried under the `halt` policy.
    pub fault: Option<DecodeError>,
}

/// Entry in the EX/MEM latch (Execute to Memory).
#[derive(Clone, Copy, Debug)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Operation tag.
    pub op: Op,
    /// Operation class.
    pub sem: Semantics,
    /// Destination register.
    pub rd: usize,
    /// Value destined for `rd` (non-memory operations).
    pub result: u64,
    /// Effective address (loads and stores).
    pub addr: u64,
    /// Value to store (stores).
    pub store_data: u64,
    /// Decode fault carried under the `halt` policy.
    pub fault: Option<DecodeError>,
}

/// Entry in the MEM/WB latch (Memory to Writeback).
#[derive(Clone, Copy, Debug)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u64,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Operation tag.
    pub op: Op,
    /// Destination register; 0 when nothing is written.
    pub rd: usize,
    /// Final value for `rd` (loaded data or computed result).
    pub value: u64,
    /// Whether Writeback commits `value` to `rd`.
    pub writes_rd: bool,
    /// Decode fault carried under the `halt` policy.
    pub fault: Option<DecodeError>,
}

/// IF/ID stage register.
pub type IfId = Latch<IfIdEntry>;
/// ID/EX stage register.
pub type IdEx = Latch<IdExEntry>;
/// EX/MEM stage register.
pub type ExMem = Latch<ExMemEntry>;
/// MEM/WB stage register.
pub type MemWb = Latch<MemWbEntry>;

/// One complete set of stage registers.
///
/// The pipeline keeps a current and a next set; stages read current, write
/// next, and the two are swapped at the cycle boundary.
#[derive(Clone, Debug, Default)]
pub struct Latches {
    /// Fetch to Decode.
    pub if_id: IfId,
    /// Decode to Execute.
    pub id_ex: IdEx,
    /// Execute to Memory.
    pub ex_mem: ExMem,
    /// Memory to Writeback.
    pub mem_wb: MemWb,
}
