//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Identifies load-use and store-source hazards that require a stall.
//! 2. **Operand Forwarding:** Resolves Read-After-Write (RAW) hazards by bypassing the register file.
//!
//! Only a load in Execute forces a stall: its value exists one stage too late
//! for the dependent instruction's Execute. Every other producer is bypassed.

use crate::common::constants::REG_ZERO;
use crate::core::pipeline::latches::{ExMem, IdEx, MemWb};
use crate::core::pipeline::signals::Semantics;
use crate::isa::instruction::Decoded;

/// A dependency that Decode must stall on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hazard {
    /// A source of the decoding instruction is loaded by the instruction in Execute.
    LoadUse {
        /// The contended register.
        reg: usize,
    },
    /// A store's value operand is loaded by the instruction in Execute.
    StoreSource {
        /// The contended register.
        reg: usize,
    },
}

/// Where a resolved operand came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    /// The value read (or captured) at Decode.
    RegFile,
    /// The EX/MEM latch (previous cycle's Execute result).
    ExMem,
    /// The MEM/WB latch (two-deep lookback, including load results).
    MemWb,
}

/// Checks if a pipeline stall is needed due to a load in Execute.
///
/// # Arguments
///
/// * `id_ex`    - The ID/EX latch holding the instruction currently in Execute.
/// * `consumer` - The instruction being decoded.
/// * `sem`      - The consumer's operation class (decides which sources are real).
///
/// # Returns
///
/// The hazard to stall on, or `None` if Decode may proceed.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::hazards::{detect, Hazard};
/// use rvpipe_core::core::pipeline::latches::{IdEx, IdExEntry};
/// use rvpipe_core::core::pipeline::signals::semantics;
/// use rvpipe_core::isa::decode;
///
/// // ld x1, 0(x2) in Execute, add x3, x1, x1 in Decode.
/// let ld = decode(0x0001_3083, 0).unwrap();
/// let add = decode(0x0010_81b3, 4).unwrap();
/// let id_ex = IdEx::with(IdExEntry {
///     pc: 0,
///     decoded: ld,
///     sem: semantics(ld.op),
///     rv1: 0,
///     rv2: 0,
///     predicted: None,
///     fault: None,
/// });
///
/// assert_eq!(detect(&id_ex, &add, semantics(add.op)), Some(Hazard::LoadUse { reg: 1 }));
/// ```
pub fn detect(id_ex: &IdEx, consumer: &Decoded, sem: Semantics) -> Option<Hazard> {
    let producer = id_ex.entry.as_ref()?;
    if !matches!(producer.sem, Semantics::Load { .. }) {
        return None;
    }
    let rd = producer.decoded.rd;
    if rd == REG_ZERO {
        return None;
    }

    let rs1_hit = sem.reads_rs1() && consumer.rs1 == rd;
    let rs2_hit = sem.reads_rs2() && consumer.rs2 == rd;

    match sem {
        Semantics::Store { .. } if rs2_hit && !rs1_hit => Some(Hazard::StoreSource { reg: rd }),
        _ if rs1_hit || rs2_hit => Some(Hazard::LoadUse { reg: rd }),
        _ => None,
    }
}

/// Resolves one source operand through the bypass network.
///
/// The EX/MEM latch wins over MEM/WB because it holds the younger producer.
/// EX/MEM only forwards entries carrying `forward_tag` (non-load results);
/// MEM/WB forwards any committed register value, loads included.
///
/// # Arguments
///
/// * `reg`      - Source register index.
/// * `fallback` - Value read at Decode.
/// * `ex_mem`   - Current EX/MEM latch.
/// * `mem_wb`   - Current MEM/WB latch.
///
/// # Returns
///
/// The freshest value and where it came from.
pub fn forward_operand(
    reg: usize,
    fallback: u64,
    ex_mem: &ExMem,
    mem_wb: &MemWb,
) -> (u64, ForwardSource) {
    if reg == REG_ZERO {
        return (0, ForwardSource::RegFile);
    }
    if ex_mem.flags.forward_tag {
        if let Some(e) = ex_mem.entry.as_ref().filter(|e| e.rd == reg) {
            return (e.result, ForwardSource::ExMem);
        }
    }
    if let Some(w) = mem_wb
        .entry
        .as_ref()
        .filter(|w| w.writes_rd && w.rd == reg)
    {
        return (w.value, ForwardSource::MemWb);
    }
    (fallback, ForwardSource::RegFile)
}
