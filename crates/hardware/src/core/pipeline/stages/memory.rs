//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline.
//! Loads read through the D-cache with the two-phase fill on a miss; stores
//! write through to the platform. While a fill or a faulted store is
//! outstanding the stage re-presents its input and raises `mem_busy`, which
//! freezes Execute, Decode and Fetch; Writeback receives bubbles.

use crate::core::pipeline::latches::{ExMemEntry, Latches, MemWb, MemWbEntry, StageFlags};
use crate::core::pipeline::report::CycleReport;
use crate::core::pipeline::signals::{CycleSignals, MemWidth, Semantics};
use crate::core::units::cache::{Cache, FillPoll, dcache, le_value};
use crate::isa::decode::sign_extend;
use crate::soc::Platform;

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cur`      - Current stage registers (EX/MEM input, MEM/WB phase flags).
/// * `next`     - Next stage registers; MEM/WB is written, EX/MEM on a stall.
/// * `dcache`   - Data cache.
/// * `platform` - Backing memory.
/// * `signals`  - Receives `mem_busy`.
/// * `report`   - Receives D-cache and memory-fault stalls.
pub fn mem_stage<P: Platform + ?Sized>(
    cur: &Latches,
    next: &mut Latches,
    dcache: &mut Cache,
    platform: &mut P,
    signals: &mut CycleSignals,
    report: &mut CycleReport,
) {
    let Some(ex) = cur.ex_mem.entry else {
        return;
    };

    let outcome = match ex.sem {
        Semantics::Load { width, signed } => {
            load(cur.mem_wb.flags, &ex, width.bytes(), dcache, platform, report)
                .map(|raw| extend(raw, width, signed))
        }
        Semantics::Store { width } => store(&ex, width, dcache, platform, report),
        _ => Ok(ex.result),
    };

    match outcome {
        Ok(value) => {
            tracing::trace!(
                pc = format_args!("{:#x}", ex.pc),
                op = %ex.op,
                addr = format_args!("{:#x}", ex.addr),
                value = format_args!("{value:#x}"),
                "MEM"
            );
            next.mem_wb = MemWb::with(MemWbEntry {
                pc: ex.pc,
                inst: ex.inst,
                op: ex.op,
                rd: ex.rd,
                value,
                writes_rd: ex.sem.writes_rd(),
                fault: ex.fault,
            });
        }
        Err(flags) => {
            signals.mem_busy = true;
            next.ex_mem = cur.ex_mem.clone();
            next.mem_wb = MemWb::bubble(flags);
        }
    }
}

/// Runs one cycle of a load. `Err` carries the flags of the bubble to emit.
fn load<P: Platform + ?Sized>(
    phase: StageFlags,
    ex: &ExMemEntry,
    size: usize,
    dcache: &mut Cache,
    platform: &mut P,
    report: &mut CycleReport,
) -> Result<u64, StageFlags> {
    let waiting = StageFlags {
        d_cache_stall: true,
        ..StageFlags::default()
    };

    if phase.first_cache_stall {
        if let Some(bytes) = dcache.commit_fill() {
            return Ok(le_value(&bytes));
        }
        if let Some(bytes) = dcache.peek(ex.addr, size) {
            return Ok(le_value(bytes));
        }
    } else if phase.d_cache_stall {
        let faults = dcache.faults;
        let poll = dcache.poll_fill(platform);
        report.stalls.dcache = true;
        report.stalls.memory_fault |= dcache.faults > faults;
        return Err(match poll {
            FillPoll::Waiting => waiting,
            FillPoll::Ready => StageFlags {
                first_cache_stall: true,
                ..waiting
            },
        });
    } else if let Some(value) = dcache::load(dcache, ex.addr, size) {
        return Ok(value);
    }

    let faults = dcache.faults;
    dcache.begin_fill(ex.addr, size, platform);
    report.stalls.dcache = true;
    report.stalls.memory_fault |= dcache.faults > faults;
    Err(waiting)
}

/// Writes through to memory. A fault is retried next cycle.
fn store<P: Platform + ?Sized>(
    ex: &ExMemEntry,
    width: MemWidth,
    dcache: &mut Cache,
    platform: &mut P,
    report: &mut CycleReport,
) -> Result<u64, StageFlags> {
    match dcache::store(dcache, platform, ex.addr, ex.store_data, width.bytes()) {
        Ok(hit) => {
            tracing::trace!(addr = format_args!("{:#x}", ex.addr), hit, "store");
            Ok(0)
        }
        Err(fault) => {
            tracing::warn!(pc = format_args!("{:#x}", ex.pc), %fault, "store failed, retrying");
            report.stalls.memory_fault = true;
            Err(StageFlags {
                stall: true,
                ..StageFlags::default()
            })
        }
    }
}

/// Sign- or zero-extends a loaded value of the given width.
pub const fn extend(raw: u64, width: MemWidth, signed: bool) -> u64 {
    let bits = (width.bytes() * 8) as u32;
    if bits >= 64 {
        return raw;
    }
    let value = raw & ((1 << bits) - 1);
    if signed { sign_extend(value, bits) } else { value }
}
