//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It reads the word at the platform PC through the I-cache, consults the
//! branch predictor, and advances the PC to the predicted or sequential
//! address. On a miss it runs the two-phase fill across the following cycles,
//! emitting bubbles flagged `i_cache_stall` while older instructions drain.

use crate::common::constants::INSTRUCTION_BYTES;
use crate::core::pipeline::latches::{IfId, IfIdEntry, Latches, StageFlags};
use crate::core::pipeline::report::CycleReport;
use crate::core::pipeline::signals::CycleSignals;
use crate::core::units::bru::{BranchPredictor, Predictor};
use crate::core::units::cache::{Cache, FillPoll, icache, le_value};
use crate::soc::Platform;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cur`       - Current stage registers (IF/ID carries the fill phase).
/// * `next`      - Next stage registers; IF/ID is written.
/// * `icache`    - Instruction cache.
/// * `predictor` - Branch predictor.
/// * `platform`  - PC and backing memory.
/// * `signals`   - Read for `redirect`, `decode_stall` and `mem_busy`.
/// * `report`    - Receives I-cache and memory-fault stalls.
pub fn fetch_stage<P: Platform + ?Sized>(
    cur: &Latches,
    next: &mut Latches,
    icache: &mut Cache,
    predictor: &mut Predictor,
    platform: &mut P,
    signals: &CycleSignals,
    report: &mut CycleReport,
) {
    if let Some(target) = signals.redirect {
        icache.cancel_fill();
        platform.set_pc(target);
        tracing::trace!(target = format_args!("{target:#x}"), "IF redirect");
        return;
    }
    if signals.decode_stall || signals.mem_busy {
        return;
    }

    let phase = cur.if_id.flags;
    let uncached = if phase.first_cache_stall {
        icache.commit_fill()
    } else if phase.i_cache_stall {
        let faults = icache.faults;
        let poll = icache.poll_fill(platform);
        report.stalls.icache = true;
        report.stalls.memory_fault |= icache.faults > faults;
        next.if_id = IfId::bubble(StageFlags {
            i_cache_stall: true,
            first_cache_stall: poll == FillPoll::Ready,
            ..StageFlags::default()
        });
        return;
    } else {
        None
    };

    let pc = platform.get_pc();
    // A word straddling two lines comes back from the fill uncached.
    let word = uncached.map_or_else(
        || icache::fetch_word(icache, pc),
        |bytes| Some(le_value(&bytes) as u32),
    );
    let Some(inst) = word else {
        let faults = icache.faults;
        icache.begin_fill(pc, INSTRUCTION_BYTES as usize, platform);
        report.stalls.icache = true;
        report.stalls.memory_fault |= icache.faults > faults;
        next.if_id = IfId::bubble(StageFlags {
            i_cache_stall: true,
            ..StageFlags::default()
        });
        return;
    };

    let predicted = predictor.predict(pc, inst);
    let npc = predicted.unwrap_or_else(|| pc.wrapping_add(INSTRUCTION_BYTES));
    tracing::trace!(
        pc = format_args!("{pc:#x}"),
        inst = format_args!("{inst:#010x}"),
        next = format_args!("{npc:#x}"),
        "IF"
    );
    platform.set_pc(npc);
    next.if_id = IfId::with(IfIdEntry {
        pc,
        inst,
        predicted,
    });
}
