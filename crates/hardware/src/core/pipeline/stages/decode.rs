//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline.
//! It classifies the fetched word, checks for a load-use hazard against the
//! instruction in Execute, and reads source registers from the platform.
//! Writeback has already run this cycle, so a value committed now is seen here.

use crate::config::DecodeFaultPolicy;
use crate::core::pipeline::hazards::{self, Hazard};
use crate::core::pipeline::latches::{IdEx, IdExEntry, Latches, StageFlags};
use crate::core::pipeline::report::CycleReport;
use crate::core::pipeline::signals::{CycleSignals, semantics};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::decode;
use crate::isa::instruction::Decoded;
use crate::soc::Platform;

/// Executes the decode stage of the pipeline.
///
/// # Arguments
///
/// * `cur`      - Current stage registers (IF/ID input, ID/EX for hazard checks).
/// * `next`     - Next stage registers; ID/EX is written, IF/ID when holding.
/// * `policy`   - What to do with an undecodable word.
/// * `platform` - Register file owner.
/// * `signals`  - Read for `redirect`/`mem_busy`; receives `decode_stall`.
/// * `report`   - Receives hazard stalls, squash counts and absorbed decode faults.
pub fn decode_stage<P: Platform + ?Sized>(
    cur: &Latches,
    next: &mut Latches,
    policy: DecodeFaultPolicy,
    platform: &mut P,
    signals: &mut CycleSignals,
    report: &mut CycleReport,
) {
    if signals.redirect.is_some() {
        if !cur.if_id.is_empty() {
            report.squashed += 1;
        }
        return;
    }
    if signals.mem_busy {
        next.if_id = cur.if_id.clone();
        return;
    }
    let Some(f) = cur.if_id.entry else {
        return;
    };

    let (decoded, fault) = match decode(f.inst, f.pc) {
        Ok(d) => (d, None),
        Err(err) => match policy {
            DecodeFaultPolicy::Nop => {
                tracing::warn!(%err, "decode fault, issuing as no-op");
                report.decode_fault = Some(err);
                (Decoded::illegal(f.inst), None)
            }
            DecodeFaultPolicy::Halt => {
                tracing::warn!(%err, "decode fault, halting if it retires");
                (Decoded::illegal(f.inst), Some(err))
            }
        },
    };
    let sem = semantics(decoded.op);

    if let Some(hazard) = hazards::detect(&cur.id_ex, &decoded, sem) {
        match hazard {
            Hazard::LoadUse { .. } => report.stalls.load_use = true,
            Hazard::StoreSource { .. } => report.stalls.store_source = true,
        }
        tracing::trace!(pc = format_args!("{:#x}", f.pc), ?hazard, "ID stall");
        signals.decode_stall = true;
        let stalled = StageFlags {
            stall: true,
            ..StageFlags::default()
        };
        next.if_id = cur.if_id.clone();
        next.if_id.flags.stall = true;
        next.id_ex = IdEx::bubble(stalled);
        return;
    }

    let rv1 = platform.read_register(decoded.rs1);
    let rv2 = platform.read_register(decoded.rs2);
    tracing::trace!(
        pc = format_args!("{:#x}", f.pc),
        op = %decoded.op,
        rd = decoded.rd,
        rs1 = decoded.rs1,
        rs2 = decoded.rs2,
        imm = decoded.imm,
        "ID"
    );
    next.id_ex = IdEx::with(IdExEntry {
        pc: f.pc,
        decoded,
        sem,
        rv1,
        rv2,
        predicted: f.predicted,
        fault,
    });
}
