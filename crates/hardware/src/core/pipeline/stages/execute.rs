//! Instruction Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It performs:
//! 1. **Operand resolution:** Sources are taken from the bypass network (EX/MEM, then MEM/WB)
//!    in preference to the values read at Decode.
//! 2. **Computation:** ALU results, effective addresses, link values and branch conditions.
//! 3. **Branch resolution:** The BTB is updated and, if the fetched path differs from the
//!    true next PC, a redirect is raised for the end of the cycle.
//!
//! When Memory is busy the stage does not advance, but it still latches the
//! bypassed operands back into ID/EX. The producers it saw this cycle may have
//! retired by the time it resumes.

use crate::common::constants::{INSTRUCTION_BYTES, JALR_TARGET_MASK, UPPER_IMM_MASK};
use crate::core::pipeline::hazards::{ForwardSource, forward_operand};
use crate::core::pipeline::latches::{ExMem, ExMemEntry, IdExEntry, Latches};
use crate::core::pipeline::report::{BranchOutcome, CycleReport, Redirect};
use crate::core::pipeline::signals::{CycleSignals, OpBSrc, Semantics};
use crate::core::units::alu::Alu;
use crate::core::units::bru::btb::BtbResolution;
use crate::core::units::bru::{BranchPredictor, Predictor};

/// What Execute computed for one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Value for `rd`.
    pub result: u64,
    /// Effective memory address.
    pub addr: u64,
    /// Value to store.
    pub store_data: u64,
    /// Next PC when control leaves sequential flow.
    pub target: Option<u64>,
}

/// Resolves both source operands of `e` through the bypass network.
fn operands(e: &IdExEntry, cur: &Latches) -> (u64, u64) {
    let resolve = |used: bool, reg: usize, fallback: u64| {
        if !used {
            return fallback;
        }
        let (value, src) = forward_operand(reg, fallback, &cur.ex_mem, &cur.mem_wb);
        if src != ForwardSource::RegFile {
            tracing::trace!(
                pc = format_args!("{:#x}", e.pc),
                reg,
                value = format_args!("{value:#x}"),
                source = ?src,
                "forward"
            );
        }
        value
    };
    (
        resolve(e.sem.reads_rs1(), e.decoded.rs1, e.rv1),
        resolve(e.sem.reads_rs2(), e.decoded.rs2, e.rv2),
    )
}

/// Computes the result of one instruction from its resolved operands.
///
/// # Arguments
///
/// * `sem` - Operation class.
/// * `pc`  - Address of the instruction.
/// * `imm` - Decoded immediate.
/// * `a`   - Resolved `rs1`.
/// * `b`   - Resolved `rs2`.
///
/// # Returns
///
/// The computed [`ExecOutcome`]; `target` is set for taken branches and jumps.
pub fn compute(sem: Semantics, pc: u64, imm: i64, a: u64, b: u64) -> ExecOutcome {
    let imm_u = imm as u64;
    let link = pc.wrapping_add(INSTRUCTION_BYTES);
    let mut out = ExecOutcome::default();
    match sem {
        Semantics::Load { .. } => out.addr = a.wrapping_add(imm_u),
        Semantics::Store { .. } => {
            out.addr = a.wrapping_add(imm_u);
            out.store_data = b;
        }
        Semantics::Alu { op, src, word } => {
            let rhs = match src {
                OpBSrc::Reg => b,
                OpBSrc::Imm => imm_u,
            };
            out.result = Alu::execute(op, a, rhs, word);
        }
        Semantics::Lui => out.result = upper_immediate(imm),
        Semantics::Auipc => out.result = pc.wrapping_add(upper_immediate(imm)),
        Semantics::Branch(cond) => {
            if cond.holds(a, b) {
                out.target = Some(pc.wrapping_add(imm_u));
            }
        }
        Semantics::Jal => {
            out.result = link;
            out.target = Some(pc.wrapping_add(imm_u));
        }
        Semantics::Jalr => {
            out.result = link;
            out.target = Some(a.wrapping_add(imm_u) & JALR_TARGET_MASK);
        }
        Semantics::Nop => {}
    }
    out
}

/// The U-immediate placed in bits 31:12, with the upper word left clear.
const fn upper_immediate(imm: i64) -> u64 {
    ((imm << 12) as u64) & UPPER_IMM_MASK
}

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `cur`       - Current stage registers.
/// * `next`      - Next stage registers; EX/MEM is written, ID/EX while Memory is busy.
/// * `predictor` - Receives branch resolutions.
/// * `signals`   - Read for `mem_busy`; receives `redirect`.
/// * `report`    - Receives the redirect kind and branch outcome.
pub fn execute_stage(
    cur: &Latches,
    next: &mut Latches,
    predictor: &mut Predictor,
    signals: &mut CycleSignals,
    report: &mut CycleReport,
) {
    let Some(e) = cur.id_ex.entry else {
        if signals.mem_busy {
            next.id_ex = cur.id_ex.clone();
        }
        return;
    };

    let (a, b) = operands(&e, cur);

    if signals.mem_busy {
        let mut held = cur.id_ex.clone();
        held.entry = Some(IdExEntry { rv1: a, rv2: b, ..e });
        held.flags.stall = true;
        next.id_ex = held;
        return;
    }

    let d = e.decoded;
    let out = compute(e.sem, e.pc, d.imm, a, b);
    let fallthrough = e.pc.wrapping_add(INSTRUCTION_BYTES);
    let actual = out.target.unwrap_or(fallthrough);
    let fetched = e.predicted.unwrap_or(fallthrough);

    let mut latch = ExMem::with(ExMemEntry {
        pc: e.pc,
        inst: d.raw,
        op: d.op,
        sem: e.sem,
        rd: d.rd,
        result: out.result,
        addr: out.addr,
        store_data: out.store_data,
        fault: e.fault,
    });
    latch.flags.forward_tag =
        e.sem.writes_rd() && !matches!(e.sem, Semantics::Load { .. }) && d.rd != 0;

    let mut mismatch = false;
    if matches!(e.sem, Semantics::Branch(_)) {
        let taken_target = e.pc.wrapping_add(d.imm as u64);
        let resolution = predictor.resolve(e.pc, taken_target);
        if let BtbResolution::Mismatch { stale } = resolution {
            tracing::debug!(
                pc = format_args!("{:#x}", e.pc),
                stale = format_args!("{stale:#x}"),
                "btb target corrected"
            );
            mismatch = true;
        }
        report.branch = Some(BranchOutcome {
            pc: e.pc,
            taken: out.target.is_some(),
            predicted: e.predicted.is_some(),
            correct: actual == fetched,
        });
    }

    let jump = matches!(e.sem, Semantics::Jal | Semantics::Jalr);
    if jump || actual != fetched {
        signals.redirect = Some(actual);
        let kind = if jump {
            Redirect::Jump
        } else if e.predicted.is_some() {
            Redirect::Mispredicted
        } else {
            Redirect::Taken
        };
        latch.flags.wrong_prediction = kind == Redirect::Mispredicted || mismatch;
        latch.flags.branch = kind != Redirect::Mispredicted;
        report.redirect = Some(kind);
    } else {
        latch.flags.wrong_prediction = mismatch;
    }

    tracing::trace!(
        pc = format_args!("{:#x}", e.pc),
        op = %d.op,
        a = format_args!("{a:#x}"),
        b = format_args!("{b:#x}"),
        result = format_args!("{:#x}", out.result),
        next = format_args!("{actual:#x}"),
        "EX"
    );
    next.ex_mem = latch;
}
