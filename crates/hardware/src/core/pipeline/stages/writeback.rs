//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits results to the register file and raises decode faults carried
//! under the `halt` policy. Writeback runs first in a cycle, so the value is
//! visible to the Decode register read of the same cycle.

use crate::common::constants::REG_ZERO;
use crate::common::error::DecodeError;
use crate::core::pipeline::latches::MemWb;
use crate::core::pipeline::report::{CycleReport, Retired};
use crate::soc::Platform;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `mem_wb`   - Current MEM/WB latch.
/// * `platform` - Register file owner.
/// * `report`   - Receives the retired instruction.
///
/// # Errors
///
/// Returns the carried [`DecodeError`] when a faulting instruction arrives;
/// nothing is committed in that case.
pub fn wb_stage<P: Platform + ?Sized>(
    mem_wb: &MemWb,
    platform: &mut P,
    report: &mut CycleReport,
) -> Result<(), DecodeError> {
    let Some(wb) = mem_wb.entry.as_ref() else {
        return Ok(());
    };
    if let Some(fault) = wb.fault {
        tracing::error!(pc = format_args!("{:#x}", wb.pc), %fault, "WB halting on decode fault");
        return Err(fault);
    }

    let writes = wb.writes_rd && wb.rd != REG_ZERO;
    if writes {
        platform.write_register(wb.rd, wb.value);
    }
    tracing::trace!(
        pc = format_args!("{:#x}", wb.pc),
        op = %wb.op,
        rd = wb.rd,
        value = format_args!("{:#x}", wb.value),
        "WB"
    );
    #[cfg(feature = "commit-log")]
    tracing::info!(
        pc = format_args!("{:#x}", wb.pc),
        inst = format_args!("{:#010x}", wb.inst),
        "{}",
        crate::isa::disasm::disassemble(wb.inst)
    );

    report.retired = Some(Retired {
        pc: wb.pc,
        inst: wb.inst,
        op: wb.op,
        rd: writes.then_some(wb.rd),
        value: if writes { wb.value } else { 0 },
    });
    Ok(())
}
