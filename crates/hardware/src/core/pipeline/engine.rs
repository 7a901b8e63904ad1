//! Pipeline controller.
//!
//! This module owns everything that belongs to the core rather than the platform:
//! 1. **Stage registers:** A current and a next [`Latches`] set, swapped at the cycle boundary.
//! 2. **Microarchitectural units:** The branch predictor and both caches, passed to
//!    the stages explicitly.
//! 3. **Cycle sequencing:** Writeback, Memory, Execute, Decode, Fetch, with one
//!    [`CycleSignals`] record carrying same-cycle control backwards.
//! 4. **Halt state:** A decode fault retired under the `halt` policy stops the core.

use crate::common::error::{ConfigError, SimError};
use crate::config::{Config, DecodeFaultPolicy};
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::report::{CycleReport, Redirect};
use crate::core::pipeline::signals::CycleSignals;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::units::bru::Predictor;
use crate::core::units::cache::Cache;
use crate::soc::Platform;

/// The five-stage in-order pipeline.
///
/// Holds no architectural state: the PC, registers and memory are reached
/// through the [`Platform`] handed to [`Pipeline::advance_cycle`].
#[derive(Debug)]
pub struct Pipeline {
    cur: Latches,
    next: Latches,
    predictor: Predictor,
    icache: Cache,
    dcache: Cache,
    decode_fault: DecodeFaultPolicy,
    cycle: u64,
    halted: bool,
}

impl Pipeline {
    /// Builds an empty pipeline.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache geometry, predictor and fault policy.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`Config::validate`]. The caches index by
    /// masking, so a zero or non-power-of-two line count is refused here.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            cur: Latches::default(),
            next: Latches::default(),
            predictor: Predictor::new(&config.pipeline),
            icache: Cache::new("icache", &config.cache.icache),
            dcache: Cache::new("dcache", &config.cache.dcache),
            decode_fault: config.pipeline.decode_fault,
            cycle: 0,
            halted: false,
        })
    }

    /// Advances every stage by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `platform` - Architectural state and backing memory.
    ///
    /// # Returns
    ///
    /// What retired, stalled and was squashed during the cycle.
    ///
    /// # Errors
    ///
    /// [`SimError::Decode`] when a faulting instruction reaches Writeback under
    /// the `halt` policy, and [`SimError::Halted`] on every call after that.
    pub fn advance_cycle<P: Platform + ?Sized>(
        &mut self,
        platform: &mut P,
    ) -> Result<CycleReport, SimError> {
        if self.halted {
            return Err(SimError::Halted);
        }
        self.cycle += 1;
        let mut report = CycleReport {
            cycle: self.cycle,
            ..CycleReport::default()
        };
        let mut signals = CycleSignals::default();
        self.next = Latches::default();

        if let Err(fault) = wb_stage(&self.cur.mem_wb, platform, &mut report) {
            self.halted = true;
            return Err(fault.into());
        }
        mem_stage(
            &self.cur,
            &mut self.next,
            &mut self.dcache,
            platform,
            &mut signals,
            &mut report,
        );
        execute_stage(
            &self.cur,
            &mut self.next,
            &mut self.predictor,
            &mut signals,
            &mut report,
        );
        decode_stage(
            &self.cur,
            &mut self.next,
            self.decode_fault,
            platform,
            &mut signals,
            &mut report,
        );
        fetch_stage(
            &self.cur,
            &mut self.next,
            &mut self.icache,
            &mut self.predictor,
            platform,
            &signals,
            &mut report,
        );

        if let Some(target) = signals.redirect {
            // Nothing fetched on the wrong path may reach Execute.
            self.next.if_id.flush();
            self.next.id_ex.flush();
            let kind = report.redirect.unwrap_or(Redirect::Taken);
            tracing::trace!(
                target = format_args!("{target:#x}"),
                squashed = report.squashed,
                ?kind,
                "squash"
            );
        }

        std::mem::swap(&mut self.cur, &mut self.next);
        Ok(report)
    }

    /// Current stage registers.
    pub const fn latches(&self) -> &Latches {
        &self.cur
    }

    /// The instruction cache.
    pub const fn icache(&self) -> &Cache {
        &self.icache
    }

    /// The data cache.
    pub const fn dcache(&self) -> &Cache {
        &self.dcache
    }

    /// The branch predictor.
    pub const fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Cycles advanced so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// True once a decode fault has halted the core.
    pub const fn is_halted(&self) -> bool {
        self.halted
    }
}
