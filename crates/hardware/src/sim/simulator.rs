//! Simulator: owns the pipeline, the system and the statistics side-by-side.
//!
//! The pipeline borrows the system only for the duration of one cycle, so the
//! two never need to reference each other.

use crate::common::error::{ConfigError, SimError};
use crate::config::Config;
use crate::core::Pipeline;
use crate::core::pipeline::CycleReport;
use crate::soc::System;
use crate::stats::SimStats;

/// Why [`Simulator::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// An `ecall` or `ebreak` retired at this PC.
    Halted {
        /// Address of the halting instruction.
        pc: u64,
    },
    /// The cycle budget ran out.
    CycleLimit,
    /// The requested number of instructions retired.
    Retired,
}

/// Top-level simulator: pipeline + architectural state + statistics.
#[derive(Debug)]
pub struct Simulator {
    /// The core.
    pub pipeline: Pipeline,
    /// Registers, PC and memory.
    pub system: System,
    /// Counters folded from every cycle report.
    pub stats: SimStats,
}

impl Simulator {
    /// Creates a simulator around an existing system.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when `config` does not validate.
    pub fn new(system: System, config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            pipeline: Pipeline::new(config)?,
            system,
            stats: SimStats::default(),
        })
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError`] from the pipeline.
    pub fn tick(&mut self) -> Result<CycleReport, SimError> {
        let report = self.pipeline.advance_cycle(&mut self.system)?;
        self.stats.record(&report);
        Ok(report)
    }

    /// Runs until an environment call retires or `max_cycles` have elapsed.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError`] from the pipeline.
    pub fn run(&mut self, max_cycles: u64) -> Result<StopReason, SimError> {
        let result = self.run_inner(max_cycles, None);
        self.stats.sync_caches(&self.pipeline);
        result
    }

    /// Runs until `n` more instructions retire, an environment call retires,
    /// or `max_cycles` elapse.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError`] from the pipeline.
    pub fn run_until_retired(&mut self, n: u64, max_cycles: u64) -> Result<StopReason, SimError> {
        let result = self.run_inner(max_cycles, Some(n));
        self.stats.sync_caches(&self.pipeline);
        result
    }

    fn run_inner(&mut self, max_cycles: u64, target: Option<u64>) -> Result<StopReason, SimError> {
        let mut retired = 0;
        for _ in 0..max_cycles {
            let report = self.tick()?;
            let Some(r) = report.retired else {
                continue;
            };
            retired += 1;
            if r.op.is_environment_call() {
                tracing::info!(pc = format_args!("{:#x}", r.pc), op = %r.op, "halt");
                return Ok(StopReason::Halted { pc: r.pc });
            }
            if target == Some(retired) {
                return Ok(StopReason::Retired);
            }
        }
        Ok(StopReason::CycleLimit)
    }
}
