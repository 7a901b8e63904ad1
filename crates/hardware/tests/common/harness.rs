use rvpipe_core::Simulator;
use rvpipe_core::common::error::SimError;
use rvpipe_core::config::Config;
use rvpipe_core::core::pipeline::CycleReport;
use rvpipe_core::sim::StopReason;
use rvpipe_core::soc::{Platform, System};
use rvpipe_core::stats::SimStats;

/// Load address of every test program.
pub const BASE: u64 = 0x8000_0000;

/// Scratch data area, well clear of the code.
pub const DATA: u64 = BASE + 0x1000;

/// Cycle budget for a test run.
pub const MAX_CYCLES: u64 = 10_000;

/// Configuration used by the harness: 64 KiB of zero-latency RAM at [`BASE`].
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.memory.size = 64 * 1024;
    config.memory.latency = 0;
    config
}

/// Installs a test-writer subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub struct TestContext {
    pub sim: Simulator,
    /// Every report produced by [`TestContext::tick`] and the run helpers.
    pub reports: Vec<CycleReport>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&test_config())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let system = System::new(config);
        Self {
            sim: Simulator::new(system, config).expect("test configuration must validate"),
            reports: Vec::new(),
        }
    }

    /// Writes `instructions` at [`BASE`] and points the PC at the first one.
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        let bytes: Vec<u8> = instructions.iter().flat_map(|i| i.to_le_bytes()).collect();
        if let Err(e) = self.sim.system.load_binary_at(&bytes, BASE) {
            panic!("program does not fit: {e}");
        }
        self.sim.system.set_pc(BASE);
        self
    }

    /// Writes a doubleword into memory before the run.
    pub fn poke_u64(&mut self, addr: u64, value: u64) {
        if let Err(e) = self.sim.system.load_binary_at(&value.to_le_bytes(), addr) {
            panic!("poke out of range: {e}");
        }
    }

    /// Reads a doubleword straight from memory.
    pub fn peek_u64(&self, addr: u64) -> u64 {
        let bytes = self
            .sim
            .system
            .memory
            .peek(addr, 8)
            .expect("address in range");
        u64::from_le_bytes(bytes.try_into().expect("eight bytes"))
    }

    pub fn set_reg(&mut self, reg: usize, val: u64) {
        self.sim.system.regs.write(reg, val);
    }

    pub fn get_reg(&self, reg: usize) -> u64 {
        self.sim.system.regs.read(reg)
    }

    pub fn stats(&self) -> &SimStats {
        &self.sim.stats
    }

    /// Advances one cycle, keeping the report.
    pub fn tick(&mut self) -> Result<CycleReport, SimError> {
        let report = self.sim.tick()?;
        self.reports.push(report);
        Ok(report)
    }

    /// Ticks until an `ecall`/`ebreak` retires, panicking on an error or a timeout.
    pub fn run_to_halt(&mut self) {
        for _ in 0..MAX_CYCLES {
            let report = self.tick().expect("cycle failed");
            if report.retired.is_some_and(|r| r.op.is_environment_call()) {
                self.sim.stats.sync_caches(&self.sim.pipeline);
                return;
            }
        }
        panic!("program did not halt within {MAX_CYCLES} cycles");
    }

    /// Runs through the simulator's own loop.
    pub fn run(&mut self, max_cycles: u64) -> Result<StopReason, SimError> {
        self.sim.run(max_cycles)
    }

    /// Retired PCs in order.
    pub fn retired_pcs(&self) -> Vec<u64> {
        self.reports
            .iter()
            .filter_map(|r| r.retired.map(|i| i.pc))
            .collect()
    }

    /// Number of cycles whose report satisfies `pred`.
    pub fn count(&self, pred: impl Fn(&CycleReport) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(r)).count()
    }
}
