//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipelined core. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (IPC, CPI).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, system).
//! 3. **Branch prediction:** Resolved branches, correct predictions, mispredictions and redirects.
//! 4. **Stalls:** Load-use, store-source, I-cache, D-cache and memory-fault stall cycles.
//! 5. **Caches:** Hit/miss counts for the I-cache and D-cache.

use std::time::Instant;

use serde::Serialize;

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::report::{CycleReport, Redirect};
use crate::isa::op::Op;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,

    /// Loads retired.
    pub inst_load: u64,
    /// Stores retired.
    pub inst_store: u64,
    /// Branches and jumps retired.
    pub inst_branch: u64,
    /// ALU, `lui` and `auipc` instructions retired.
    pub inst_alu: u64,
    /// System (fence, CSR, environment) instructions retired.
    pub inst_system: u64,

    /// Conditional branches resolved in Execute.
    pub branches_resolved: u64,
    /// Branches whose fetched path was correct.
    pub branch_predictions: u64,
    /// Branches whose fetched path was wrong.
    pub branch_mispredictions: u64,
    /// Taken branches that had no prediction.
    pub redirects_taken: u64,
    /// Predicted branches that went the other way.
    pub redirects_mispredicted: u64,
    /// Unconditional jumps.
    pub redirects_jump: u64,
    /// Wrong-path instructions discarded.
    pub squashed: u64,

    /// Cycles Decode held an instruction behind a load.
    pub stalls_load_use: u64,
    /// Cycles Decode held a store behind a load of its value.
    pub stalls_store_source: u64,
    /// Cycles Fetch waited on the I-cache.
    pub stalls_icache: u64,
    /// Cycles Memory waited on the D-cache.
    pub stalls_dcache: u64,
    /// Cycles a failed backing-store access was retried.
    pub stalls_memory_fault: u64,

    /// Decode faults issued as no-ops.
    pub decode_faults: u64,

    /// I-cache hits.
    pub icache_hits: u64,
    /// I-cache misses.
    pub icache_misses: u64,
    /// D-cache hits.
    pub dcache_hits: u64,
    /// D-cache misses.
    pub dcache_misses: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_alu: 0,
            inst_system: 0,
            branches_resolved: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            redirects_taken: 0,
            redirects_mispredicted: 0,
            redirects_jump: 0,
            squashed: 0,
            stalls_load_use: 0,
            stalls_store_source: 0,
            stalls_icache: 0,
            stalls_dcache: 0,
            stalls_memory_fault: 0,
            decode_faults: 0,
            icache_hits: 0,
            icache_misses: 0,
            dcache_hits: 0,
            dcache_misses: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"core"`, `"instruction_mix"`, `"branch"`, `"memory"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "core", "instruction_mix", "branch", "memory"];

impl SimStats {
    /// Folds one cycle's report into the counters.
    pub fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;

        if let Some(r) = report.retired {
            self.instructions_retired += 1;
            match r.op {
                op if op.is_load() => self.inst_load += 1,
                op if op.is_store() => self.inst_store += 1,
                op if op.is_branch() || matches!(op, Op::Jal | Op::Jalr) => {
                    self.inst_branch += 1;
                }
                op if op.is_system() => self.inst_system += 1,
                _ => self.inst_alu += 1,
            }
        }

        if let Some(b) = report.branch {
            self.branches_resolved += 1;
            if b.correct {
                self.branch_predictions += 1;
            } else {
                self.branch_mispredictions += 1;
            }
        }
        match report.redirect {
            Some(Redirect::Taken) => self.redirects_taken += 1,
            Some(Redirect::Mispredicted) => self.redirects_mispredicted += 1,
            Some(Redirect::Jump) => self.redirects_jump += 1,
            None => {}
        }
        self.squashed += report.squashed as u64;

        let s = report.stalls;
        self.stalls_load_use += u64::from(s.load_use);
        self.stalls_store_source += u64::from(s.store_source);
        self.stalls_icache += u64::from(s.icache);
        self.stalls_dcache += u64::from(s.dcache);
        self.stalls_memory_fault += u64::from(s.memory_fault);

        self.decode_faults += u64::from(report.decode_fault.is_some());
    }

    /// Copies the cache counters from the pipeline.
    pub fn sync_caches(&mut self, pipeline: &Pipeline) {
        self.icache_hits = pipeline.icache().hits;
        self.icache_misses = pipeline.icache().misses;
        self.dcache_hits = pipeline.dcache().hits;
        self.dcache_misses = pipeline.dcache().misses;
    }

    /// Instructions per cycle; zero before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Cycles per instruction; zero before the first retirement.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        if want("summary") {
            println!("\n==========================================================");
            println!("RV64IM PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("core") {
            println!("CORE BREAKDOWN");
            for (name, n) in [
                ("stalls.load_use", self.stalls_load_use),
                ("stalls.store_source", self.stalls_store_source),
                ("stalls.icache", self.stalls_icache),
                ("stalls.dcache", self.stalls_dcache),
                ("stalls.mem_fault", self.stalls_memory_fault),
            ] {
                println!("  {name:<22} {n} ({:.2}%)", pct(n, cyc));
            }
            println!("  {:<22} {}", "squashed", self.squashed);
            println!("  {:<22} {}", "decode_faults", self.decode_faults);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            println!("INSTRUCTION MIX");
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.system", self.inst_system),
            ] {
                println!("  {name:<22} {n} ({:.2}%)", pct(n, instr));
            }
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            let acc = if self.branches_resolved > 0 {
                pct(self.branch_predictions, self.branches_resolved as f64)
            } else {
                0.0
            };
            println!("BRANCH PREDICTION");
            println!("  bp.resolved            {}", self.branches_resolved);
            println!("  bp.mispredicts         {}", self.branch_mispredictions);
            println!("  bp.accuracy            {acc:.2}%");
            println!(
                "  redirects              taken={} mispredicted={} jump={}",
                self.redirects_taken, self.redirects_mispredicted, self.redirects_jump
            );
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            let print_cache = |name: &str, hits: u64, misses: u64| {
                let total = hits + misses;
                let miss_rate = if total > 0 {
                    pct(misses, total as f64)
                } else {
                    0.0
                };
                println!(
                    "  {name:<6} accesses: {total:<10} | hits: {hits:<10} | miss_rate: {miss_rate:.2}%"
                );
            };
            println!("CACHES");
            print_cache("L1-I", self.icache_hits, self.icache_misses);
            print_cache("L1-D", self.dcache_hits, self.dcache_misses);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
